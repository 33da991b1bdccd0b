// Integration tests for the module lifecycle
//
// These tests drive the load hook and the plugin through the in-memory
// frontend's event dispatcher.

use anyhow::Result;
use obs_controller::config::Config;
use obs_controller::frontend::FrontendCall;
use obs_controller::{FrontendEvent, InMemoryFrontend, LoadHook, Plugin};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_hook(frontend: &Arc<InMemoryFrontend>) -> (Arc<LoadHook>, Arc<AtomicUsize>) {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let hook = LoadHook::register(frontend.clone(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (hook, fired)
}

fn remove_calls(frontend: &InMemoryFrontend) -> usize {
    frontend
        .calls()
        .iter()
        .filter(|c| matches!(c, FrontendCall::RemoveEventCallback(_)))
        .count()
}

#[test]
fn test_hook_ignores_other_events() {
    let frontend = Arc::new(InMemoryFrontend::new());
    let (hook, fired) = counting_hook(&frontend);

    frontend.dispatch(FrontendEvent::SceneChanged);
    frontend.dispatch(FrontendEvent::RecordingStarted);
    frontend.dispatch(FrontendEvent::Other(99));

    assert!(hook.is_armed());
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(frontend.handler_count(), 1);
    assert_eq!(remove_calls(&frontend), 0);
}

#[test]
fn test_hook_deregisters_once_on_finished_loading() {
    let frontend = Arc::new(InMemoryFrontend::new());
    let (hook, fired) = counting_hook(&frontend);

    assert_eq!(frontend.dispatch(FrontendEvent::FinishedLoading), 1);

    assert!(!hook.is_armed());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(frontend.handler_count(), 0);
    assert_eq!(remove_calls(&frontend), 1);

    // Never invoked again in the same session
    assert_eq!(frontend.dispatch(FrontendEvent::FinishedLoading), 0);
    assert_eq!(frontend.dispatch(FrontendEvent::Exit), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(remove_calls(&frontend), 1);
}

#[test]
fn test_hook_removes_its_own_subscription() {
    let frontend = Arc::new(InMemoryFrontend::new());
    let (_hook, _fired) = counting_hook(&frontend);

    frontend.dispatch(FrontendEvent::FinishedLoading);

    let calls = frontend.calls();
    let added = calls.iter().find_map(|c| match c {
        FrontendCall::AddEventCallback(s) => Some(*s),
        _ => None,
    });
    let removed = calls.iter().find_map(|c| match c {
        FrontendCall::RemoveEventCallback(s) => Some(*s),
        _ => None,
    });
    assert!(added.is_some());
    assert_eq!(added, removed);
}

#[test]
fn test_disarm_deregisters_without_firing() {
    let frontend = Arc::new(InMemoryFrontend::new());
    let (hook, fired) = counting_hook(&frontend);

    hook.disarm();
    hook.disarm();

    assert_eq!(remove_calls(&frontend), 1);
    assert_eq!(frontend.dispatch(FrontendEvent::FinishedLoading), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_plugin_with_server_disabled() {
    let frontend = Arc::new(InMemoryFrontend::new());
    let mut config = Config::default();
    config.server.enabled = false;

    let plugin = Plugin::load(frontend.clone(), config);
    assert!(plugin.hook().is_armed());

    frontend.dispatch(FrontendEvent::FinishedLoading);

    assert!(!plugin.hook().is_armed());
    assert!(plugin.server_addr().is_none());

    plugin.unload();
    // Load + finished loading only touched the event dispatcher
    assert_eq!(frontend.calls().len(), 2);
}

#[test]
fn test_unload_before_frontend_finished_loading() {
    let frontend = Arc::new(InMemoryFrontend::new());
    let plugin = Plugin::load(frontend.clone(), Config::default());

    plugin.unload();

    assert_eq!(frontend.handler_count(), 0);
    assert_eq!(remove_calls(&frontend), 1);
}

#[test]
fn test_plugin_starts_control_api_after_loading() -> Result<()> {
    let frontend = Arc::new(InMemoryFrontend::new());
    let dir = tempfile::tempdir()?;
    let mut config = Config::default();
    config.server.port = 0;
    config.apps.registry_path = dir.path().join("apps.ock").to_string_lossy().into_owned();

    let plugin = Plugin::load(frontend.clone(), config);
    assert!(plugin.server_addr().is_none());

    frontend.dispatch(FrontendEvent::FinishedLoading);
    let addr = plugin.server_addr().expect("server should be running");

    let mut stream = TcpStream::connect(addr)?;
    stream.write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")?;
    let mut response = String::new();
    stream.read_to_string(&mut response)?;

    assert!(response.starts_with("HTTP/1.1 200"), "unexpected response: {}", response);
    assert!(response.ends_with("OK"));

    plugin.unload();
    assert!(TcpStream::connect(addr).is_err());

    Ok(())
}

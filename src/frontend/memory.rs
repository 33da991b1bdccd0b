use super::{EventHandler, Frontend, FrontendEvent, Subscription};
use crate::error::{ControllerError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info};

/// A host call observed by [`InMemoryFrontend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendCall {
    RecordingStart,
    RecordingStop,
    ConfigSet {
        section: String,
        key: String,
        value: String,
    },
    ConfigSave,
    AddEventCallback(Subscription),
    RemoveEventCallback(Subscription),
}

#[derive(Default)]
struct HostState {
    calls: Vec<FrontendCall>,
    recording: bool,
    config: HashMap<(String, String), String>,
    handlers: Vec<(Subscription, EventHandler)>,
    next_subscription: u64,
    save_failure: Option<i32>,
}

/// In-process stand-in for the OBS frontend
///
/// Keeps a profile config in memory, tracks the recording flag and logs every
/// call so tests can assert on the exact sequence the plugin produced.
#[derive(Default)]
pub struct InMemoryFrontend {
    state: Mutex<HostState>,
}

impl InMemoryFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile config value without recording a call
    pub fn with_config_value(self, section: &str, key: &str, value: &str) -> Self {
        self.state
            .lock()
            .config
            .insert((section.to_string(), key.to_string()), value.to_string());
        self
    }

    /// Make every subsequent save fail with `code`
    pub fn fail_saves_with(&self, code: i32) {
        self.state.lock().save_failure = Some(code);
    }

    /// All host calls so far, in order
    pub fn calls(&self) -> Vec<FrontendCall> {
        self.state.lock().calls.clone()
    }

    pub fn count_calls(&self, call: &FrontendCall) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn config_value(&self, section: &str, key: &str) -> Option<String> {
        self.state
            .lock()
            .config
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }

    pub fn handler_count(&self) -> usize {
        self.state.lock().handlers.len()
    }

    /// Deliver `event` to every registered handler, returning how many were invoked
    ///
    /// Handlers run without the state lock held, so they may add or remove
    /// callbacks (including their own) while being dispatched.
    pub fn dispatch(&self, event: FrontendEvent) -> usize {
        let handlers: Vec<EventHandler> = {
            let state = self.state.lock();
            state.handlers.iter().map(|(_, h)| h.clone()).collect()
        };

        debug!("Dispatching {:?} to {} handler(s)", event, handlers.len());

        for handler in &handlers {
            handler(event);
        }

        handlers.len()
    }
}

impl Frontend for InMemoryFrontend {
    fn recording_start(&self) {
        let mut state = self.state.lock();
        state.calls.push(FrontendCall::RecordingStart);
        state.recording = true;
        info!("Host: recording started");
    }

    fn recording_stop(&self) {
        let mut state = self.state.lock();
        state.calls.push(FrontendCall::RecordingStop);
        state.recording = false;
        info!("Host: recording stopped");
    }

    fn recording_active(&self) -> bool {
        self.state.lock().recording
    }

    fn profile_config_get(&self, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.config_value(section, key))
    }

    fn profile_config_set(&self, section: &str, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FrontendCall::ConfigSet {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });
        state
            .config
            .insert((section.to_string(), key.to_string()), value.to_string());
        info!("Host: [{}] {} = {}", section, key, value);
        Ok(())
    }

    fn profile_config_save(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(FrontendCall::ConfigSave);
        match state.save_failure {
            Some(code) => Err(ControllerError::ConfigSave(code)),
            None => Ok(()),
        }
    }

    fn add_event_callback(&self, handler: EventHandler) -> Subscription {
        let mut state = self.state.lock();
        let subscription = Subscription::new(state.next_subscription);
        state.next_subscription += 1;
        state.handlers.push((subscription, handler));
        state.calls.push(FrontendCall::AddEventCallback(subscription));
        subscription
    }

    fn remove_event_callback(&self, subscription: Subscription) {
        let mut state = self.state.lock();
        state.handlers.retain(|(s, _)| *s != subscription);
        state
            .calls
            .push(FrontendCall::RemoveEventCallback(subscription));
    }
}

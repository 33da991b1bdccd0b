// Integration tests for the recording controller
//
// These tests check the exact host calls the controller produces against the
// in-memory frontend.

use anyhow::Result;
use obs_controller::frontend::{FrontendCall, FILENAME_FORMATTING_KEY, OUTPUT_SECTION};
use obs_controller::{ControllerError, InMemoryFrontend, ObsController, RecordingSession};
use std::sync::Arc;

fn setup() -> (Arc<InMemoryFrontend>, ObsController) {
    let frontend = Arc::new(
        InMemoryFrontend::new().with_config_value(
            OUTPUT_SECTION,
            FILENAME_FORMATTING_KEY,
            "%CCYY-%MM-%DD %hh-%mm-%ss",
        ),
    );
    let controller = ObsController::new(frontend.clone());
    (frontend, controller)
}

#[test]
fn test_set_file_name_writes_key_then_saves_once() -> Result<()> {
    let (frontend, controller) = setup();

    controller.set_file_name("Game %hh-%mm")?;

    assert_eq!(
        frontend.calls(),
        vec![
            FrontendCall::ConfigSet {
                section: "Output".to_string(),
                key: "FilenameFormatting".to_string(),
                value: "Game %hh-%mm".to_string(),
            },
            FrontendCall::ConfigSave,
        ]
    );
    assert_eq!(
        frontend.config_value("Output", "FilenameFormatting").as_deref(),
        Some("Game %hh-%mm")
    );

    Ok(())
}

#[test]
fn test_set_file_name_passes_value_through_untouched() -> Result<()> {
    let (frontend, controller) = setup();

    // No validation or trimming at this layer
    controller.set_file_name("  ")?;
    assert_eq!(frontend.config_value("Output", "FilenameFormatting").as_deref(), Some("  "));

    controller.set_file_name("")?;
    assert_eq!(frontend.config_value("Output", "FilenameFormatting").as_deref(), Some(""));
    assert_eq!(frontend.count_calls(&FrontendCall::ConfigSave), 2);

    Ok(())
}

#[test]
fn test_set_file_name_surfaces_save_failure() {
    let (frontend, controller) = setup();
    frontend.fail_saves_with(-1);

    let err = controller.set_file_name("clip").unwrap_err();
    assert!(matches!(err, ControllerError::ConfigSave(-1)));
}

#[test]
fn test_start_and_stop_call_host_once_each() {
    let (frontend, controller) = setup();

    controller.start_recording();
    assert!(controller.is_recording());
    assert_eq!(frontend.calls(), vec![FrontendCall::RecordingStart]);

    controller.stop_recording();
    assert!(!controller.is_recording());
    assert_eq!(
        frontend.calls(),
        vec![FrontendCall::RecordingStart, FrontendCall::RecordingStop]
    );
}

#[test]
fn test_session_with_custom_name_restores_previous_format() -> Result<()> {
    let (frontend, controller) = setup();

    let session = RecordingSession::start_with_name(controller.clone(), "Highlight %hh-%mm")?;
    assert_eq!(session.custom_name(), Some("Highlight %hh-%mm"));
    assert_eq!(session.previous_name(), Some("%CCYY-%MM-%DD %hh-%mm-%ss"));
    assert!(controller.is_recording());
    assert_eq!(
        frontend.config_value("Output", "FilenameFormatting").as_deref(),
        Some("Highlight %hh-%mm")
    );

    session.stop(true)?;

    assert!(!controller.is_recording());
    assert_eq!(
        frontend.config_value("Output", "FilenameFormatting").as_deref(),
        Some("%CCYY-%MM-%DD %hh-%mm-%ss")
    );

    // The name is set before recording starts, restored after it stops
    let calls = frontend.calls();
    let start = calls.iter().position(|c| *c == FrontendCall::RecordingStart).unwrap();
    let stop = calls.iter().position(|c| *c == FrontendCall::RecordingStop).unwrap();
    assert!(matches!(calls[start - 1], FrontendCall::ConfigSave));
    assert!(matches!(calls[stop + 1], FrontendCall::ConfigSet { .. }));

    Ok(())
}

#[test]
fn test_session_keeps_custom_name_when_restore_disabled() -> Result<()> {
    let (frontend, controller) = setup();

    let session = RecordingSession::start_with_name(controller, "Keep me")?;
    session.stop(false)?;

    assert_eq!(
        frontend.config_value("Output", "FilenameFormatting").as_deref(),
        Some("Keep me")
    );
    assert_eq!(frontend.count_calls(&FrontendCall::ConfigSave), 1);

    Ok(())
}

#[test]
fn test_session_does_not_start_when_name_cannot_be_saved() {
    let (frontend, controller) = setup();
    frontend.fail_saves_with(3);

    let result = RecordingSession::start_with_name(controller.clone(), "clip");

    assert!(result.is_err());
    assert!(!controller.is_recording());
    assert_eq!(frontend.count_calls(&FrontendCall::RecordingStart), 0);
}

#[test]
fn test_plain_session_touches_no_config() -> Result<()> {
    let (frontend, controller) = setup();

    let session = RecordingSession::start(controller);
    assert!(session.custom_name().is_none());
    session.stop(true)?;

    assert_eq!(
        frontend.calls(),
        vec![FrontendCall::RecordingStart, FrontendCall::RecordingStop]
    );

    Ok(())
}

#[test]
fn test_finishing_ended_session_restores_without_stopping() -> Result<()> {
    let (frontend, controller) = setup();

    let session = RecordingSession::start_with_name(controller.clone(), "Clip")?;
    // The host stopped on its own
    controller.stop_recording();
    session.finish_ended(true)?;

    assert_eq!(frontend.count_calls(&FrontendCall::RecordingStop), 1);
    assert_eq!(
        frontend.config_value(OUTPUT_SECTION, FILENAME_FORMATTING_KEY).as_deref(),
        Some("%CCYY-%MM-%DD %hh-%mm-%ss")
    );

    Ok(())
}

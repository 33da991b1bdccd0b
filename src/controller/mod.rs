//! Recording control
//!
//! [`ObsController`] forwards recording and filename-format requests to the
//! host frontend. [`RecordingSession`] tracks a recording started through it,
//! including a custom filename format to roll back afterwards.

mod session;

pub use session::{RecordingSession, SessionInfo};

use crate::error::Result;
use crate::frontend::{Frontend, FILENAME_FORMATTING_KEY, OUTPUT_SECTION};
use std::sync::Arc;
use tracing::info;

/// Thin wrapper over the host frontend; owns no state of its own
#[derive(Clone)]
pub struct ObsController {
    frontend: Arc<dyn Frontend>,
}

impl ObsController {
    pub fn new(frontend: Arc<dyn Frontend>) -> Self {
        Self { frontend }
    }

    pub fn start_recording(&self) {
        info!("Starting recording");
        self.frontend.recording_start();
    }

    pub fn stop_recording(&self) {
        info!("Stopping recording");
        self.frontend.recording_stop();
    }

    /// Set the recording filename template and save the profile immediately.
    ///
    /// The template is passed through untouched; see the OBS documentation for
    /// the supported placeholders.
    pub fn set_file_name(&self, name: &str) -> Result<()> {
        info!("Setting filename format to {:?}", name);
        self.frontend
            .profile_config_set(OUTPUT_SECTION, FILENAME_FORMATTING_KEY, name)?;
        self.frontend.profile_config_save()
    }

    /// Current filename template, if the profile defines one
    pub fn file_name(&self) -> Result<Option<String>> {
        self.frontend
            .profile_config_get(OUTPUT_SECTION, FILENAME_FORMATTING_KEY)
    }

    pub fn is_recording(&self) -> bool {
        self.frontend.recording_active()
    }
}

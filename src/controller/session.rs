use super::ObsController;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// A recording started through the controller
pub struct RecordingSession {
    controller: ObsController,

    started_at: DateTime<Utc>,

    /// Filename format set for this recording
    custom_name: Option<String>,

    /// Format that was active before `custom_name` replaced it
    previous_name: Option<String>,
}

/// Serializable view of a session for status responses
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub started_at: DateTime<Utc>,
    pub custom_name: Option<String>,
}

impl RecordingSession {
    /// Start recording with the profile's current filename format
    pub fn start(controller: ObsController) -> Self {
        controller.start_recording();
        Self {
            controller,
            started_at: Utc::now(),
            custom_name: None,
            previous_name: None,
        }
    }

    /// Start recording under a custom filename format, remembering the old one.
    ///
    /// Nothing is started if the new format cannot be written.
    pub fn start_with_name(controller: ObsController, name: &str) -> Result<Self> {
        let previous_name = controller.file_name()?;
        controller.set_file_name(name)?;
        controller.start_recording();

        Ok(Self {
            controller,
            started_at: Utc::now(),
            custom_name: Some(name.to_string()),
            previous_name,
        })
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            started_at: self.started_at,
            custom_name: self.custom_name.clone(),
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn previous_name(&self) -> Option<&str> {
        self.previous_name.as_deref()
    }

    /// Stop recording, then put the previous filename format back if asked to.
    ///
    /// OBS reads the format when the output starts, so restoring it after the
    /// stop request does not rename the file just written.
    pub fn stop(self, restore_name: bool) -> Result<()> {
        self.controller.stop_recording();
        self.restore_name(restore_name)
    }

    /// Close a session whose recording the host already ended (UI, disk full, exit).
    ///
    /// Makes no recording call; only the filename format is restored.
    pub fn finish_ended(self, restore_name: bool) -> Result<()> {
        info!("Recording ended outside the API, closing session");
        self.restore_name(restore_name)
    }

    fn restore_name(&self, restore_name: bool) -> Result<()> {
        if !restore_name || self.custom_name.is_none() {
            return Ok(());
        }

        match &self.previous_name {
            Some(previous) => {
                info!("Restoring filename format to {:?}", previous);
                self.controller.set_file_name(previous)
            }
            None => {
                warn!("No previous filename format recorded, leaving custom format in place");
                Ok(())
            }
        }
    }
}

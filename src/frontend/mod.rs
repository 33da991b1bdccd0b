//! Host frontend abstraction
//!
//! Everything the plugin asks of OBS goes through the [`Frontend`] trait:
//! - recording start/stop and state
//! - profile configuration reads, writes and saves
//! - frontend event callback registration
//!
//! `ObsFrontend` (feature `obs`) binds the trait to libobs; [`InMemoryFrontend`]
//! stands in for the host in tests and in `obsc serve`.

mod memory;
#[cfg(feature = "obs")]
pub(crate) mod obs;

pub use memory::{FrontendCall, InMemoryFrontend};
#[cfg(feature = "obs")]
pub use obs::ObsFrontend;

use crate::error::Result;
use std::sync::Arc;

/// Profile config section holding output settings
pub const OUTPUT_SECTION: &str = "Output";

/// Profile config key holding the recording filename template
pub const FILENAME_FORMATTING_KEY: &str = "FilenameFormatting";

/// Frontend events dispatched by the host (`enum obs_frontend_event`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendEvent {
    StreamingStarting,
    StreamingStarted,
    StreamingStopping,
    StreamingStopped,
    RecordingStarting,
    RecordingStarted,
    RecordingStopping,
    RecordingStopped,
    SceneChanged,
    ProfileChanged,
    Exit,
    FinishedLoading,
    /// Any event this plugin does not care about
    Other(i32),
}

impl FrontendEvent {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::StreamingStarting,
            1 => Self::StreamingStarted,
            2 => Self::StreamingStopping,
            3 => Self::StreamingStopped,
            4 => Self::RecordingStarting,
            5 => Self::RecordingStarted,
            6 => Self::RecordingStopping,
            7 => Self::RecordingStopped,
            8 => Self::SceneChanged,
            15 => Self::ProfileChanged,
            17 => Self::Exit,
            26 => Self::FinishedLoading,
            other => Self::Other(other),
        }
    }
}

/// Handle identifying one registered event callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Callback invoked for every frontend event while registered
pub type EventHandler = Arc<dyn Fn(FrontendEvent) + Send + Sync>;

/// The host frontend API surface the plugin consumes
///
/// Implementations must allow a handler to remove its own subscription while
/// it is being dispatched.
pub trait Frontend: Send + Sync {
    fn recording_start(&self);

    fn recording_stop(&self);

    fn recording_active(&self) -> bool;

    /// Read a string from the active profile configuration
    fn profile_config_get(&self, section: &str, key: &str) -> Result<Option<String>>;

    /// Write a string into the active profile configuration (not persisted until saved)
    fn profile_config_set(&self, section: &str, key: &str, value: &str) -> Result<()>;

    /// Persist the active profile configuration
    fn profile_config_save(&self) -> Result<()>;

    fn add_event_callback(&self, handler: EventHandler) -> Subscription;

    fn remove_event_callback(&self, subscription: Subscription);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(FrontendEvent::from_raw(26), FrontendEvent::FinishedLoading);
        assert_eq!(FrontendEvent::from_raw(5), FrontendEvent::RecordingStarted);
        assert_eq!(FrontendEvent::from_raw(7), FrontendEvent::RecordingStopped);
        assert_eq!(FrontendEvent::from_raw(17), FrontendEvent::Exit);
    }

    #[test]
    fn test_unknown_event_kept_raw() {
        assert_eq!(FrontendEvent::from_raw(12), FrontendEvent::Other(12));
        assert_eq!(FrontendEvent::from_raw(-1), FrontendEvent::Other(-1));
    }
}

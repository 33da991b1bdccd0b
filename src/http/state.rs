use crate::apps::AppRegistry;
use crate::config::Config;
use crate::controller::{ObsController, RecordingSession};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: ObsController,

    /// Apps allowed to call authenticated routes
    pub registry: Arc<AppRegistry>,

    /// Recording started through the API, if any
    pub session: Arc<Mutex<Option<RecordingSession>>>,

    pub require_auth: bool,

    /// Restore the previous filename format when a custom-name session stops
    pub restore_file_name: bool,
}

impl AppState {
    pub fn new(controller: ObsController, registry: AppRegistry, config: &Config) -> Self {
        Self {
            controller,
            registry: Arc::new(registry),
            session: Arc::new(Mutex::new(None)),
            require_auth: config.server.require_auth,
            restore_file_name: config.recording.restore_file_name,
        }
    }
}

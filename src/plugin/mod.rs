//! Module lifecycle
//!
//! [`Plugin::load`] runs when OBS loads the module: it registers a
//! [`LoadHook`] that, once the frontend has finished loading, starts the
//! control API. [`Plugin::unload`] undoes whatever load set up.
//! The C exports OBS looks for live in `exports` (feature `obs`).

pub mod abi;
#[cfg(feature = "obs")]
mod exports;
mod hook;
#[cfg(feature = "obs")]
mod log;

pub use hook::LoadHook;

use crate::apps::AppRegistry;
use crate::config::Config;
use crate::controller::ObsController;
use crate::frontend::Frontend;
use crate::http::{AppState, ControlServer};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

pub const LOG_PREFIX: &str = "[obs-controller]";

/// State owned by a loaded module instance
pub struct Plugin {
    hook: Arc<LoadHook>,
    server: Arc<Mutex<Option<ControlServer>>>,
}

impl Plugin {
    pub fn load(frontend: Arc<dyn Frontend>, config: Config) -> Self {
        info!("Load started");

        let server = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&server);
        let controller = ObsController::new(Arc::clone(&frontend));

        let hook = LoadHook::register(frontend, move || {
            if !config.server.enabled {
                info!("Control API disabled");
                return;
            }

            let state = AppState::new(
                controller,
                AppRegistry::new(&config.apps.registry_path),
                &config,
            );
            match ControlServer::spawn(&config.server, state) {
                Ok(started) => *slot.lock() = Some(started),
                Err(e) => error!("Failed to start control API: {:#}", e),
            }
        });

        info!("Load finished");

        Self { hook, server }
    }

    /// Address of the control API, once it is running
    pub fn server_addr(&self) -> Option<SocketAddr> {
        self.server.lock().as_ref().map(ControlServer::local_addr)
    }

    pub fn hook(&self) -> &LoadHook {
        &self.hook
    }

    pub fn unload(self) {
        self.hook.disarm();

        if let Some(server) = self.server.lock().take() {
            server.shutdown();
        }

        info!("Unloaded");
    }
}

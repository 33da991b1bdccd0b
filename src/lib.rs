pub mod apps;
pub mod config;
pub mod controller;
pub mod error;
#[cfg(feature = "obs")]
mod ffi;
pub mod frontend;
pub mod http;
pub mod plugin;

pub use apps::{AppMetadata, AppRegistry, RegisteredApp};
pub use config::Config;
pub use controller::{ObsController, RecordingSession};
pub use error::{ControllerError, Result};
pub use frontend::{EventHandler, Frontend, FrontendEvent, InMemoryFrontend, Subscription};
pub use http::{create_router, AppState, ControlServer};
pub use plugin::{LoadHook, Plugin};

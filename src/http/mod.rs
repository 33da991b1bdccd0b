//! HTTP control API
//!
//! Lets registered apps drive recording over localhost:
//! - GET /health - Health check (unauthenticated)
//! - GET /recording - Recording state and filename format
//! - POST /recording/start - Start recording, optionally under a custom filename format
//! - POST /recording/stop - Stop recording
//! - PUT /recording/filename - Set the filename format
//!
//! Every route except `/health` requires `X-OBSC-App` and `X-OBSC-Signature`
//! headers (see [`auth`]).

pub mod auth;
mod handlers;
mod routes;
mod server;
mod state;

pub use handlers::{ErrorResponse, FileNameRequest, RecordingStatus, StartRecordingRequest};
pub use routes::create_router;
pub use server::ControlServer;
pub use state::AppState;

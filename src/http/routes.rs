use super::auth;
use super::handlers;
use super::state::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    // Recording control, signed requests only
    let recording = Router::new()
        .route("/recording", get(handlers::recording_status))
        .route("/recording/start", post(handlers::start_recording))
        .route("/recording/stop", post(handlers::stop_recording))
        .route("/recording/filename", put(handlers::set_file_name))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_signature,
        ));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .merge(recording)
        // Add tracing middleware for request logging
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

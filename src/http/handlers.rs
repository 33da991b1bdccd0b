use super::state::AppState;
use crate::controller::{RecordingSession, SessionInfo};
use crate::error::ControllerError;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StartRecordingRequest {
    /// Optional filename format for this recording only
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileNameRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RecordingStatus {
    /// Whether the host is recording, regardless of who started it
    pub recording: bool,
    pub file_name_format: Option<String>,
    pub session: Option<SessionInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

fn controller_error(context: &str, e: ControllerError) -> Response {
    error!("{}: {}", context, e);
    let status = match e {
        ControllerError::InvalidString(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, format!("{}: {}", context, e))
}

/// Parse a JSON body; an empty body yields the default value
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    })
}

/// Drop the API session if the host stopped recording behind its back
fn reconcile_session(state: &AppState, session: &mut Option<RecordingSession>) {
    if session.is_none() || state.controller.is_recording() {
        return;
    }

    if let Some(ended) = session.take() {
        if let Err(e) = ended.finish_ended(state.restore_file_name) {
            warn!("Failed to restore filename format after recording ended: {}", e);
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /recording
pub async fn recording_status(State(state): State<AppState>) -> Response {
    let mut session = state.session.lock().await;
    reconcile_session(&state, &mut session);

    let file_name_format = match state.controller.file_name() {
        Ok(name) => name,
        Err(e) => return controller_error("Failed to read filename format", e),
    };

    (
        StatusCode::OK,
        Json(RecordingStatus {
            recording: state.controller.is_recording(),
            file_name_format,
            session: session.as_ref().map(RecordingSession::info),
        }),
    )
        .into_response()
}

/// POST /recording/start
/// Body (optional): `{"name": "<filename format>"}`
pub async fn start_recording(State(state): State<AppState>, body: Bytes) -> Response {
    let req: StartRecordingRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let mut session = state.session.lock().await;
    reconcile_session(&state, &mut session);

    if session.is_some() {
        return error_response(
            StatusCode::CONFLICT,
            "A recording started through the API is already running".to_string(),
        );
    }
    // Checked before the filename format is touched
    if state.controller.is_recording() {
        return error_response(StatusCode::CONFLICT, "OBS is already recording".to_string());
    }

    let started = match &req.name {
        Some(name) => match RecordingSession::start_with_name(state.controller.clone(), name) {
            Ok(started) => started,
            Err(e) => return controller_error("Failed to set filename format", e),
        },
        None => RecordingSession::start(state.controller.clone()),
    };

    let message = match started.custom_name() {
        Some(name) => format!("Recording started with filename format {:?}", name),
        None => "Recording started".to_string(),
    };
    *session = Some(started);

    info!("{}", message);

    (
        StatusCode::OK,
        Json(RecordingResponse {
            status: "recording".to_string(),
            message,
        }),
    )
        .into_response()
}

/// POST /recording/stop
pub async fn stop_recording(State(state): State<AppState>) -> Response {
    // Held until the stop completes so a concurrent start cannot interleave
    let mut session = state.session.lock().await;
    reconcile_session(&state, &mut session);

    match session.take() {
        Some(running) => {
            if let Err(e) = running.stop(state.restore_file_name) {
                return controller_error("Recording stopped, but restoring the filename format failed", e);
            }
        }
        None if state.controller.is_recording() => {
            // Started from the OBS UI or another plugin
            state.controller.stop_recording();
        }
        None => {
            return error_response(StatusCode::CONFLICT, "Not recording".to_string());
        }
    }

    (
        StatusCode::OK,
        Json(RecordingResponse {
            status: "stopped".to_string(),
            message: "Recording stopped".to_string(),
        }),
    )
        .into_response()
}

/// PUT /recording/filename
/// Body: `{"name": "<filename format>"}`
pub async fn set_file_name(State(state): State<AppState>, body: Bytes) -> Response {
    let req: FileNameRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
        }
    };

    if let Err(e) = state.controller.set_file_name(&req.name) {
        return controller_error("Failed to set filename format", e);
    }

    (
        StatusCode::OK,
        Json(RecordingResponse {
            status: "updated".to_string(),
            message: format!("Filename format set to {:?}", req.name),
        }),
    )
        .into_response()
}

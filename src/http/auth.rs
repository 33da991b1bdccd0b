//! Request authentication
//!
//! A request is accepted when `X-OBSC-App` names a registered app and
//! `X-OBSC-Signature` holds that app's base64 ed25519 signature over the
//! SHA-256 of the body (or of `obs-controller` when the body is empty).

use super::handlers::ErrorResponse;
use super::state::AppState;
use crate::apps::{AppMetadata, AppRegistry, SIGNATURE_LENGTH};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use base64::Engine;
use http_body_util::LengthLimitError;
use thiserror::Error;
use tracing::{debug, error, warn};
use uuid::Uuid;

pub const APP_HEADER: &str = "x-obsc-app";
pub const SIGNATURE_HEADER: &str = "x-obsc-signature";

/// Largest body an authenticated request may carry
pub const MAX_BODY_SIZE: usize = 1024;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing X-OBSC-App or X-OBSC-Signature")]
    MissingHeaders,

    #[error("Invalid UUID in X-OBSC-App")]
    InvalidAppId,

    #[error("Invalid Base64 in X-OBSC-Signature")]
    InvalidSignatureEncoding,

    #[error("Signature must be {} bytes in length", SIGNATURE_LENGTH)]
    InvalidSignatureLength,

    #[error("Unknown app")]
    UnknownApp,

    #[error("Not authenticated")]
    BadSignature,

    #[error("Body exceeds {} bytes", MAX_BODY_SIZE)]
    BodyTooLarge,

    #[error("Could not read request body")]
    BodyUnreadable,

    #[error("App registry unavailable")]
    Registry(#[from] crate::error::ControllerError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::BadSignature => StatusCode::UNAUTHORIZED,
            AuthError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AuthError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Whether a body read failed because it hit the size cap
fn is_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// Resolve the calling app from request headers and check its signature over `body`
pub fn verify_request(
    registry: &AppRegistry,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<AppMetadata, AuthError> {
    let app = headers.get(APP_HEADER).map(|value| {
        value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
    });
    let signature = headers.get(SIGNATURE_HEADER).map(|value| {
        value.to_str().ok().and_then(|s| {
            base64::engine::general_purpose::STANDARD
                .decode(s.trim())
                .ok()
        })
    });

    let (app, signature) = match (app, signature) {
        (Some(None), _) => return Err(AuthError::InvalidAppId),
        (_, Some(None)) => return Err(AuthError::InvalidSignatureEncoding),
        (Some(Some(app)), Some(Some(signature))) => (app, signature),
        _ => return Err(AuthError::MissingHeaders),
    };

    let signature: [u8; SIGNATURE_LENGTH] = signature
        .as_slice()
        .try_into()
        .map_err(|_| AuthError::InvalidSignatureLength)?;

    let metadata = registry.find(app)?.ok_or(AuthError::UnknownApp)?;

    if metadata.verify(body, &signature) {
        Ok(metadata)
    } else {
        Err(AuthError::BadSignature)
    }
}

/// Middleware guarding every authenticated route
///
/// Buffers the body (up to [`MAX_BODY_SIZE`]), verifies it and hands the
/// request on with the same body and the caller's [`AppMetadata`] attached.
pub async fn require_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.require_auth {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => return AuthError::BodyTooLarge.into_response(),
        Err(e) => {
            warn!("Failed to read body of {} {}: {}", parts.method, parts.uri, e);
            return AuthError::BodyUnreadable.into_response();
        }
    };

    match verify_request(&state.registry, &parts.headers, &bytes) {
        Ok(app) => {
            debug!("Authenticated {} {} for app {}", parts.method, parts.uri, app.name);
            let mut request = Request::from_parts(parts, Body::from(bytes));
            request.extensions_mut().insert(app);
            next.run(request).await
        }
        Err(AuthError::Registry(e)) => {
            error!("Failed to read app registry: {}", e);
            AuthError::Registry(e).into_response()
        }
        Err(e) => {
            warn!("Rejected {} {}: {}", parts.method, parts.uri, e);
            e.into_response()
        }
    }
}

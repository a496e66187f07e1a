//! Endpoint error mapping.
//!
//! Every internal error is caught at this boundary and mapped to exactly
//! one of the client-visible categories. Verification failures collapse to
//! a single uniform `401` so response content never reveals whether a
//! token was malformed, tampered with, or expired.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Client-visible error categories for the session endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid element of the request itself. The message names
    /// the element but never echoes client-supplied data.
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// No session cookie was presented.
    #[error("missing session")]
    MissingSession,

    /// A cookie was presented but did not verify. Deliberately uniform.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Server-side configuration problem; details stay out of the response.
    #[error("internal error")]
    Internal,
}

impl From<smartslate_auth::Error> for ApiError {
    fn from(err: smartslate_auth::Error) -> Self {
        if err.is_credential_failure() {
            tracing::warn!(reason = %err, "session token rejected");
            ApiError::Unauthenticated
        } else {
            tracing::error!(reason = %err, "session service misconfigured");
            ApiError::Internal
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::MissingSession => (StatusCode::UNAUTHORIZED, "missing session"),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

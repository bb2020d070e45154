//! Mapping of core and auth failures onto JSON error responses.

use api_shared::{AuthError, ErrorRes};
use axum::http::StatusCode;
use axum::Json;
use oncora_core::CaseError;

pub type ApiError = (StatusCode, Json<ErrorRes>);

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const NOT_FOUND: &str = "API endpoint not found";

pub fn json_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorRes::new(message)))
}

/// Validation failures surface their message; anything else is logged and hidden.
pub fn case_error(err: CaseError) -> ApiError {
    match err {
        CaseError::Validation(message) => json_error(StatusCode::BAD_REQUEST, message),
        other => {
            tracing::error!("request failed: {}", other);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

pub fn auth_error(err: AuthError) -> ApiError {
    let status = match err {
        AuthError::MissingToken => StatusCode::UNAUTHORIZED,
        AuthError::InvalidToken => StatusCode::FORBIDDEN,
    };
    tracing::warn!("rejected request: {}", err);
    json_error(status, err.to_string())
}

//! HTTP mapping for gateway failures.
//!
//! Two classes reach a client: requests that never parsed (400 with a
//! parameter code) and verification outcomes (status by rejection kind,
//! auth-family code in the envelope). Infrastructure failures are
//! logged server-side with full detail and surface as a bare 500; the
//! envelope never carries backend specifics.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::auth::AuthError;

use super::types::message::MessageParseError;
use super::types::{ApiResponse, error_codes};

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Request rejected before verification ran.
    BadRequest(String),
    /// Verification ran and rejected, or could not finish.
    Auth(AuthError),
}

impl From<MessageParseError> for ApiError {
    fn from(err: MessageParseError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl ApiError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::MessageAlreadyUsed) => StatusCode::CONFLICT,
            Self::Auth(AuthError::Infrastructure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = match self {
            Self::BadRequest(msg) => ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, msg),
            Self::Auth(err @ AuthError::Infrastructure(_)) => {
                error!(code = err.code(), name = err.name(), detail = %err, "authentication infrastructure failure");
                ApiResponse::<()>::error(err.code(), "Internal server error")
            }
            Self::Auth(err) => ApiResponse::<()>::error(err.code(), err.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

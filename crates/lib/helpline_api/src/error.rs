//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use helpline_core::chat_log::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Provider failures never reach this type; they are folded into the reply.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Chat log store failure: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details are logged, never returned to the caller.
        error!(error = %self, "request failed");
        let body = Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

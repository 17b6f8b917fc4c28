//! Unified handler error type.
//!
//! Handlers return `Result<T, ApiError>`; the `IntoResponse` impl turns each
//! variant into the fixed JSON body clients expect. Internal detail is logged
//! and never sent to the caller.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use chat_types::api::{ErrorBody, FailureBody, EMPTY_MESSAGE_ERROR, INTERNAL_ERROR_MESSAGE};
use chat_types::ChatError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, blank, or undecodable message.
    #[error("empty message")]
    EmptyMessage,

    /// Anything unexpected while processing the request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: EMPTY_MESSAGE_ERROR.to_owned(),
                }),
            )
                .into_response(),
            ApiError::Internal(m) => {
                error!(message = %m, "error processing message");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FailureBody {
                        message: INTERNAL_ERROR_MESSAGE.to_owned(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::EmptyMessage => ApiError::EmptyMessage,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Response for a handler that panicked, installed via `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_owned()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

//! Error mapping from handler failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures a handler can surface to the client.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match &self {
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::BadRequest(_) | HandlerError::Json(_) => StatusCode::BAD_REQUEST,
            HandlerError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            HandlerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "handler failure");
        }
        (status, self.to_string()).into_response()
    }
}

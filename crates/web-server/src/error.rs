// In crates/web-server/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use engine::CycleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to bind the server address: {0}")]
    ServerBindError(#[source] std::io::Error),

    #[error("Server terminated: {0}")]
    ServeError(#[source] std::io::Error),

    #[error("A cycle is already running")]
    CycleInProgress,

    #[error(transparent)]
    Cycle(#[from] CycleError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::CycleInProgress => StatusCode::CONFLICT,
            Error::Cycle(CycleError::ConfigurationMissing(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Cycle(CycleError::Persistence(_))
            | Error::ServerBindError(_)
            | Error::ServeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(%status, error = %self, "Request failed.");

        let body = serde_json::json!({ "status": "error", "message": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

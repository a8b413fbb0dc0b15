//! Error types for the user cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Upstream Error Enum ==
/// Failure to obtain any response from the upstream API.
///
/// A response with a non-success status is not an error at this level.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, timeout, or body read failure
    #[error("Upstream transport failure: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed
    #[error("Upstream client setup failed: {0}")]
    Client(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

// == Service Error Enum ==
/// Error returned by a user operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Record absent upstream, malformed upstream payload, or missing id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success upstream status relayed as is
    #[error("Upstream returned {0}")]
    UpstreamStatus(StatusCode),

    /// Transport failure or unusable upstream response
    #[error("Internal error: {0}")]
    Internal(String),

    /// Transport failure on delete, reported with its detail
    #[error("{0}")]
    BadRequest(String),
}

impl ServiceError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UpstreamStatus(status) => *status,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ServiceError::UpstreamStatus(_) => status.into_response(),
            ServiceError::BadRequest(detail) => {
                (status, Json(ErrorResponse::new(detail))).into_response()
            }
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for user operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

//! HTTP error mapping
//!
//! Client-caused API errors become 400, store invariant violations 500.
//! The body is always `{status: "error", code, message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::{ApiError, ErrorResponse};

/// HTTP layer errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Error raised by the API layer
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Request the transport itself refuses
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl HttpError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::Api(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            HttpError::Api(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            HttpError::Api(err) => ErrorResponse::from_error(err),
            HttpError::BadRequest(reason) => ErrorResponse::from_error(&ApiError::validation(reason.as_str())),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

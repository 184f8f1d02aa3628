//! Error types for the snow API.
//!
//! [`ApiError`] unifies all request failure modes and converts into an
//! Axum response via its [`IntoResponse`] implementation. The body is
//! the error message as plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snowdepth_frost::FrostError;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A query parameter was missing or invalid.
    #[error("{0}")]
    ClientInput(String),

    /// A local resource (the index page) could not be read.
    #[error("{0}")]
    ResourceNotFound(String),

    /// The Frost API call failed.
    #[error(transparent)]
    Upstream(#[from] FrostError),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ClientInput(_) => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

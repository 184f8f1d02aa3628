//! Error types for the Frost client.
//!
//! Every retrieval operation returns [`FrostError`]. Upstream HTTP
//! failures are classified by status code into [`UpstreamErrorKind`]
//! so callers can tell a bad query apart from a bad credential.

use std::fmt;

/// Classification of a non-success status returned by the Frost API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// HTTP 500.
    InternalError,
    /// Any other non-success status, carrying the raw code.
    Unclassified(u16),
}

impl UpstreamErrorKind {
    /// Map an HTTP status code to its error kind.
    ///
    /// Returns `None` for success codes.
    pub const fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            404 => Some(Self::NotFound),
            500 => Some(Self::InternalError),
            other => Some(Self::Unclassified(other)),
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => f.write_str("Invalid parameter value or malformed request."),
            Self::Unauthorized => f.write_str("Unauthorized client ID."),
            Self::NotFound => f.write_str("No data was found for the list of query Ids."),
            Self::InternalError => f.write_str("Internal server error."),
            Self::Unclassified(status) => write!(f, "Unexpected upstream status {status}."),
        }
    }
}

/// Errors that can occur while talking to the Frost API.
#[derive(Debug, thiserror::Error)]
pub enum FrostError {
    /// The client is missing required configuration (e.g. no client id).
    #[error("{0}")]
    Configuration(String),

    /// The upstream API answered with a non-success status.
    #[error("{kind}")]
    Upstream {
        /// Which status class was returned.
        kind: UpstreamErrorKind,
    },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid Frost response envelope.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FrostError {
    /// The upstream error kind, if this error came from a status code.
    pub const fn upstream_kind(&self) -> Option<UpstreamErrorKind> {
        match self {
            Self::Upstream { kind } => Some(*kind),
            _ => None,
        }
    }
}

//! Client for the MET Norway Frost observation API.
//!
//! The crate is a thin, typed layer over three steps:
//!
//! - **Query building**: a [`Filter`] becomes URL query parameters
//! - **Transport**: one authenticated GET, status codes classified into
//!   [`UpstreamErrorKind`]
//! - **Decoding**: the JSON-LD [`ResponseEnvelope`] is parsed and its
//!   [`DataEnvelope`] records returned
//!
//! [`FrostClient`] composes the three into `sources`, `observations`
//! and `secure_hello`. No retries, caching or paging loops are done.

pub mod client;
pub mod error;
pub mod filter;
pub mod model;

// Re-export primary types for convenience.
pub use client::{DEFAULT_BASE_URL, FrostClient, FrostConfig};
pub use error::{FrostError, UpstreamErrorKind};
pub use filter::{Filter, build_url};
pub use model::{
    CfConvention, DataEnvelope, Geometry, JsonDisplay, LegacyMetNoConvention, Level, Observation,
    ResponseEnvelope, decode_response,
};
pub use reqwest::Url;

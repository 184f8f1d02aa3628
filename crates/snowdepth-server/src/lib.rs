//! Snow-depth HTTP API.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /snow?year=YYYY`**: the year's snow-thickness observations
//!   for one station, fetched from the Frost API and reduced to
//!   `{"Thickness", "Date"}` pairs
//! - **`GET /`**: a static HTML page read from disk
//!
//! Each inbound request makes at most one upstream call. The only
//! shared state is the read-only [`AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod snow;
pub mod state;

// Re-export primary types for convenience.
pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use snow::{SnowDepth, SnowSettings};
pub use state::AppState;

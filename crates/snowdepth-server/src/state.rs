//! Shared application state for the snow API.
//!
//! Everything in [`AppState`] is read-only after startup, so handlers
//! share it through an `Arc` without locking.

use std::path::PathBuf;

use snowdepth_frost::FrostClient;

use crate::snow::SnowSettings;

/// State shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Frost API client.
    pub frost: FrostClient,
    /// Station and element queried by `/snow`.
    pub snow: SnowSettings,
    /// HTML file served at `/`, read on every request.
    pub index_path: PathBuf,
}

impl AppState {
    /// Create the shared state.
    pub const fn new(frost: FrostClient, snow: SnowSettings, index_path: PathBuf) -> Self {
        Self {
            frost,
            snow,
            index_path,
        }
    }
}

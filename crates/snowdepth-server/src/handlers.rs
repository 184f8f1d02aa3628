//! Request handlers for the snow API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Static HTML page |
//! | `GET` | `/snow?year=YYYY` | Snow-depth series for one year |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::snow::{SnowDepth, snow_filter, to_snow_depths};
use crate::state::AppState;

/// Query parameters for the `GET /snow` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct SnowQuery {
    /// Calendar year, e.g. `2020`.
    pub year: Option<String>,
}

/// Serve the static page from disk.
///
/// The file is read on every request, so edits show up without a
/// restart.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<Vec<u8>>, ApiError> {
    match tokio::fs::read(&state.index_path).await {
        Ok(body) => Ok(Html(body)),
        Err(e) => {
            warn!(path = %state.index_path.display(), error = %e, "Could not read index page");
            Err(ApiError::ResourceNotFound("not found".to_owned()))
        }
    }
}

/// Return the snow-depth series for the requested year.
///
/// # Query Parameters
///
/// - `year`: required, a calendar year.
pub async fn snow(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SnowQuery>,
) -> Result<Json<Vec<SnowDepth>>, ApiError> {
    let year = parse_year(params.year.as_deref())?;
    let filter = snow_filter(&state.snow, year);

    let data = state.frost.observations(&filter).await.inspect_err(|e| {
        warn!(year, error = %e, "Frost observation query failed");
    })?;

    let depths = to_snow_depths(&data);
    info!(
        year,
        station = state.snow.station,
        points = depths.len(),
        "Snow depths served"
    );

    Ok(Json(depths))
}

/// Parse the `year` parameter.
fn parse_year(raw: Option<&str>) -> Result<i32, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::ClientInput("no year specified".to_owned()))?;

    raw.parse::<i32>()
        .ok()
        .filter(|year| (1..=9999).contains(year))
        .ok_or_else(|| ApiError::ClientInput(format!("invalid year: {raw}")))
}

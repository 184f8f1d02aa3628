//! Axum router construction for the snow API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- static HTML page
/// - `GET /snow?year=YYYY` -- snow-depth series for one year
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/snow", get(handlers::snow))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

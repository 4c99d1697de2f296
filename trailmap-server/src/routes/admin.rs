//! Admin endpoints: liveness and store statistics.

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe.
///
/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Body of `GET /api/stats`.
#[derive(Serialize)]
pub struct StatsResponse {
    pub uptime_secs: u64,
    /// "memory" or "file".
    pub storage_type: &'static str,
    pub parks: usize,
    pub trails: usize,
    pub pois: usize,
    pub version: &'static str,
}

/// Uptime, storage mode and per-entity counts.
///
/// `GET /api/stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let counts = state.store.counts().await;
    Json(StatsResponse {
        uptime_secs: state.uptime_secs(),
        storage_type: state.config.storage_type_str(),
        parks: counts.parks,
        trails: counts.trails,
        pois: counts.pois,
        version: env!("CARGO_PKG_VERSION"),
    })
}

//! Route table and middleware assembly.

mod admin;
mod params;
mod parks;
mod pois;
mod trails;

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Assemble the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(admin::health))
        // Admin endpoints (read-only)
        .route("/api/stats", get(admin::stats))
        // Parks
        .route("/api/parks", get(parks::list).post(parks::create))
        .route("/api/parks/geojson", get(parks::geojson_dump))
        .route(
            "/api/parks/:id",
            get(parks::fetch).put(parks::update).delete(parks::remove),
        )
        .route("/api/parks/:id/trails", get(parks::trails))
        .route("/api/parks/:id/pois", get(parks::pois))
        // Trails (static segments before :id)
        .route("/api/trails", get(trails::list).post(trails::create))
        .route("/api/trails/nearest", get(trails::nearest))
        .route("/api/trails/within-radius", get(trails::within_radius))
        .route("/api/trails/in-polygon", get(trails::in_polygon))
        .route("/api/trails/search", get(trails::search))
        .route("/api/trails/geojson", get(trails::geojson_dump))
        .route(
            "/api/trails/:id",
            get(trails::fetch).put(trails::update).delete(trails::remove),
        )
        // POIs
        .route("/api/pois", get(pois::list).post(pois::create))
        .route("/api/pois/geojson", get(pois::geojson_dump))
        .route(
            "/api/pois/:id",
            get(pois::fetch).put(pois::update).delete(pois::remove),
        );

    let router = router.with_state(state.clone());

    let mut router = router
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.body_limit));

    if state.config.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

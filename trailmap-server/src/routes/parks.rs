//! Park endpoints: CRUD, park-scoped listings and GeoJSON dump.

use crate::error::Result;
use crate::routes::params::ListParams;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use geojson::{Feature, FeatureCollection};
use serde_json::json;
use std::sync::Arc;
use trailmap_api::{format, ParkInput};

/// List parks as a FeatureCollection.
///
/// `GET /api/parks?in_bbox=minLng,minLat,maxLng,maxLat`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<FeatureCollection>> {
    let bbox = params.bbox()?;
    let parks = state.store.list_parks(bbox.as_ref()).await?;
    let features = parks.iter().map(format::park_feature).collect();
    Ok(Json(format::feature_collection(features)))
}

/// Create a park.
///
/// `POST /api/parks`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ParkInput>,
) -> Result<(StatusCode, Json<Feature>)> {
    let park = state.store.create_park(input).await?;
    Ok((StatusCode::CREATED, Json(format::park_feature(&park))))
}

/// Fetch a park by id.
///
/// `GET /api/parks/:id`
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Feature>> {
    let park = state.store.get_park(id).await?;
    Ok(Json(format::park_feature(&park)))
}

/// Replace a park.
///
/// `PUT /api/parks/:id`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(input): Json<ParkInput>,
) -> Result<Json<Feature>> {
    let park = state.store.update_park(id, input).await?;
    Ok(Json(format::park_feature(&park)))
}

/// Delete a park, cascading to its trails and POIs.
///
/// `DELETE /api/parks/:id`
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>> {
    let cascade = state.store.delete_park(id).await?;
    Ok(Json(json!({
        "deleted": id,
        "trails_deleted": cascade.trails_deleted,
        "pois_deleted": cascade.pois_deleted,
    })))
}

/// A park's trails, each carrying a `full_label` property.
///
/// `GET /api/parks/:id/trails`
pub async fn trails(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>> {
    let (park, trails) = state.store.trails_in_park(id).await?;
    let features: Vec<Feature> = trails
        .iter()
        .map(|trail| format::trail_feature(trail, Some(&park)))
        .collect();
    Ok(Json(json!({
        "park": format::park_feature(&park),
        "trails": features,
        "count": features.len(),
    })))
}

/// A park's POIs.
///
/// `GET /api/parks/:id/pois`
pub async fn pois(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>> {
    let (park, pois) = state.store.pois_in_park(id).await?;
    let features: Vec<Feature> = pois.iter().map(format::poi_feature).collect();
    Ok(Json(json!({
        "park": format::park_feature(&park),
        "pois": features,
        "count": features.len(),
    })))
}

/// Full GeoJSON dump of all parks.
///
/// `GET /api/parks/geojson`
pub async fn geojson_dump(State(state): State<Arc<AppState>>) -> Result<Json<FeatureCollection>> {
    let parks = state.store.list_parks(None).await?;
    let features = parks.iter().map(format::park_feature).collect();
    Ok(Json(format::feature_collection(features)))
}

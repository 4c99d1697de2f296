//! Trail endpoints: CRUD, spatial queries, search and GeoJSON dump.

use crate::error::{Result, ServerError};
use crate::routes::params::ListParams;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use geojson::{Feature, FeatureCollection};
use serde::Deserialize;
use std::sync::Arc;
use trailmap_api::{
    format, TrailInput, DEFAULT_NEAREST_LIMIT, DEFAULT_NEAREST_RADIUS_KM, DEFAULT_WITHIN_RADIUS_KM,
};

/// List trails as a FeatureCollection.
///
/// `GET /api/trails?in_bbox=minLng,minLat,maxLng,maxLat`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<FeatureCollection>> {
    let bbox = params.bbox()?;
    let trails = state.store.list_trails(bbox.as_ref()).await?;
    let features = trails
        .iter()
        .map(|trail| format::trail_feature(trail, None))
        .collect();
    Ok(Json(format::feature_collection(features)))
}

/// Create a trail.
///
/// `POST /api/trails`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TrailInput>,
) -> Result<(StatusCode, Json<Feature>)> {
    let trail = state.store.create_trail(input).await?;
    Ok((StatusCode::CREATED, Json(format::trail_feature(&trail, None))))
}

/// Fetch a trail by id.
///
/// `GET /api/trails/:id`
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Feature>> {
    let trail = state.store.get_trail(id).await?;
    Ok(Json(format::trail_feature(&trail, None)))
}

/// Replace a trail.
///
/// `PUT /api/trails/:id`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(input): Json<TrailInput>,
) -> Result<Json<Feature>> {
    let trail = state.store.update_trail(id, input).await?;
    Ok(Json(format::trail_feature(&trail, None)))
}

/// Delete a trail.
///
/// `DELETE /api/trails/:id`
pub async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Result<StatusCode> {
    state.store.delete_trail(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters for `GET /api/trails/nearest`.
#[derive(Debug, Deserialize)]
pub struct NearestParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Search radius in kilometers.
    pub radius: Option<f64>,
    pub limit: Option<usize>,
}

/// Nearest trails to a point, closest first, as a feature array.
///
/// `GET /api/trails/nearest?lat=..&lng=..&radius=50&limit=10`
///
/// `lat` and `lng` are required; there is no default search center.
pub async fn nearest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestParams>,
) -> Result<Json<Vec<Feature>>> {
    let (lat, lng) = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(ServerError::bad_request("lat and lng are required")),
    };
    let radius_km = params.radius.unwrap_or(DEFAULT_NEAREST_RADIUS_KM);
    let limit = params.limit.unwrap_or(DEFAULT_NEAREST_LIMIT);

    let hits = state.store.nearest_trails(lat, lng, radius_km, limit).await?;
    Ok(Json(hits.iter().map(format::trail_hit_feature).collect()))
}

/// Query parameters for `GET /api/trails/within-radius`.
#[derive(Debug, Deserialize)]
pub struct WithinRadiusParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Search radius in kilometers.
    pub radius_km: Option<f64>,
}

/// All trails within a radius, as a FeatureCollection with a query echo.
///
/// `GET /api/trails/within-radius?lat=..&lng=..&radius_km=10`
pub async fn within_radius(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WithinRadiusParams>,
) -> Result<Json<FeatureCollection>> {
    let (lat, lng) = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(ServerError::bad_request("lat and lng are required")),
    };
    let radius_km = params.radius_km.unwrap_or(DEFAULT_WITHIN_RADIUS_KM);

    let hits = state.store.trails_within_radius(lat, lng, radius_km).await?;
    Ok(Json(format::radius_collection(&hits, lat, lng, radius_km)))
}

/// Query parameters for `GET /api/trails/in-polygon`.
#[derive(Debug, Deserialize)]
pub struct InPolygonParams {
    /// Polygon as WKT.
    pub polygon: Option<String>,
}

/// Trails intersecting a WKT polygon, as a feature array.
///
/// `GET /api/trails/in-polygon?polygon=POLYGON((...))`
pub async fn in_polygon(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InPolygonParams>,
) -> Result<Json<Vec<Feature>>> {
    let polygon = params
        .polygon
        .as_deref()
        .ok_or_else(|| ServerError::bad_request("polygon is required"))?;

    let trails = state.store.trails_in_polygon(polygon).await?;
    let features = trails
        .iter()
        .map(|trail| format::trail_feature(trail, None))
        .collect();
    Ok(Json(features))
}

/// Query parameters for `GET /api/trails/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Case-insensitive substring search over trail name and difficulty.
///
/// `GET /api/trails/search?q=expert`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FeatureCollection>> {
    let q = params.q.as_deref().unwrap_or("");
    let trails = state.store.search_trails(q).await?;
    let features = trails
        .iter()
        .map(|trail| format::trail_feature(trail, None))
        .collect();
    Ok(Json(format::feature_collection(features)))
}

/// Full GeoJSON dump of all trails.
///
/// `GET /api/trails/geojson`
pub async fn geojson_dump(State(state): State<Arc<AppState>>) -> Result<Json<FeatureCollection>> {
    let trails = state.store.list_trails(None).await?;
    let features = trails
        .iter()
        .map(|trail| format::trail_feature(trail, None))
        .collect();
    Ok(Json(format::feature_collection(features)))
}

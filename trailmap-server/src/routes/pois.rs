//! POI endpoints: CRUD, filtered listing and GeoJSON dump.

use crate::error::Result;
use crate::routes::params::{parse_bbox, parse_point};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use geojson::{Feature, FeatureCollection};
use serde::Deserialize;
use std::sync::Arc;
use trailmap_api::{format, NearFilter, PoiFilter, PoiInput, DEFAULT_POI_DISTANCE_M};

/// Query parameters for `GET /api/pois`.
#[derive(Debug, Default, Deserialize)]
pub struct PoiListParams {
    /// Viewport filter: `minLng,minLat,maxLng,maxLat`.
    pub in_bbox: Option<String>,
    /// Proximity filter center: `lng,lat`.
    pub point: Option<String>,
    /// Proximity cutoff in meters (with `point`; default 1000).
    pub dist: Option<f64>,
}

/// List POIs as a FeatureCollection.
///
/// Filters combine conjunctively; a `point` filter orders the result
/// closest first.
///
/// `GET /api/pois?in_bbox=..&point=lng,lat&dist=1000`
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PoiListParams>,
) -> Result<Json<FeatureCollection>> {
    let bbox = params.in_bbox.as_deref().map(parse_bbox).transpose()?;
    let near = params
        .point
        .as_deref()
        .map(parse_point)
        .transpose()?
        .map(|(lng, lat)| NearFilter {
            lat,
            lng,
            max_distance_m: params.dist.unwrap_or(DEFAULT_POI_DISTANCE_M),
        });
    let filter = PoiFilter { bbox, near };

    let pois = state.store.list_pois(&filter).await?;
    let features = pois.iter().map(format::poi_feature).collect();
    Ok(Json(format::feature_collection(features)))
}

/// Create a POI.
///
/// `POST /api/pois`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PoiInput>,
) -> Result<(StatusCode, Json<Feature>)> {
    let poi = state.store.create_poi(input).await?;
    Ok((StatusCode::CREATED, Json(format::poi_feature(&poi))))
}

/// Fetch a POI by id.
///
/// `GET /api/pois/:id`
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Feature>> {
    let poi = state.store.get_poi(id).await?;
    Ok(Json(format::poi_feature(&poi)))
}

/// Replace a POI.
///
/// `PUT /api/pois/:id`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(input): Json<PoiInput>,
) -> Result<Json<Feature>> {
    let poi = state.store.update_poi(id, input).await?;
    Ok(Json(format::poi_feature(&poi)))
}

/// Delete a POI.
///
/// `DELETE /api/pois/:id`
pub async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Result<StatusCode> {
    state.store.delete_poi(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Full GeoJSON dump of all POIs.
///
/// `GET /api/pois/geojson`
pub async fn geojson_dump(State(state): State<Arc<AppState>>) -> Result<Json<FeatureCollection>> {
    let pois = state.store.list_pois(&PoiFilter::default()).await?;
    let features = pois.iter().map(format::poi_feature).collect();
    Ok(Json(format::feature_collection(features)))
}

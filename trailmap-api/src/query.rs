//! Spatial and text queries over the store.
//!
//! Distance queries run in two phases: the R-tree narrows the working set
//! to envelopes touching a search window, then exact geodesic math refines
//! each candidate. The window over-approximates, so refinement never sees
//! a false negative.

use trailmap_core::{Park, Poi, Trail};
use trailmap_spatial::{
    expect_polygon, haversine_distance, min_distance_to_line_string, parse_wkt,
    path_intersects_polygon, polygon_bbox, radius_bbox, BBox,
};

use crate::error::{ApiError, Result};
use crate::store::{StoreInner, TrailStore};

/// Default search radius for nearest-trail queries, in kilometers.
pub const DEFAULT_NEAREST_RADIUS_KM: f64 = 50.0;
/// Default result cap for nearest-trail queries.
pub const DEFAULT_NEAREST_LIMIT: usize = 10;
/// Default search radius for within-radius queries, in kilometers.
pub const DEFAULT_WITHIN_RADIUS_KM: f64 = 10.0;
/// Default distance cutoff for POI proximity filters, in meters.
pub const DEFAULT_POI_DISTANCE_M: f64 = 1000.0;

/// A trail matched by a distance query.
#[derive(Debug, Clone)]
pub struct TrailHit {
    pub trail: Trail,
    /// Distance from the query point to the nearest point of the path, meters.
    pub distance_m: f64,
}

/// Filters for POI listing. Filters combine conjunctively.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoiFilter {
    /// Viewport filter.
    pub bbox: Option<BBox>,
    /// Proximity filter; also orders the result closest first.
    pub near: Option<NearFilter>,
}

/// Keep POIs within `max_distance_m` of the point.
#[derive(Debug, Clone, Copy)]
pub struct NearFilter {
    pub lat: f64,
    pub lng: f64,
    pub max_distance_m: f64,
}

impl TrailStore {
    /// Up to `limit` trails within `radius_km` of the point, nearest first.
    /// Ties on distance break toward the lower id.
    pub async fn nearest_trails(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<TrailHit>> {
        check_coords(lat, lng)?;
        let radius_m = check_radius(radius_km)? * 1000.0;
        let inner = self.inner.read().await;
        let mut hits = trails_near(&inner, lat, lng, radius_m);
        hits.truncate(limit);
        Ok(hits)
    }

    /// All trails within `radius_km` of the point, nearest first. No cap.
    pub async fn trails_within_radius(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<TrailHit>> {
        check_coords(lat, lng)?;
        let radius_m = check_radius(radius_km)? * 1000.0;
        let inner = self.inner.read().await;
        Ok(trails_near(&inner, lat, lng, radius_m))
    }

    /// All trails whose path intersects the polygon, in id order.
    ///
    /// The polygon arrives as WKT; a path lying entirely inside the polygon
    /// counts as intersecting.
    pub async fn trails_in_polygon(&self, polygon_wkt: &str) -> Result<Vec<Trail>> {
        let polygon = parse_wkt(polygon_wkt)
            .and_then(expect_polygon)
            .map_err(|e| ApiError::bad_request(format!("invalid polygon: {}", e)))?;
        let window = polygon_bbox(&polygon)
            .ok_or_else(|| ApiError::bad_request("invalid polygon: no extent"))?;

        let inner = self.inner.read().await;
        let mut out = Vec::new();
        for id in inner.trail_index.candidates_in(&window) {
            if let Some(trail) = inner.trails.get(&id) {
                if path_intersects_polygon(&trail.path, &polygon) {
                    out.push(trail.clone());
                }
            }
        }
        Ok(out)
    }

    /// Case-insensitive substring search over trail name and difficulty,
    /// in id order. Empty text matches everything.
    pub async fn search_trails(&self, text: &str) -> Result<Vec<Trail>> {
        let inner = self.inner.read().await;
        if text.is_empty() {
            return Ok(inner.trails.values().cloned().collect());
        }
        let needle = text.to_lowercase();
        Ok(inner
            .trails
            .values()
            .filter(|trail| {
                trail.name.to_lowercase().contains(&needle)
                    || trail.difficulty.as_str().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// The park and its trails, in id order.
    pub async fn trails_in_park(&self, park_id: u64) -> Result<(Park, Vec<Trail>)> {
        let inner = self.inner.read().await;
        let park = inner
            .parks
            .get(&park_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("park", park_id))?;
        let trails = inner
            .trails
            .values()
            .filter(|trail| trail.park_id == Some(park_id))
            .cloned()
            .collect();
        Ok((park, trails))
    }

    /// The park and its POIs, in id order.
    pub async fn pois_in_park(&self, park_id: u64) -> Result<(Park, Vec<Poi>)> {
        let inner = self.inner.read().await;
        let park = inner
            .parks
            .get(&park_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("park", park_id))?;
        let pois = inner
            .pois
            .values()
            .filter(|poi| poi.park_id == Some(park_id))
            .cloned()
            .collect();
        Ok((park, pois))
    }

    /// POIs matching the filter. With a proximity filter the result is
    /// ordered closest first; otherwise id order.
    pub async fn list_pois(&self, filter: &PoiFilter) -> Result<Vec<Poi>> {
        if let Some(near) = &filter.near {
            check_coords(near.lat, near.lng)?;
            if !(near.max_distance_m >= 0.0) {
                return Err(ApiError::bad_request(format!(
                    "dist must be a non-negative number, got {}",
                    near.max_distance_m
                )));
            }
        }

        let inner = self.inner.read().await;
        let mut pois: Vec<Poi> = match &filter.bbox {
            Some(window) => {
                let mut out = Vec::new();
                for id in inner.poi_index.candidates_in(window) {
                    if let Some(poi) = inner.pois.get(&id) {
                        if window.contains_point(poi.location.y(), poi.location.x()) {
                            out.push(poi.clone());
                        }
                    }
                }
                out
            }
            None => inner.pois.values().cloned().collect(),
        };

        if let Some(near) = &filter.near {
            let mut with_distance: Vec<(f64, Poi)> = pois
                .into_iter()
                .map(|poi| {
                    let d = haversine_distance(near.lat, near.lng, poi.location.y(), poi.location.x());
                    (d, poi)
                })
                .filter(|(d, _)| *d <= near.max_distance_m)
                .collect();
            with_distance.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
            pois = with_distance.into_iter().map(|(_, poi)| poi).collect();
        }

        Ok(pois)
    }
}

fn trails_near(inner: &StoreInner, lat: f64, lng: f64, radius_m: f64) -> Vec<TrailHit> {
    let window = radius_bbox(lat, lng, radius_m);
    let mut hits = Vec::new();
    for id in inner.trail_index.candidates_in(&window) {
        if let Some(trail) = inner.trails.get(&id) {
            let distance_m = min_distance_to_line_string(lat, lng, &trail.path);
            // `<=` keeps exact matches at radius zero.
            if distance_m <= radius_m {
                hits.push(TrailHit {
                    trail: trail.clone(),
                    distance_m,
                });
            }
        }
    }
    hits.sort_by(|a, b| {
        a.distance_m
            .total_cmp(&b.distance_m)
            .then_with(|| a.trail.id.cmp(&b.trail.id))
    });
    hits
}

fn check_coords(lat: f64, lng: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::bad_request(format!(
            "lat must be within [-90, 90], got {}",
            lat
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ApiError::bad_request(format!(
            "lng must be within [-180, 180], got {}",
            lng
        )));
    }
    Ok(())
}

fn check_radius(radius_km: f64) -> Result<f64> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(ApiError::bad_request(format!(
            "radius must be a non-negative number of kilometers, got {}",
            radius_km
        )));
    }
    Ok(radius_km)
}

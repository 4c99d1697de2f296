//! Write-side input payloads.
//!
//! Geometry fields accept either a WKT string (`"LINESTRING(-6.26 53.25, ...)"`)
//! or a GeoJSON geometry object; both resolve to the same internal
//! representation. On update, an absent geometry keeps the stored one.

use geo_types::{Geometry, LineString, Point, Polygon};
use serde::Deserialize;
use trailmap_core::Provenance;
use trailmap_spatial as spatial;

use crate::error::Result;

/// A geometry value in either accepted write format.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GeometryInput {
    /// WKT text, e.g. `POINT(-6.26 53.25)`.
    Wkt(String),
    /// GeoJSON geometry object.
    GeoJson(geojson::Geometry),
}

impl GeometryInput {
    /// Resolve to a geo-types geometry.
    pub fn resolve(&self) -> spatial::Result<Geometry<f64>> {
        match self {
            GeometryInput::Wkt(wkt) => spatial::parse_wkt(wkt),
            GeometryInput::GeoJson(geometry) => spatial::geojson_to_geometry(geometry),
        }
    }

    /// Resolve and require a point.
    pub fn resolve_point(&self) -> spatial::Result<Point<f64>> {
        self.resolve().and_then(spatial::expect_point)
    }

    /// Resolve and require a line string.
    pub fn resolve_line_string(&self) -> spatial::Result<LineString<f64>> {
        self.resolve().and_then(spatial::expect_line_string)
    }

    /// Resolve and require a polygon.
    pub fn resolve_polygon(&self) -> spatial::Result<Polygon<f64>> {
        self.resolve().and_then(spatial::expect_polygon)
    }
}

/// Create/update payload for a park.
#[derive(Debug, Clone, Deserialize)]
pub struct ParkInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Required on create; optional on update (absent keeps the stored one).
    #[serde(default)]
    pub boundary: Option<GeometryInput>,
    #[serde(default)]
    pub provenance: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Create/update payload for a trail.
#[derive(Debug, Clone, Deserialize)]
pub struct TrailInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: String,
    pub length_km: f64,
    #[serde(default)]
    pub elevation_gain_m: f64,
    /// Required on create; optional on update (absent keeps the stored one).
    #[serde(default)]
    pub path: Option<GeometryInput>,
    #[serde(default)]
    pub park_id: Option<u64>,
    #[serde(default)]
    pub provenance: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Create/update payload for a POI.
#[derive(Debug, Clone, Deserialize)]
pub struct PoiInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub poi_type: String,
    /// Required on create; optional on update (absent keeps the stored one).
    #[serde(default)]
    pub location: Option<GeometryInput>,
    #[serde(default)]
    pub park_id: Option<u64>,
    #[serde(default)]
    pub provenance: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Parse an optional provenance wire name, defaulting to manual entry.
pub(crate) fn parse_provenance(value: Option<&str>) -> Result<Provenance> {
    match value {
        Some(s) => Ok(s.parse()?),
        None => Ok(Provenance::Manual),
    }
}

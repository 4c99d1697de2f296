//! Durable snapshot of the whole store.
//!
//! The snapshot is a single versioned JSON document holding every entity,
//! with geometry encoded as WKT text. Spatial indexes are not persisted;
//! they are rebuilt from geometry on load.

use chrono::{DateTime, Utc};
use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use trailmap_core::{Park, Poi, Trail};
use trailmap_spatial::{expect_line_string, expect_point, expect_polygon, parse_wkt, to_wkt};

use crate::error::{ApiError, Result};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Full store state as one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub next_park_id: u64,
    pub next_trail_id: u64,
    pub next_poi_id: u64,
    pub parks: Vec<ParkRecord>,
    pub trails: Vec<TrailRecord>,
    pub pois: Vec<PoiRecord>,
}

impl Snapshot {
    /// Serialize to pretty-printed JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Deserialize from JSON bytes, rejecting unknown versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ApiError::snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}

/// Persisted form of a [`Park`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Boundary polygon as WKT.
    pub boundary: String,
    pub provenance: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParkRecord {
    pub fn from_entity(park: &Park) -> Self {
        Self {
            id: park.id,
            name: park.name.clone(),
            description: park.description.clone(),
            boundary: to_wkt(&Geometry::Polygon(park.boundary.clone())),
            provenance: park.provenance.as_str().to_string(),
            external_id: park.external_id.clone(),
            created_at: park.created_at,
            updated_at: park.updated_at,
        }
    }

    pub fn into_entity(self) -> Result<Park> {
        let boundary = parse_wkt(&self.boundary)
            .and_then(expect_polygon)
            .map_err(|e| ApiError::snapshot(format!("park {}: {}", self.id, e)))?;
        let provenance = self
            .provenance
            .parse()
            .map_err(|e| ApiError::snapshot(format!("park {}: {}", self.id, e)))?;
        Ok(Park {
            id: self.id,
            name: self.name,
            description: self.description,
            boundary,
            provenance,
            external_id: self.external_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Persisted form of a [`Trail`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: String,
    pub length_km: f64,
    pub elevation_gain_m: f64,
    /// Path line string as WKT.
    pub path: String,
    #[serde(default)]
    pub park_id: Option<u64>,
    pub provenance: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrailRecord {
    pub fn from_entity(trail: &Trail) -> Self {
        Self {
            id: trail.id,
            name: trail.name.clone(),
            description: trail.description.clone(),
            difficulty: trail.difficulty.as_str().to_string(),
            length_km: trail.length_km,
            elevation_gain_m: trail.elevation_gain_m,
            path: to_wkt(&Geometry::LineString(trail.path.clone())),
            park_id: trail.park_id,
            provenance: trail.provenance.as_str().to_string(),
            external_id: trail.external_id.clone(),
            created_at: trail.created_at,
            updated_at: trail.updated_at,
        }
    }

    pub fn into_entity(self) -> Result<Trail> {
        let path = parse_wkt(&self.path)
            .and_then(expect_line_string)
            .map_err(|e| ApiError::snapshot(format!("trail {}: {}", self.id, e)))?;
        let difficulty = self
            .difficulty
            .parse()
            .map_err(|e| ApiError::snapshot(format!("trail {}: {}", self.id, e)))?;
        let provenance = self
            .provenance
            .parse()
            .map_err(|e| ApiError::snapshot(format!("trail {}: {}", self.id, e)))?;
        Ok(Trail {
            id: self.id,
            name: self.name,
            description: self.description,
            difficulty,
            length_km: self.length_km,
            elevation_gain_m: self.elevation_gain_m,
            path,
            park_id: self.park_id,
            provenance,
            external_id: self.external_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Persisted form of a [`Poi`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub poi_type: String,
    /// Location point as WKT.
    pub location: String,
    #[serde(default)]
    pub park_id: Option<u64>,
    pub provenance: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PoiRecord {
    pub fn from_entity(poi: &Poi) -> Self {
        Self {
            id: poi.id,
            name: poi.name.clone(),
            description: poi.description.clone(),
            poi_type: poi.poi_type.as_str().to_string(),
            location: to_wkt(&Geometry::Point(poi.location)),
            park_id: poi.park_id,
            provenance: poi.provenance.as_str().to_string(),
            external_id: poi.external_id.clone(),
            created_at: poi.created_at,
            updated_at: poi.updated_at,
        }
    }

    pub fn into_entity(self) -> Result<Poi> {
        let location = parse_wkt(&self.location)
            .and_then(expect_point)
            .map_err(|e| ApiError::snapshot(format!("POI {}: {}", self.id, e)))?;
        let poi_type = self
            .poi_type
            .parse()
            .map_err(|e| ApiError::snapshot(format!("POI {}: {}", self.id, e)))?;
        let provenance = self
            .provenance
            .parse()
            .map_err(|e| ApiError::snapshot(format!("POI {}: {}", self.id, e)))?;
        Ok(Poi {
            id: self.id,
            name: self.name,
            description: self.description,
            poi_type,
            location,
            park_id: self.park_id,
            provenance,
            external_id: self.external_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

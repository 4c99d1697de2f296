#![allow(dead_code)]
//! Shared fixtures for store integration tests.

use trailmap_api::{GeometryInput, ParkInput, PoiInput, TrailInput, TrailStore};

pub const TICKNOCK_BOUNDARY: &str =
    "POLYGON((-6.28 53.24, -6.24 53.24, -6.24 53.27, -6.28 53.27, -6.28 53.24))";
pub const TICKNOCK_PATH: &str = "LINESTRING(-6.26 53.25, -6.27 53.26)";

pub async fn memory_store() -> TrailStore {
    TrailStore::memory().await.unwrap()
}

pub fn park_input(name: &str, boundary_wkt: &str) -> ParkInput {
    ParkInput {
        name: name.to_string(),
        description: String::new(),
        boundary: Some(GeometryInput::Wkt(boundary_wkt.to_string())),
        provenance: None,
        external_id: None,
    }
}

pub fn trail_input(
    name: &str,
    difficulty: &str,
    path_wkt: &str,
    park_id: Option<u64>,
) -> TrailInput {
    TrailInput {
        name: name.to_string(),
        description: String::new(),
        difficulty: difficulty.to_string(),
        length_km: 10.0,
        elevation_gain_m: 250.0,
        path: Some(GeometryInput::Wkt(path_wkt.to_string())),
        park_id,
        provenance: None,
        external_id: None,
    }
}

pub fn poi_input(
    name: &str,
    poi_type: &str,
    location_wkt: &str,
    park_id: Option<u64>,
) -> PoiInput {
    PoiInput {
        name: name.to_string(),
        description: String::new(),
        poi_type: poi_type.to_string(),
        location: Some(GeometryInput::Wkt(location_wkt.to_string())),
        park_id,
        provenance: None,
        external_id: None,
    }
}

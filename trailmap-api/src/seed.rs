//! Demo dataset: a handful of Irish mountain-bike trails.

use crate::error::Result;
use crate::input::{GeometryInput, ParkInput, PoiInput, TrailInput};
use crate::store::TrailStore;

/// What [`seed_demo`] loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub seeded: bool,
    pub parks: usize,
    pub trails: usize,
    pub pois: usize,
}

/// Load the demo dataset into an empty store.
///
/// No-op when the store already holds any entity, so it is safe to run on
/// every startup.
pub async fn seed_demo(store: &TrailStore) -> Result<SeedSummary> {
    if !store.is_empty().await {
        return Ok(SeedSummary {
            seeded: false,
            parks: 0,
            trails: 0,
            pois: 0,
        });
    }

    let park = store
        .create_park(ParkInput {
            name: "Ticknock Forest".to_string(),
            description: "Forest park in the Dublin Mountains with purpose-built singletrack."
                .to_string(),
            boundary: Some(GeometryInput::Wkt(
                "POLYGON((-6.28 53.24, -6.24 53.24, -6.24 53.27, -6.28 53.27, -6.28 53.24))"
                    .to_string(),
            )),
            provenance: None,
            external_id: None,
        })
        .await?;

    let trails = [
        (
            "Ticknock Trail",
            "intermediate",
            12.5,
            300.0,
            "LINESTRING(-6.26 53.25, -6.27 53.26)",
            Some(park.id),
            "Rocky singletrack with fast descents and views over Dublin Bay.",
        ),
        (
            "Wicklow Way MTB",
            "beginner",
            16.3,
            380.0,
            "LINESTRING(-6.26 53.25, -6.27 53.26, -6.28 53.27, -6.29 53.28)",
            None,
            "Rolling forest roads along the northern end of the Wicklow Way.",
        ),
        (
            "Ballyhoura Blue",
            "beginner",
            7.9,
            160.0,
            "LINESTRING(-8.45 52.12, -8.46 52.13, -8.47 52.14)",
            None,
            "Flowing loop through the Ballyhoura trail network.",
        ),
        (
            "Davagh Forest Red",
            "intermediate",
            14.6,
            320.0,
            "LINESTRING(-6.95 54.65, -6.96 54.66, -6.97 54.67, -6.98 54.68)",
            None,
            "Boardwalk and rock slab riding in the Sperrins.",
        ),
    ];
    for &(name, difficulty, length_km, elevation_gain_m, path, park_id, description) in &trails {
        store
            .create_trail(TrailInput {
                name: name.to_string(),
                description: description.to_string(),
                difficulty: difficulty.to_string(),
                length_km,
                elevation_gain_m,
                path: Some(GeometryInput::Wkt(path.to_string())),
                park_id,
                provenance: None,
                external_id: None,
            })
            .await?;
    }

    store
        .create_poi(PoiInput {
            name: "Dublin Bike Shop".to_string(),
            description: "Full-service bike shop near the Ticknock trailhead.".to_string(),
            poi_type: "bike_shop".to_string(),
            location: Some(GeometryInput::Wkt("POINT(-6.26 53.25)".to_string())),
            park_id: None,
            provenance: None,
            external_id: None,
        })
        .await?;

    tracing::info!(parks = 1, trails = trails.len(), pois = 1, "seeded demo dataset");
    Ok(SeedSummary {
        seeded: true,
        parks: 1,
        trails: trails.len(),
        pois: 1,
    })
}

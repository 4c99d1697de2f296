//! GeoJSON feature assembly for API responses.
//!
//! Every entity serializes as a Feature whose `id` is the entity id and
//! whose properties carry the non-geometric fields. Coordinates follow the
//! GeoJSON axis order, longitude first.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;
use trailmap_core::{Park, Poi, Trail};
use trailmap_spatial::{line_string_to_geojson, point_to_geojson, polygon_to_geojson};

use crate::query::TrailHit;

/// Serialize a park as a GeoJSON feature.
pub fn park_feature(park: &Park) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".into(), json!(park.name));
    properties.insert("description".into(), json!(park.description));
    properties.insert("provenance".into(), json!(park.provenance.as_str()));
    properties.insert("external_id".into(), json!(park.external_id));
    properties.insert("created_at".into(), json!(park.created_at.to_rfc3339()));
    properties.insert("updated_at".into(), json!(park.updated_at.to_rfc3339()));

    Feature {
        bbox: None,
        geometry: Some(polygon_to_geojson(&park.boundary)),
        id: Some(Id::Number(park.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Serialize a trail as a GeoJSON feature.
///
/// When the owning park is supplied the feature also carries a
/// `full_label` property, `"<trail> (<park>)"`.
pub fn trail_feature(trail: &Trail, park: Option<&Park>) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".into(), json!(trail.name));
    properties.insert("description".into(), json!(trail.description));
    properties.insert("difficulty".into(), json!(trail.difficulty.as_str()));
    properties.insert(
        "difficulty_label".into(),
        json!(trail.difficulty.label()),
    );
    properties.insert("length_km".into(), json!(trail.length_km));
    properties.insert("elevation_gain_m".into(), json!(trail.elevation_gain_m));
    properties.insert("park_id".into(), json!(trail.park_id));
    properties.insert("provenance".into(), json!(trail.provenance.as_str()));
    properties.insert("external_id".into(), json!(trail.external_id));
    properties.insert("created_at".into(), json!(trail.created_at.to_rfc3339()));
    properties.insert("updated_at".into(), json!(trail.updated_at.to_rfc3339()));
    if park.is_some() {
        properties.insert("full_label".into(), json!(trail.full_label(park)));
    }

    Feature {
        bbox: None,
        geometry: Some(line_string_to_geojson(&trail.path)),
        id: Some(Id::Number(trail.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Serialize a distance-query hit: the trail feature plus `distance_m`.
pub fn trail_hit_feature(hit: &TrailHit) -> Feature {
    let mut feature = trail_feature(&hit.trail, None);
    if let Some(properties) = feature.properties.as_mut() {
        properties.insert("distance_m".into(), json!(hit.distance_m));
    }
    feature
}

/// Serialize a POI as a GeoJSON feature.
pub fn poi_feature(poi: &Poi) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".into(), json!(poi.name));
    properties.insert("description".into(), json!(poi.description));
    properties.insert("poi_type".into(), json!(poi.poi_type.as_str()));
    properties.insert("poi_type_label".into(), json!(poi.poi_type.label()));
    properties.insert("park_id".into(), json!(poi.park_id));
    properties.insert("provenance".into(), json!(poi.provenance.as_str()));
    properties.insert("external_id".into(), json!(poi.external_id));
    properties.insert("created_at".into(), json!(poi.created_at.to_rfc3339()));
    properties.insert("updated_at".into(), json!(poi.updated_at.to_rfc3339()));

    Feature {
        bbox: None,
        geometry: Some(point_to_geojson(&poi.location)),
        id: Some(Id::Number(poi.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Wrap features in a FeatureCollection.
pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Within-radius response: a FeatureCollection with a `query` foreign
/// member echoing the search parameters.
pub fn radius_collection(hits: &[TrailHit], lat: f64, lng: f64, radius_km: f64) -> FeatureCollection {
    let features = hits.iter().map(trail_hit_feature).collect();
    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "query".into(),
        json!({
            "center": { "lat": lat, "lng": lng },
            "radius_km": radius_km,
            "count": hits.len(),
        }),
    );
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use geo_types::{line_string, point, polygon};
    use trailmap_core::{Difficulty, PoiType, Provenance};

    fn test_park() -> Park {
        let now = Utc::now();
        Park {
            id: 7,
            name: "Ticknock Forest".to_string(),
            description: String::new(),
            boundary: polygon![
                (x: -6.28, y: 53.24),
                (x: -6.24, y: 53.24),
                (x: -6.24, y: 53.27),
                (x: -6.28, y: 53.27),
                (x: -6.28, y: 53.24),
            ],
            provenance: Provenance::Manual,
            external_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_trail() -> Trail {
        let now = Utc::now();
        Trail {
            id: 3,
            name: "Ticknock Trail".to_string(),
            description: String::new(),
            difficulty: Difficulty::Intermediate,
            length_km: 12.5,
            elevation_gain_m: 300.0,
            path: line_string![(x: -6.26, y: 53.25), (x: -6.27, y: 53.26)],
            park_id: Some(7),
            provenance: Provenance::Manual,
            external_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn park_feature_shape() {
        let feature = park_feature(&test_park());
        assert_eq!(feature.id, Some(Id::Number(7.into())));
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(value["properties"]["name"], "Ticknock Forest");
        assert_eq!(value["properties"]["provenance"], "manual");
    }

    #[test]
    fn trail_feature_longitude_first() {
        let value = serde_json::to_value(trail_feature(&test_trail(), None)).unwrap();
        assert_eq!(value["geometry"]["type"], "LineString");
        assert_eq!(value["geometry"]["coordinates"][0][0], -6.26);
        assert_eq!(value["geometry"]["coordinates"][0][1], 53.25);
        assert_eq!(value["properties"]["difficulty"], "intermediate");
        assert_eq!(value["properties"]["difficulty_label"], "Intermediate");
        assert!(value["properties"].get("full_label").is_none());
    }

    #[test]
    fn trail_feature_with_park_label() {
        let park = test_park();
        let value = serde_json::to_value(trail_feature(&test_trail(), Some(&park))).unwrap();
        assert_eq!(
            value["properties"]["full_label"],
            "Ticknock Trail (Ticknock Forest)"
        );
    }

    #[test]
    fn hit_feature_carries_distance() {
        let hit = TrailHit {
            trail: test_trail(),
            distance_m: 421.5,
        };
        let value = serde_json::to_value(trail_hit_feature(&hit)).unwrap();
        assert_eq!(value["properties"]["distance_m"], 421.5);
    }

    #[test]
    fn poi_feature_shape() {
        let now = Utc::now();
        let poi = Poi {
            id: 11,
            name: "Dublin Bike Shop".to_string(),
            description: String::new(),
            poi_type: PoiType::BikeShop,
            location: point!(x: -6.26, y: 53.25),
            park_id: None,
            provenance: Provenance::Manual,
            external_id: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(poi_feature(&poi)).unwrap();
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"][0], -6.26);
        assert_eq!(value["properties"]["poi_type"], "bike_shop");
        assert_eq!(value["properties"]["poi_type_label"], "Bike Shop");
        assert_eq!(value["properties"]["park_id"], serde_json::Value::Null);
    }

    #[test]
    fn radius_collection_echoes_query() {
        let hits = vec![TrailHit {
            trail: test_trail(),
            distance_m: 0.0,
        }];
        let value =
            serde_json::to_value(radius_collection(&hits, 53.25, -6.26, 10.0)).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 1);
        assert_eq!(value["query"]["center"]["lat"], 53.25);
        assert_eq!(value["query"]["radius_km"], 10.0);
        assert_eq!(value["query"]["count"], 1);
    }
}

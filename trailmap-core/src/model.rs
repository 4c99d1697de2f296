//! Domain entities: parks, trails and points of interest.
//!
//! All geometry is geographic (EPSG:4326), stored as `geo-types` values with
//! longitude as `x` and latitude as `y`. Validation here is field-level only;
//! referential checks (a trail pointing at a missing park) belong to the
//! store, which owns the id space.

use chrono::{DateTime, Utc};
use geo_types::{LineString, Point, Polygon};

use crate::error::{CoreError, Result};

/// Maximum accepted length of an entity name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Trail difficulty grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// All grades, in ascending order of difficulty.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// Wire name used in query parameters and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            other => Err(CoreError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-of-interest category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoiType {
    BikeShop,
    Parking,
    Trailhead,
    Cafe,
    Viewpoint,
    RestArea,
    Toilets,
    Water,
    Other,
}

impl PoiType {
    /// Wire name used in query parameters and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PoiType::BikeShop => "bike_shop",
            PoiType::Parking => "parking",
            PoiType::Trailhead => "trailhead",
            PoiType::Cafe => "cafe",
            PoiType::Viewpoint => "viewpoint",
            PoiType::RestArea => "rest_area",
            PoiType::Toilets => "toilets",
            PoiType::Water => "water",
            PoiType::Other => "other",
        }
    }

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            PoiType::BikeShop => "Bike Shop",
            PoiType::Parking => "Parking",
            PoiType::Trailhead => "Trailhead",
            PoiType::Cafe => "Cafe",
            PoiType::Viewpoint => "Viewpoint",
            PoiType::RestArea => "Rest Area",
            PoiType::Toilets => "Toilets",
            PoiType::Water => "Water",
            PoiType::Other => "Other",
        }
    }
}

impl std::str::FromStr for PoiType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bike_shop" => Ok(PoiType::BikeShop),
            "parking" => Ok(PoiType::Parking),
            "trailhead" => Ok(PoiType::Trailhead),
            "cafe" => Ok(PoiType::Cafe),
            "viewpoint" => Ok(PoiType::Viewpoint),
            "rest_area" => Ok(PoiType::RestArea),
            "toilets" => Ok(PoiType::Toilets),
            "water" => Ok(PoiType::Water),
            "other" => Ok(PoiType::Other),
            unknown => Err(CoreError::UnknownPoiType(unknown.to_string())),
        }
    }
}

impl std::fmt::Display for PoiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provenance {
    /// Entered by hand through the API.
    #[default]
    Manual,
    /// Imported from an external dataset; see the entity's `external_id`.
    ExternalImport,
    Other,
}

impl Provenance {
    /// Wire name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Manual => "manual",
            Provenance::ExternalImport => "external_import",
            Provenance::Other => "other",
        }
    }
}

impl std::str::FromStr for Provenance {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(Provenance::Manual),
            "external_import" => Ok(Provenance::ExternalImport),
            "other" => Ok(Provenance::Other),
            unknown => Err(CoreError::UnknownProvenance(unknown.to_string())),
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named park area with a polygon boundary.
#[derive(Debug, Clone)]
pub struct Park {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Boundary polygon. Assumed simple; self-intersection is not checked here.
    pub boundary: Polygon<f64>,
    pub provenance: Provenance,
    /// Identifier in the external source this record was imported from.
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Park {
    /// Check field-level invariants.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        let ring = self.boundary.exterior();
        if ring.0.len() < 4 {
            return Err(CoreError::validation(
                "boundary",
                format!(
                    "exterior ring needs at least 4 coordinates, got {}",
                    ring.0.len()
                ),
            ));
        }
        Ok(())
    }
}

/// A mountain-bike trail with a line-string path.
#[derive(Debug, Clone)]
pub struct Trail {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Trail length in kilometers, strictly positive.
    pub length_km: f64,
    /// Total elevation gain in meters, non-negative.
    pub elevation_gain_m: f64,
    /// Path with at least two vertices.
    pub path: LineString<f64>,
    /// Owning park, when the trail is affiliated with one.
    pub park_id: Option<u64>,
    pub provenance: Provenance,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trail {
    /// Check field-level invariants.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        // Negated comparisons so NaN is rejected as well.
        if !(self.length_km > 0.0) {
            return Err(CoreError::validation(
                "length_km",
                format!("must be greater than 0, got {}", self.length_km),
            ));
        }
        if !(self.elevation_gain_m >= 0.0) {
            return Err(CoreError::validation(
                "elevation_gain_m",
                format!("must be non-negative, got {}", self.elevation_gain_m),
            ));
        }
        if self.path.0.len() < 2 {
            return Err(CoreError::validation(
                "path",
                format!("needs at least 2 vertices, got {}", self.path.0.len()),
            ));
        }
        Ok(())
    }

    /// Display label combining the trail name with its park name when affiliated.
    pub fn full_label(&self, park: Option<&Park>) -> String {
        match park {
            Some(park) => format!("{} ({})", self.name, park.name),
            None => self.name.clone(),
        }
    }
}

/// A point of interest: a single location with a category.
#[derive(Debug, Clone)]
pub struct Poi {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub poi_type: PoiType,
    pub location: Point<f64>,
    /// Owning park, when the POI is affiliated with one.
    pub park_id: Option<u64>,
    pub provenance: Provenance,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Poi {
    /// Check field-level invariants.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::validation(
            "name",
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, line_string, polygon};

    fn test_trail() -> Trail {
        let now = Utc::now();
        Trail {
            id: 1,
            name: "Ticknock Trail".to_string(),
            description: String::new(),
            difficulty: Difficulty::Intermediate,
            length_km: 12.5,
            elevation_gain_m: 300.0,
            path: line_string![
                (x: -6.26, y: 53.25),
                (x: -6.27, y: 53.26),
            ],
            park_id: None,
            provenance: Provenance::Manual,
            external_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_trail_validate_ok() {
        assert!(test_trail().validate().is_ok());
    }

    #[test]
    fn test_trail_validate_rejects_zero_length() {
        let mut trail = test_trail();
        trail.length_km = 0.0;
        let err = trail.validate().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                field: "length_km",
                ..
            }
        ));
    }

    #[test]
    fn test_trail_validate_rejects_nan_length() {
        let mut trail = test_trail();
        trail.length_km = f64::NAN;
        assert!(trail.validate().is_err());
    }

    #[test]
    fn test_trail_validate_rejects_negative_elevation() {
        let mut trail = test_trail();
        trail.elevation_gain_m = -1.0;
        let err = trail.validate().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                field: "elevation_gain_m",
                ..
            }
        ));
    }

    #[test]
    fn test_trail_validate_rejects_single_vertex_path() {
        let mut trail = test_trail();
        trail.path = LineString::new(vec![coord! { x: -6.26, y: 53.25 }]);
        let err = trail.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "path", .. }));
    }

    #[test]
    fn test_name_length_boundary() {
        let mut trail = test_trail();
        trail.name = "x".repeat(MAX_NAME_LEN);
        assert!(trail.validate().is_ok());
        trail.name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(trail.validate().is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut trail = test_trail();
        trail.name = "   ".to_string();
        let err = trail.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_park_validate_rejects_degenerate_ring() {
        let now = Utc::now();
        let park = Park {
            id: 1,
            name: "Ticknock Forest".to_string(),
            description: String::new(),
            boundary: Polygon::new(
                LineString::new(vec![
                    coord! { x: -6.28, y: 53.24 },
                    coord! { x: -6.24, y: 53.24 },
                ]),
                vec![],
            ),
            provenance: Provenance::Manual,
            external_id: None,
            created_at: now,
            updated_at: now,
        };
        let err = park.validate().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                field: "boundary",
                ..
            }
        ));
    }

    #[test]
    fn test_full_label_with_and_without_park() {
        let now = Utc::now();
        let park = Park {
            id: 7,
            name: "Ticknock Forest".to_string(),
            description: String::new(),
            boundary: polygon![
                (x: -6.28, y: 53.24),
                (x: -6.24, y: 53.24),
                (x: -6.24, y: 53.27),
                (x: -6.28, y: 53.27),
            ],
            provenance: Provenance::Manual,
            external_id: None,
            created_at: now,
            updated_at: now,
        };
        let trail = test_trail();
        assert_eq!(
            trail.full_label(Some(&park)),
            "Ticknock Trail (Ticknock Forest)"
        );
        assert_eq!(trail.full_label(None), "Ticknock Trail");
    }

    #[test]
    fn test_difficulty_round_trip() {
        for difficulty in Difficulty::ALL {
            let parsed: Difficulty = difficulty.as_str().parse().unwrap();
            assert_eq!(parsed, difficulty);
        }
        assert!(matches!(
            "hardcore".parse::<Difficulty>(),
            Err(CoreError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn test_poi_type_parse() {
        assert_eq!("bike_shop".parse::<PoiType>().unwrap(), PoiType::BikeShop);
        assert_eq!("rest_area".parse::<PoiType>().unwrap(), PoiType::RestArea);
        assert!("bikeshop".parse::<PoiType>().is_err());
    }

    #[test]
    fn test_provenance_parse_and_default() {
        assert_eq!(Provenance::default(), Provenance::Manual);
        assert_eq!(
            "external_import".parse::<Provenance>().unwrap(),
            Provenance::ExternalImport
        );
        assert!("imported".parse::<Provenance>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Difficulty::Expert.label(), "Expert");
        assert_eq!(PoiType::BikeShop.label(), "Bike Shop");
        assert_eq!(Provenance::ExternalImport.as_str(), "external_import");
    }
}

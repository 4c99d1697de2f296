//! Geometry parsing, distance math and spatial indexing for the trail map.
//!
//! Stored coordinates are geographic (EPSG:4326) with longitude as `x` and
//! latitude as `y`. This crate provides:
//!
//! - **WKT and GeoJSON conversion** to and from `geo-types` values
//! - **Haversine distances** from a point to any geometry, in meters
//! - **An R-tree** over entity bounding boxes for candidate prefiltering
//!
//! Spatial queries run in two phases: an envelope scan over the R-tree
//! produces candidate ids, then exact predicates (`geo` crate) and exact
//! distances refine them. The envelope phase is conservative — it may
//! return extra candidates, never fewer.
//!
//! # Modules
//!
//! - [`geometry`]: WKT/GeoJSON conversion, typed extractors, bbox predicates
//! - [`distance`]: Haversine point-to-geometry distances
//! - [`index`]: R-tree over entity envelopes
//! - [`error`]: Error types

pub mod distance;
pub mod error;
pub mod geometry;
pub mod index;

pub use distance::{
    haversine_distance, min_distance_to_line_string, radius_bbox, EARTH_RADIUS_METERS,
};
pub use error::{Result, SpatialError};
pub use geometry::{
    expect_line_string, expect_point, expect_polygon, geojson_to_geometry, geometry_to_geojson,
    line_string_bbox, line_string_to_geojson, parse_wkt, path_in_bbox, path_intersects_polygon,
    point_bbox, point_to_geojson, polygon_bbox, polygon_in_bbox, polygon_to_geojson, to_wkt, BBox,
};
pub use index::SpatialIndex;

//! Geometry parsing, conversion and predicates.
//!
//! This module provides:
//! - WKT and GeoJSON conversion to and from `geo-types` values
//! - Typed extractors for the per-entity geometry kinds (point, line, polygon)
//! - Bounding-box computation and intersection predicates
//!
//! Coordinate order is geographic throughout: `x` is longitude, `y` is
//! latitude (GeoJSON axis order, EPSG:4326).

use geo::{BoundingRect, Intersects};
use geo_types::{Geometry, LineString, Point, Polygon, Rect};

use crate::error::{Result, SpatialError};

/// Parse a WKT string to a geo-types Geometry.
pub fn parse_wkt(wkt: &str) -> Result<Geometry<f64>> {
    use std::str::FromStr;
    wkt::Wkt::from_str(wkt)
        .map_err(|e| SpatialError::WktParse(format!("{:?}", e)))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| SpatialError::WktParse(format!("{:?}", e)))
        })
}

/// Serialize a geometry to WKT.
pub fn to_wkt(geom: &Geometry<f64>) -> String {
    use wkt::ToWkt;
    geom.wkt_string()
}

/// Convert any geo-types geometry to a GeoJSON geometry object.
pub fn geometry_to_geojson(geom: &Geometry<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(geom))
}

/// Convert a point to a GeoJSON geometry object (`[lng, lat]`).
pub fn point_to_geojson(point: &Point<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(point))
}

/// Convert a line string to a GeoJSON geometry object.
pub fn line_string_to_geojson(path: &LineString<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(path))
}

/// Convert a polygon to a GeoJSON geometry object.
pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(polygon))
}

/// Convert a GeoJSON geometry object into geo-types.
pub fn geojson_to_geometry(geometry: &geojson::Geometry) -> Result<Geometry<f64>> {
    Geometry::<f64>::try_from(geometry.value.clone())
        .map_err(|e| SpatialError::GeoJsonParse(e.to_string()))
}

/// Extract a point, or fail with the actual geometry kind.
pub fn expect_point(geom: Geometry<f64>) -> Result<Point<f64>> {
    match geom {
        Geometry::Point(point) => Ok(point),
        other => Err(SpatialError::GeometryType {
            expected: "Point",
            actual: geometry_kind(&other),
        }),
    }
}

/// Extract a line string, or fail with the actual geometry kind.
pub fn expect_line_string(geom: Geometry<f64>) -> Result<LineString<f64>> {
    match geom {
        Geometry::LineString(path) => Ok(path),
        other => Err(SpatialError::GeometryType {
            expected: "LineString",
            actual: geometry_kind(&other),
        }),
    }
}

/// Extract a polygon, or fail with the actual geometry kind.
pub fn expect_polygon(geom: Geometry<f64>) -> Result<Polygon<f64>> {
    match geom {
        Geometry::Polygon(polygon) => Ok(polygon),
        other => Err(SpatialError::GeometryType {
            expected: "Polygon",
            actual: geometry_kind(&other),
        }),
    }
}

/// Name of a geometry variant, for error messages.
pub fn geometry_kind(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Axis-aligned bounding box in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
            && self.min_lng <= other.max_lng
            && self.max_lng >= other.min_lng
    }

    /// Check if this bbox contains a point.
    pub fn contains_point(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }

    /// Compute from a geo-types Geometry.
    pub fn from_geometry(geom: &Geometry<f64>) -> Option<Self> {
        geom.bounding_rect().map(Self::from_rect)
    }

    /// Convert a geo-types Rect (x = lng, y = lat).
    pub fn from_rect(rect: Rect<f64>) -> Self {
        Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        }
    }
}

/// Bounding box of a point (degenerate, zero-extent).
pub fn point_bbox(point: &Point<f64>) -> BBox {
    BBox::new(point.y(), point.y(), point.x(), point.x())
}

/// Bounding box of a line string. `None` when the path is empty.
pub fn line_string_bbox(path: &LineString<f64>) -> Option<BBox> {
    path.bounding_rect().map(BBox::from_rect)
}

/// Bounding box of a polygon. `None` when the exterior ring is empty.
pub fn polygon_bbox(polygon: &Polygon<f64>) -> Option<BBox> {
    polygon.bounding_rect().map(BBox::from_rect)
}

/// Exact test: does a trail path intersect a bounding box?
pub fn path_in_bbox(path: &LineString<f64>, bbox: &BBox) -> bool {
    bbox_polygon(bbox).intersects(path)
}

/// Exact test: does a park boundary intersect a bounding box?
pub fn polygon_in_bbox(polygon: &Polygon<f64>, bbox: &BBox) -> bool {
    bbox_polygon(bbox).intersects(polygon)
}

/// Exact test: does a trail path intersect a query polygon?
pub fn path_intersects_polygon(path: &LineString<f64>, polygon: &Polygon<f64>) -> bool {
    polygon.intersects(path)
}

fn bbox_polygon(bbox: &BBox) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (bbox.min_lng, bbox.min_lat),
            (bbox.max_lng, bbox.min_lat),
            (bbox.max_lng, bbox.max_lat),
            (bbox.min_lng, bbox.max_lat),
            (bbox.min_lng, bbox.min_lat),
        ]),
        vec![],
    )
}

//! Error types for the spatial layer.

use thiserror::Error;

/// Spatial layer errors.
#[derive(Error, Debug)]
pub enum SpatialError {
    /// Malformed WKT text.
    #[error("WKT parse error: {0}")]
    WktParse(String),

    /// Malformed GeoJSON geometry object.
    #[error("GeoJSON parse error: {0}")]
    GeoJsonParse(String),

    /// Parsed geometry is not the type the field requires.
    #[error("expected {expected} geometry, got {actual}")]
    GeometryType {
        expected: &'static str,
        actual: &'static str,
    },

    /// Geometry is structurally unusable (e.g., no extent).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for spatial operations.
pub type Result<T> = std::result::Result<T, SpatialError>;

//! API error types.

use thiserror::Error;
use trailmap_core::CoreError;
use trailmap_spatial::SpatialError;

/// API layer errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Field-level validation failure from the domain model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Geometry parsing or geometry type failure.
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// Unknown entity id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Trail or POI referencing a park that does not exist.
    #[error("park {0} does not exist")]
    DanglingPark(u64),

    /// Missing or malformed request parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Snapshot document is corrupt or from an unsupported version.
    #[error("snapshot format error: {0}")]
    Snapshot(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage I/O failure.
    #[error("storage error: {0}")]
    Io(String),

    /// Invariant breakage with no better classification.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a not-found error for a named entity kind.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        ApiError::NotFound { entity, id }
    }

    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    /// Create a snapshot format error.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        ApiError::Snapshot(msg.into())
    }

    /// Create a storage I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        ApiError::Io(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

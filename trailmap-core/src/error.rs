//! Error types for the domain model.

use thiserror::Error;

/// Domain model errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Field-level validation failure.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Difficulty string outside the defined set.
    #[error("unknown difficulty '{0}' (expected beginner, intermediate, advanced or expert)")]
    UnknownDifficulty(String),

    /// POI type string outside the defined set.
    #[error("unknown POI type '{0}'")]
    UnknownPoiType(String),

    /// Provenance string outside the defined set.
    #[error("unknown provenance '{0}' (expected manual, external_import or other)")]
    UnknownProvenance(String),
}

impl CoreError {
    /// Create a validation error for a named field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for domain model operations.
pub type Result<T> = std::result::Result<T, CoreError>;

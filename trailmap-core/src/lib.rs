//! Core domain model for the trail map service.
//!
//! Defines the three entity types (parks, trails, points of interest), their
//! enumerated attributes, and field-level validation. Everything here is
//! storage-agnostic: persistence lives in `trailmap-api` and geometry math in
//! `trailmap-spatial`.
//!
//! # Modules
//!
//! - [`model`]: Entity structs, attribute enums, validators
//! - [`error`]: Error types

pub mod error;
pub mod model;

pub use error::{CoreError, Result};
pub use model::{Difficulty, Park, Poi, PoiType, Provenance, Trail, MAX_NAME_LEN};

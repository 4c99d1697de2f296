//! Store, query and persistence layer for the trail map service.
//!
//! The crate owns everything between the HTTP surface and the domain model:
//! a snapshot-persisted entity store with R-tree indexes ([`store`]),
//! spatial and text queries ([`query`]), request payload parsing
//! ([`input`]), GeoJSON response assembly ([`format`]) and pluggable
//! snapshot storage ([`storage`]).

pub mod error;
pub mod format;
pub mod input;
pub mod query;
pub mod seed;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use error::{ApiError, Result};
pub use input::{GeometryInput, ParkInput, PoiInput, TrailInput};
pub use query::{
    NearFilter, PoiFilter, TrailHit, DEFAULT_NEAREST_LIMIT, DEFAULT_NEAREST_RADIUS_KM,
    DEFAULT_POI_DISTANCE_M, DEFAULT_WITHIN_RADIUS_KM,
};
pub use seed::{seed_demo, SeedSummary};
pub use storage::{FileStorage, MemoryStorage, Storage, SNAPSHOT_FILE};
pub use store::{ParkCascade, StoreCounts, TrailStore};

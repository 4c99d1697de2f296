//! The trail store: entities, spatial indexes and persistence.
//!
//! All state lives behind one `RwLock`: three id-ordered entity maps plus
//! one R-tree per entity type. Reads take the lock shared; writes take it
//! exclusive, mutate, and persist a full snapshot before returning, so the
//! stored document never runs ahead of an acknowledged write.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use trailmap_core::{Park, Poi, Trail};
use trailmap_spatial::{
    line_string_bbox, path_in_bbox, point_bbox, polygon_bbox, polygon_in_bbox, BBox, SpatialError,
    SpatialIndex,
};

use crate::error::{ApiError, Result};
use crate::input::{parse_provenance, ParkInput, PoiInput, TrailInput};
use crate::snapshot::{ParkRecord, PoiRecord, Snapshot, TrailRecord, SNAPSHOT_VERSION};
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Counts of entities removed by a park cascade delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkCascade {
    pub trails_deleted: usize,
    pub pois_deleted: usize,
}

/// Entity counts, for stats reporting.
#[derive(Debug, Clone, Copy)]
pub struct StoreCounts {
    pub parks: usize,
    pub trails: usize,
    pub pois: usize,
}

/// The trail store.
pub struct TrailStore {
    pub(crate) inner: RwLock<StoreInner>,
    storage: Arc<dyn Storage>,
}

pub(crate) struct StoreInner {
    pub(crate) parks: BTreeMap<u64, Park>,
    pub(crate) trails: BTreeMap<u64, Trail>,
    pub(crate) pois: BTreeMap<u64, Poi>,
    pub(crate) park_index: SpatialIndex,
    pub(crate) trail_index: SpatialIndex,
    pub(crate) poi_index: SpatialIndex,
    next_park_id: u64,
    next_trail_id: u64,
    next_poi_id: u64,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            parks: BTreeMap::new(),
            trails: BTreeMap::new(),
            pois: BTreeMap::new(),
            park_index: SpatialIndex::new(),
            trail_index: SpatialIndex::new(),
            poi_index: SpatialIndex::new(),
            next_park_id: 1,
            next_trail_id: 1,
            next_poi_id: 1,
        }
    }

    fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut inner = Self::new();
        inner.next_park_id = snapshot.next_park_id;
        inner.next_trail_id = snapshot.next_trail_id;
        inner.next_poi_id = snapshot.next_poi_id;

        let mut park_entries = Vec::with_capacity(snapshot.parks.len());
        for record in snapshot.parks {
            let park = record.into_entity()?;
            park_entries.push((park.id, park_bbox(&park)?));
            inner.parks.insert(park.id, park);
        }
        inner.park_index = SpatialIndex::bulk_load(park_entries);

        let mut trail_entries = Vec::with_capacity(snapshot.trails.len());
        for record in snapshot.trails {
            let trail = record.into_entity()?;
            trail_entries.push((trail.id, trail_bbox(&trail)?));
            inner.trails.insert(trail.id, trail);
        }
        inner.trail_index = SpatialIndex::bulk_load(trail_entries);

        let mut poi_entries = Vec::with_capacity(snapshot.pois.len());
        for record in snapshot.pois {
            let poi = record.into_entity()?;
            poi_entries.push((poi.id, point_bbox(&poi.location)));
            inner.pois.insert(poi.id, poi);
        }
        inner.poi_index = SpatialIndex::bulk_load(poi_entries);

        Ok(inner)
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            next_park_id: self.next_park_id,
            next_trail_id: self.next_trail_id,
            next_poi_id: self.next_poi_id,
            parks: self.parks.values().map(ParkRecord::from_entity).collect(),
            trails: self.trails.values().map(TrailRecord::from_entity).collect(),
            pois: self.pois.values().map(PoiRecord::from_entity).collect(),
        }
    }
}

impl TrailStore {
    /// Open a store over the given storage, loading any existing snapshot.
    pub async fn open(storage: Arc<dyn Storage>) -> Result<Self> {
        let inner = match storage.load().await? {
            Some(bytes) => StoreInner::from_snapshot(Snapshot::from_bytes(&bytes)?)?,
            None => StoreInner::new(),
        };
        Ok(Self {
            inner: RwLock::new(inner),
            storage,
        })
    }

    /// Open an in-memory store.
    pub async fn memory() -> Result<Self> {
        Self::open(Arc::new(MemoryStorage::new())).await
    }

    /// Open a file-backed store rooted at the given directory.
    pub async fn file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Arc::new(FileStorage::new(path))).await
    }

    async fn persist(&self, inner: &StoreInner) -> Result<()> {
        let bytes = inner.to_snapshot().to_bytes()?;
        self.storage.save(&bytes).await
    }

    /// Entity counts.
    pub async fn counts(&self) -> StoreCounts {
        let inner = self.inner.read().await;
        StoreCounts {
            parks: inner.parks.len(),
            trails: inner.trails.len(),
            pois: inner.pois.len(),
        }
    }

    /// True when no entities exist.
    pub async fn is_empty(&self) -> bool {
        let inner = self.inner.read().await;
        inner.parks.is_empty() && inner.trails.is_empty() && inner.pois.is_empty()
    }

    // === Parks ===

    /// Create a park. The boundary geometry is required.
    pub async fn create_park(&self, input: ParkInput) -> Result<Park> {
        let boundary = input
            .boundary
            .as_ref()
            .ok_or_else(|| ApiError::bad_request("boundary is required"))?
            .resolve_polygon()?;
        let provenance = parse_provenance(input.provenance.as_deref())?;

        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let park = Park {
            id: inner.next_park_id,
            name: input.name,
            description: input.description,
            boundary,
            provenance,
            external_id: input.external_id,
            created_at: now,
            updated_at: now,
        };
        park.validate()?;
        let bbox = park_bbox(&park)?;

        inner.next_park_id += 1;
        inner.park_index.insert(park.id, &bbox);
        inner.parks.insert(park.id, park.clone());
        self.persist(&inner).await?;

        tracing::debug!(id = park.id, name = %park.name, "created park");
        Ok(park)
    }

    /// Fetch a park by id.
    pub async fn get_park(&self, id: u64) -> Result<Park> {
        let inner = self.inner.read().await;
        inner
            .parks
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("park", id))
    }

    /// Replace a park. Absent boundary/provenance/external_id keep the
    /// stored values; scalar fields are replaced.
    pub async fn update_park(&self, id: u64, input: ParkInput) -> Result<Park> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .parks
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("park", id))?;

        let boundary = match input.boundary.as_ref() {
            Some(geometry) => geometry.resolve_polygon()?,
            None => existing.boundary.clone(),
        };
        let provenance = match input.provenance.as_deref() {
            Some(s) => s.parse()?,
            None => existing.provenance,
        };
        let park = Park {
            id,
            name: input.name,
            description: input.description,
            boundary,
            provenance,
            external_id: input.external_id.or_else(|| existing.external_id.clone()),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        park.validate()?;

        inner.park_index.remove(id, &park_bbox(&existing)?);
        inner.park_index.insert(id, &park_bbox(&park)?);
        inner.parks.insert(id, park.clone());
        self.persist(&inner).await?;

        tracing::debug!(id, "updated park");
        Ok(park)
    }

    /// Delete a park and cascade to its trails and POIs.
    pub async fn delete_park(&self, id: u64) -> Result<ParkCascade> {
        let mut inner = self.inner.write().await;
        let park = inner
            .parks
            .remove(&id)
            .ok_or_else(|| ApiError::not_found("park", id))?;
        inner.park_index.remove(id, &park_bbox(&park)?);

        let trail_ids: Vec<u64> = inner
            .trails
            .values()
            .filter(|trail| trail.park_id == Some(id))
            .map(|trail| trail.id)
            .collect();
        for trail_id in &trail_ids {
            if let Some(trail) = inner.trails.remove(trail_id) {
                if let Some(bbox) = line_string_bbox(&trail.path) {
                    inner.trail_index.remove(trail.id, &bbox);
                }
            }
        }

        let poi_ids: Vec<u64> = inner
            .pois
            .values()
            .filter(|poi| poi.park_id == Some(id))
            .map(|poi| poi.id)
            .collect();
        for poi_id in &poi_ids {
            if let Some(poi) = inner.pois.remove(poi_id) {
                inner.poi_index.remove(poi.id, &point_bbox(&poi.location));
            }
        }

        self.persist(&inner).await?;

        tracing::info!(
            id,
            trails = trail_ids.len(),
            pois = poi_ids.len(),
            "deleted park"
        );
        Ok(ParkCascade {
            trails_deleted: trail_ids.len(),
            pois_deleted: poi_ids.len(),
        })
    }

    /// All parks in id order, optionally restricted to a viewport bbox.
    pub async fn list_parks(&self, bbox: Option<&BBox>) -> Result<Vec<Park>> {
        let inner = self.inner.read().await;
        match bbox {
            None => Ok(inner.parks.values().cloned().collect()),
            Some(window) => {
                let mut out = Vec::new();
                for id in inner.park_index.candidates_in(window) {
                    if let Some(park) = inner.parks.get(&id) {
                        if polygon_in_bbox(&park.boundary, window) {
                            out.push(park.clone());
                        }
                    }
                }
                Ok(out)
            }
        }
    }

    // === Trails ===

    /// Create a trail. The path geometry is required; a `park_id` must
    /// reference an existing park.
    pub async fn create_trail(&self, input: TrailInput) -> Result<Trail> {
        let path = input
            .path
            .as_ref()
            .ok_or_else(|| ApiError::bad_request("path is required"))?
            .resolve_line_string()?;
        let difficulty = input.difficulty.parse()?;
        let provenance = parse_provenance(input.provenance.as_deref())?;

        let mut inner = self.inner.write().await;
        if let Some(park_id) = input.park_id {
            if !inner.parks.contains_key(&park_id) {
                return Err(ApiError::DanglingPark(park_id));
            }
        }

        let now = Utc::now();
        let trail = Trail {
            id: inner.next_trail_id,
            name: input.name,
            description: input.description,
            difficulty,
            length_km: input.length_km,
            elevation_gain_m: input.elevation_gain_m,
            path,
            park_id: input.park_id,
            provenance,
            external_id: input.external_id,
            created_at: now,
            updated_at: now,
        };
        trail.validate()?;
        let bbox = trail_bbox(&trail)?;

        inner.next_trail_id += 1;
        inner.trail_index.insert(trail.id, &bbox);
        inner.trails.insert(trail.id, trail.clone());
        self.persist(&inner).await?;

        tracing::debug!(id = trail.id, name = %trail.name, "created trail");
        Ok(trail)
    }

    /// Fetch a trail by id.
    pub async fn get_trail(&self, id: u64) -> Result<Trail> {
        let inner = self.inner.read().await;
        inner
            .trails
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("trail", id))
    }

    /// Replace a trail. Absent path/provenance/external_id keep the stored
    /// values; scalar fields are replaced.
    pub async fn update_trail(&self, id: u64, input: TrailInput) -> Result<Trail> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .trails
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("trail", id))?;

        if let Some(park_id) = input.park_id {
            if !inner.parks.contains_key(&park_id) {
                return Err(ApiError::DanglingPark(park_id));
            }
        }

        let path = match input.path.as_ref() {
            Some(geometry) => geometry.resolve_line_string()?,
            None => existing.path.clone(),
        };
        let difficulty = input.difficulty.parse()?;
        let provenance = match input.provenance.as_deref() {
            Some(s) => s.parse()?,
            None => existing.provenance,
        };
        let trail = Trail {
            id,
            name: input.name,
            description: input.description,
            difficulty,
            length_km: input.length_km,
            elevation_gain_m: input.elevation_gain_m,
            path,
            park_id: input.park_id,
            provenance,
            external_id: input.external_id.or_else(|| existing.external_id.clone()),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        trail.validate()?;

        inner.trail_index.remove(id, &trail_bbox(&existing)?);
        inner.trail_index.insert(id, &trail_bbox(&trail)?);
        inner.trails.insert(id, trail.clone());
        self.persist(&inner).await?;

        tracing::debug!(id, "updated trail");
        Ok(trail)
    }

    /// Delete a trail.
    pub async fn delete_trail(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let trail = inner
            .trails
            .remove(&id)
            .ok_or_else(|| ApiError::not_found("trail", id))?;
        inner.trail_index.remove(id, &trail_bbox(&trail)?);
        self.persist(&inner).await?;

        tracing::debug!(id, "deleted trail");
        Ok(())
    }

    /// All trails in id order, optionally restricted to a viewport bbox.
    pub async fn list_trails(&self, bbox: Option<&BBox>) -> Result<Vec<Trail>> {
        let inner = self.inner.read().await;
        match bbox {
            None => Ok(inner.trails.values().cloned().collect()),
            Some(window) => {
                let mut out = Vec::new();
                for id in inner.trail_index.candidates_in(window) {
                    if let Some(trail) = inner.trails.get(&id) {
                        if path_in_bbox(&trail.path, window) {
                            out.push(trail.clone());
                        }
                    }
                }
                Ok(out)
            }
        }
    }

    // === POIs ===

    /// Create a POI. The location geometry is required; a `park_id` must
    /// reference an existing park.
    pub async fn create_poi(&self, input: PoiInput) -> Result<Poi> {
        let location = input
            .location
            .as_ref()
            .ok_or_else(|| ApiError::bad_request("location is required"))?
            .resolve_point()?;
        let poi_type = input.poi_type.parse()?;
        let provenance = parse_provenance(input.provenance.as_deref())?;

        let mut inner = self.inner.write().await;
        if let Some(park_id) = input.park_id {
            if !inner.parks.contains_key(&park_id) {
                return Err(ApiError::DanglingPark(park_id));
            }
        }

        let now = Utc::now();
        let poi = Poi {
            id: inner.next_poi_id,
            name: input.name,
            description: input.description,
            poi_type,
            location,
            park_id: input.park_id,
            provenance,
            external_id: input.external_id,
            created_at: now,
            updated_at: now,
        };
        poi.validate()?;

        inner.next_poi_id += 1;
        inner.poi_index.insert(poi.id, &point_bbox(&poi.location));
        inner.pois.insert(poi.id, poi.clone());
        self.persist(&inner).await?;

        tracing::debug!(id = poi.id, name = %poi.name, "created POI");
        Ok(poi)
    }

    /// Fetch a POI by id.
    pub async fn get_poi(&self, id: u64) -> Result<Poi> {
        let inner = self.inner.read().await;
        inner
            .pois
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("POI", id))
    }

    /// Replace a POI. Absent location/provenance/external_id keep the
    /// stored values; scalar fields are replaced.
    pub async fn update_poi(&self, id: u64, input: PoiInput) -> Result<Poi> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .pois
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("POI", id))?;

        if let Some(park_id) = input.park_id {
            if !inner.parks.contains_key(&park_id) {
                return Err(ApiError::DanglingPark(park_id));
            }
        }

        let location = match input.location.as_ref() {
            Some(geometry) => geometry.resolve_point()?,
            None => existing.location,
        };
        let poi_type = input.poi_type.parse()?;
        let provenance = match input.provenance.as_deref() {
            Some(s) => s.parse()?,
            None => existing.provenance,
        };
        let poi = Poi {
            id,
            name: input.name,
            description: input.description,
            poi_type,
            location,
            park_id: input.park_id,
            provenance,
            external_id: input.external_id.or_else(|| existing.external_id.clone()),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        poi.validate()?;

        inner.poi_index.remove(id, &point_bbox(&existing.location));
        inner.poi_index.insert(id, &point_bbox(&poi.location));
        inner.pois.insert(id, poi.clone());
        self.persist(&inner).await?;

        tracing::debug!(id, "updated POI");
        Ok(poi)
    }

    /// Delete a POI.
    pub async fn delete_poi(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let poi = inner
            .pois
            .remove(&id)
            .ok_or_else(|| ApiError::not_found("POI", id))?;
        inner.poi_index.remove(id, &point_bbox(&poi.location));
        self.persist(&inner).await?;

        tracing::debug!(id, "deleted POI");
        Ok(())
    }
}

pub(crate) fn park_bbox(park: &Park) -> Result<BBox> {
    polygon_bbox(&park.boundary).ok_or_else(|| {
        ApiError::Spatial(SpatialError::InvalidGeometry(
            "park boundary has no extent".into(),
        ))
    })
}

pub(crate) fn trail_bbox(trail: &Trail) -> Result<BBox> {
    line_string_bbox(&trail.path).ok_or_else(|| {
        ApiError::Spatial(SpatialError::InvalidGeometry(
            "trail path has no extent".into(),
        ))
    })
}

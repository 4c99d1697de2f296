//! R-tree over entity bounding boxes.
//!
//! The index stores one axis-aligned rectangle per entity, keyed by entity
//! id, with coordinates in `[lng, lat]` order. Envelope queries return
//! candidate ids; callers refine candidates against exact geometry.

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

use crate::geometry::BBox;

type IndexedEnvelope = GeomWithData<Rectangle<[f64; 2]>, u64>;

/// Spatial index over entity envelopes.
pub struct SpatialIndex {
    tree: RTree<IndexedEnvelope>,
}

impl SpatialIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index from `(id, bbox)` pairs in one pass.
    pub fn bulk_load(entries: Vec<(u64, BBox)>) -> Self {
        let envelopes = entries
            .into_iter()
            .map(|(id, bbox)| GeomWithData::new(rectangle(&bbox), id))
            .collect();
        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// Insert an entity envelope.
    pub fn insert(&mut self, id: u64, bbox: &BBox) {
        self.tree.insert(GeomWithData::new(rectangle(bbox), id));
    }

    /// Remove an entity envelope. The bbox must match the one it was
    /// inserted with (recompute it from the stored geometry).
    pub fn remove(&mut self, id: u64, bbox: &BBox) -> bool {
        self.tree
            .remove(&GeomWithData::new(rectangle(bbox), id))
            .is_some()
    }

    /// Ids whose envelope intersects the query window, in ascending id order.
    pub fn candidates_in(&self, window: &BBox) -> Vec<u64> {
        let envelope = AABB::from_corners(
            [window.min_lng, window.min_lat],
            [window.max_lng, window.max_lat],
        );
        let mut ids: Vec<u64> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}

fn rectangle(bbox: &BBox) -> Rectangle<[f64; 2]> {
    Rectangle::from_corners(
        [bbox.min_lng, bbox.min_lat],
        [bbox.max_lng, bbox.max_lat],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_bbox(lat: f64, lng: f64) -> BBox {
        BBox::new(lat, lat + 1.0, lng, lng + 1.0)
    }

    #[test]
    fn test_insert_and_query() {
        let mut index = SpatialIndex::new();
        index.insert(1, &unit_bbox(53.0, -6.5));
        index.insert(2, &unit_bbox(52.0, -8.5));
        index.insert(3, &unit_bbox(54.5, -7.0));

        let window = BBox::new(52.5, 54.0, -7.0, -6.0);
        assert_eq!(index.candidates_in(&window), vec![1]);

        let ireland = BBox::new(51.0, 56.0, -11.0, -5.0);
        assert_eq!(index.candidates_in(&ireland), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_requires_matching_bbox() {
        let mut index = SpatialIndex::new();
        let bbox = unit_bbox(53.0, -6.5);
        index.insert(1, &bbox);

        assert!(!index.remove(1, &unit_bbox(10.0, 10.0)));
        assert_eq!(index.len(), 1);

        assert!(index.remove(1, &bbox));
        assert!(index.is_empty());
    }

    #[test]
    fn test_bulk_load_matches_incremental() {
        let entries = vec![
            (1, unit_bbox(53.0, -6.5)),
            (2, unit_bbox(52.0, -8.5)),
            (3, unit_bbox(54.5, -7.0)),
        ];
        let bulk = SpatialIndex::bulk_load(entries.clone());
        let mut incremental = SpatialIndex::new();
        for (id, bbox) in &entries {
            incremental.insert(*id, bbox);
        }

        let window = BBox::new(51.0, 56.0, -11.0, -5.0);
        assert_eq!(bulk.candidates_in(&window), incremental.candidates_in(&window));
    }

    #[test]
    fn test_candidates_sorted_by_id() {
        let mut index = SpatialIndex::new();
        // Insert out of id order; all overlap the window
        index.insert(9, &unit_bbox(53.0, -6.5));
        index.insert(2, &unit_bbox(53.2, -6.4));
        index.insert(5, &unit_bbox(53.1, -6.6));

        let window = BBox::new(52.0, 55.0, -7.0, -6.0);
        assert_eq!(index.candidates_in(&window), vec![2, 5, 9]);
    }

    #[test]
    fn test_zero_extent_point_envelope() {
        let mut index = SpatialIndex::new();
        index.insert(1, &BBox::new(53.25, 53.25, -6.26, -6.26));

        let touching = BBox::new(53.0, 53.25, -6.5, -6.26);
        assert_eq!(index.candidates_in(&touching), vec![1]);
    }
}

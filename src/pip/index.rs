//! Spatial index for first-match boundary lookups.

use geo_types::Coord;
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use super::ring::polygon_contains;
use super::Boundary;

/// Wrapper for R-tree indexing of boundaries
#[derive(Debug, Clone)]
pub struct IndexedBoundary {
    pub boundary: Boundary,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBoundary {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedBoundary {
    pub fn new(boundary: Boundary, subtract_holes: bool) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = boundary.bbox(subtract_holes)?;
        Some(Self {
            boundary,
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// R-tree over boundary envelopes.
///
/// Candidates are the boundaries whose envelope meets the ray cast from the
/// query point towards +x. A ring can only toggle for such a point, so the
/// pre-filter never changes the answer.
pub struct BoundaryIndex {
    tree: RTree<IndexedBoundary>,
    subtract_holes: bool,
}

impl BoundaryIndex {
    /// Build spatial index from boundaries
    pub fn build(boundaries: Vec<Boundary>, subtract_holes: bool) -> Self {
        info!(
            "Building spatial index for {} boundaries...",
            boundaries.len()
        );

        let indexed: Vec<IndexedBoundary> = boundaries
            .into_iter()
            .filter_map(|b| IndexedBoundary::new(b, subtract_holes))
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Spatial index built with {} entries", tree.size());

        Self {
            tree,
            subtract_holes,
        }
    }

    /// Boundaries that could contain the point, in collection order
    fn candidates(&self, point: Coord<f64>) -> Vec<&Boundary> {
        let ray = AABB::from_corners([point.x, point.y], [f64::MAX, point.y]);
        let mut found: Vec<&Boundary> = self
            .tree
            .locate_in_envelope_intersecting(&ray)
            .map(|ib| &ib.boundary)
            .collect();
        found.sort_by_key(|b| (b.order, b.part));
        found
    }

    /// The first boundary (in collection order) containing the point
    pub fn lookup(&self, point: Coord<f64>) -> Option<&Boundary> {
        self.candidates(point)
            .into_iter()
            .find(|b| polygon_contains(point, &b.polygon, self.subtract_holes))
    }

    /// Every boundary containing the point, in collection order
    pub fn lookup_all(&self, point: Coord<f64>) -> Vec<&Boundary> {
        self.candidates(point)
            .into_iter()
            .filter(|b| polygon_contains(point, &b.polygon, self.subtract_holes))
            .collect()
    }

    /// Get total number of indexed boundaries
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, FeatureCollection, Geometry};
    use crate::pip::extract_boundaries;
    use crate::region::RegionTable;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coord<f64>> {
        vec![
            Coord { x: x0, y: y0 },
            Coord { x: x1, y: y0 },
            Coord { x: x1, y: y1 },
            Coord { x: x0, y: y1 },
        ]
    }

    fn index_of(features: Vec<Feature>) -> BoundaryIndex {
        let collection = FeatureCollection::new(features);
        BoundaryIndex::build(
            extract_boundaries(&collection, &RegionTable::builtin()),
            false,
        )
    }

    #[test]
    fn test_first_match_wins() {
        let index = index_of(vec![
            Feature::new(Some("FRA"), Geometry::Polygon(vec![rect(0.0, 0.0, 10.0, 10.0)])),
            Feature::new(Some("USA"), Geometry::Polygon(vec![rect(5.0, 5.0, 15.0, 15.0)])),
        ]);

        let overlap = Coord { x: 7.0, y: 7.0 };
        assert_eq!(index.lookup(overlap).map(|b| b.label), Some('E'));
        assert_eq!(index.lookup_all(overlap).len(), 2);

        let only_usa = Coord { x: 12.0, y: 12.0 };
        assert_eq!(index.lookup(only_usa).map(|b| b.label), Some('N'));

        assert!(index.lookup(Coord { x: -3.0, y: 7.0 }).is_none());
    }

    #[test]
    fn test_order_reversed() {
        let index = index_of(vec![
            Feature::new(Some("USA"), Geometry::Polygon(vec![rect(5.0, 5.0, 15.0, 15.0)])),
            Feature::new(Some("FRA"), Geometry::Polygon(vec![rect(0.0, 0.0, 10.0, 10.0)])),
        ]);
        assert_eq!(
            index.lookup(Coord { x: 7.0, y: 7.0 }).map(|b| b.label),
            Some('N')
        );
    }

    #[test]
    fn test_empty_index() {
        let index = index_of(vec![]);
        assert!(index.is_empty());
        assert!(index.lookup(Coord { x: 0.0, y: 0.0 }).is_none());
    }
}

//! Point-in-Polygon (PIP) classification of grid points.
//!
//! Boundaries are extracted from the feature collection, labeled once via the
//! region table, and kept in an R-tree for candidate lookup.

mod boundary;
mod index;
mod ring;

pub use boundary::{extract_boundaries, Boundary};
pub use index::BoundaryIndex;
pub use ring::{contains, polygon_contains};

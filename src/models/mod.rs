//! Core data models: boundary features in, label grid out.

pub mod feature;
pub mod grid;

pub use feature::{Feature, FeatureCollection, Geometry, Ring};
pub use grid::{Grid, BACKGROUND};

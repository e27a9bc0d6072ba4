//! Asciimap - rasterizes country boundaries into a coarse grid of region labels
//!
//! This library provides the shared pipeline for the fetch and rasterize binaries.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pip;
pub mod raster;
pub mod region;
pub mod source;

pub use error::{Error, Result};
pub use models::{Feature, FeatureCollection, Geometry, Grid};
pub use raster::{rasterize, GridSpec, RasterOptions};
pub use region::RegionTable;

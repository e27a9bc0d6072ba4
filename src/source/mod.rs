//! Boundary data acquisition: downloading the dataset and loading it from disk.
//!
//! Nothing here is needed by the rasterizer itself, which only sees an
//! in-memory `FeatureCollection`.

mod download;
mod load;

pub use download::{write_atomically, DownloadReport, Downloader};
pub use load::load_collection;

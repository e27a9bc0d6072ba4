//! Grid rasterization: equirectangular cell mapping and the labeling sweep.

use geo_types::Coord;
use rayon::prelude::*;
use tracing::info;

use crate::models::{FeatureCollection, Grid, BACKGROUND};
use crate::pip::{extract_boundaries, BoundaryIndex};
use crate::region::RegionTable;

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
}

impl GridSpec {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Representative (lon, lat) of a cell. Row 0 is the northern edge
    /// (lat 90), column 0 the western edge (lon -180).
    pub fn cell_coord(&self, row: usize, col: usize) -> Coord<f64> {
        let lon = (col as f64 / self.width as f64) * 360.0 - 180.0;
        let lat = -((row as f64 / self.height as f64) * 180.0 - 90.0);
        Coord { x: lon, y: lat }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(120, 60)
    }
}

/// Rasterization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub grid: GridSpec,
    pub background: char,
    /// Subtract interior rings (even-odd over all rings) instead of testing
    /// the exterior ring alone
    pub subtract_holes: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            background: BACKGROUND,
            subtract_holes: false,
        }
    }
}

/// Label every cell of the grid with the region of the first feature whose
/// polygon contains the cell's coordinate.
pub fn rasterize(
    collection: &FeatureCollection,
    table: &RegionTable,
    options: &RasterOptions,
) -> Grid {
    rasterize_with_progress(collection, table, options, |_| {})
}

/// Like [`rasterize`], calling `on_row` once per finished row. Rows are
/// computed in parallel, so calls arrive in no particular order.
pub fn rasterize_with_progress<F>(
    collection: &FeatureCollection,
    table: &RegionTable,
    options: &RasterOptions,
    on_row: F,
) -> Grid
where
    F: Fn(usize) + Sync,
{
    let spec = options.grid;
    let index = BoundaryIndex::build(
        extract_boundaries(collection, table),
        options.subtract_holes,
    );

    info!(
        "Rasterizing {}x{} grid ({} cells) against {} polygons",
        spec.width,
        spec.height,
        spec.cell_count(),
        index.len()
    );

    // Each row only reads the shared index; the ordered collect is the gather
    let rows: Vec<Vec<char>> = (0..spec.height)
        .into_par_iter()
        .map(|row| {
            let labels = (0..spec.width)
                .map(|col| {
                    index
                        .lookup(spec.cell_coord(row, col))
                        .map_or(options.background, |b| b.label)
                })
                .collect();
            on_row(row);
            labels
        })
        .collect();

    Grid::from_rows(spec.width, rows)
}

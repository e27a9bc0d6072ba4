//! Fixed-size label grid produced by the rasterizer.

use std::collections::BTreeMap;

/// Background label for cells no feature covers
pub const BACKGROUND: char = '.';

/// `height` rows × `width` columns of single-character labels, row 0 north.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Grid with every cell set to `background`
    pub fn filled(width: usize, height: usize, background: char) -> Self {
        Self {
            width,
            height,
            cells: vec![background; width * height],
        }
    }

    /// Assemble a grid from rows gathered in order. Every row must be `width` long.
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<char>>) -> Self {
        let height = rows.len();
        let cells: Vec<char> = rows.into_iter().flatten().collect();
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, label: char) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = label;
        }
    }

    /// Rows top to bottom as strings
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        // One string per row, empty when the grid has no columns
        (0..self.height).map(move |row| {
            self.cells[row * self.width..(row + 1) * self.width]
                .iter()
                .collect()
        })
    }

    /// Number of cells per label
    pub fn label_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.cells {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_grid() {
        let grid = Grid::filled(3, 2, BACKGROUND);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec!["...", "..."]);
    }

    #[test]
    fn test_set_and_counts() {
        let mut grid = Grid::filled(4, 2, BACKGROUND);
        grid.set(1, 3, 'E');
        grid.set(0, 0, 'N');
        grid.set(5, 5, 'X'); // out of range, ignored

        assert_eq!(grid.get(1, 3), Some('E'));
        assert_eq!(grid.get(2, 0), None);

        let counts = grid.label_counts();
        assert_eq!(counts.get(&'.'), Some(&6));
        assert_eq!(counts.get(&'E'), Some(&1));
        assert_eq!(counts.get(&'X'), None);
    }

    #[test]
    fn test_from_rows_keeps_order() {
        let grid = Grid::from_rows(2, vec![vec!['a', 'b'], vec!['c', 'd']]);
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec!["ab", "cd"]);
    }

    #[test]
    fn test_zero_width_grid_keeps_row_count() {
        let grid = Grid::filled(0, 3, BACKGROUND);
        let rows: Vec<String> = grid.rows().collect();
        assert_eq!(rows, vec!["", "", ""]);
        assert!(grid.label_counts().is_empty());
    }
}

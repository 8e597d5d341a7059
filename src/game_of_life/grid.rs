//! Grid representation and utilities for Game of Life

use super::Cell;
use crate::error::{LifeError, Result};
use itertools::iproduct;
use rand::Rng;
use std::fmt;

/// Offsets of the eight Moore neighbours, row-major
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed-size Game of Life grid.
///
/// The shape is set at construction and cannot change; cells live in a flat
/// buffer indexed by `row * width + column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is dead
    pub fn dead(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Dead; height * width],
        }
    }

    /// Create a grid where each cell is independently alive with probability 1/2
    pub fn random<R: Rng + ?Sized>(height: usize, width: usize, rng: &mut R) -> Self {
        let cells = (0..height * width)
            .map(|_| Cell::from(rng.gen_bool(0.5)))
            .collect();
        Self {
            height,
            width,
            cells,
        }
    }

    /// Create a grid from a row-major flat buffer
    pub fn from_cells(height: usize, width: usize, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != height * width {
            return Err(LifeError::CellCountMismatch {
                expected: height * width,
                len: cells.len(),
            });
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Create a grid from nested rows; every row must have the same length
    pub fn from_rows<R, C>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Cell>,
    {
        let mut cells = Vec::new();
        let mut height = 0;
        let mut width = None;

        for (i, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row);
            let len = cells.len() - before;
            match width {
                None => width = Some(len),
                Some(expected) if expected != len => {
                    return Err(LifeError::RaggedRows { row: i, len, expected });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            height,
            width: width.unwrap_or(0),
            cells,
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// (height, width)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Convert 2D coordinates to a flat buffer index
    #[inline]
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.width + column
    }

    #[inline]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.height && column < self.width
    }

    /// Get cell value at coordinates, `None` outside the grid
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if self.contains(row, column) {
            Some(self.cells[self.index(row, column)])
        } else {
            None
        }
    }

    /// Whether the cell at the coordinates is alive; outside the grid is dead
    #[inline]
    pub fn is_alive(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(Cell::is_alive)
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) -> Result<()> {
        if !self.contains(row, column) {
            return Err(self.out_of_bounds(row, column));
        }
        let idx = self.index(row, column);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Row-major view of the cell buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over the rows of the grid
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).map(move |row| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// Count live cells among the (up to) eight Moore neighbours.
    ///
    /// Neighbours outside the grid are not counted; there is no wrap-around.
    /// Coordinates outside the grid are rejected rather than producing a count.
    pub fn count_live_neighbours(&self, row: usize, column: usize) -> Result<u8> {
        if !self.contains(row, column) {
            return Err(self.out_of_bounds(row, column));
        }
        Ok(self.live_neighbours(row, column))
    }

    /// Neighbour count for coordinates already known to be inside the grid
    pub(crate) fn live_neighbours(&self, row: usize, column: usize) -> u8 {
        debug_assert!(self.contains(row, column));

        let mut count = 0;
        for (dr, dc) in NEIGHBOUR_OFFSETS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), column.checked_add_signed(dc))
            else {
                continue;
            };
            if r < self.height && c < self.width && self.cells[self.index(r, c)].is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(row, column)| self.is_alive(row, column))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Debug rendering: one line per row, `#` alive, space dead
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Build a grid from a buffer whose length is known to match the shape
    pub(crate) fn from_parts(height: usize, width: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self {
            height,
            width,
            cells,
        }
    }

    pub(crate) fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    fn out_of_bounds(&self, row: usize, column: usize) -> LifeError {
        LifeError::OutOfBounds {
            row,
            column,
            height: self.height,
            width: self.width,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.to_text_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(Cell::from_pattern_char).collect::<Vec<_>>()),
        )
        .unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::dead(3, 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.cells().len(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_degenerate_grids() {
        let grid = Grid::dead(0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.to_text(), "");

        let grid = Grid::dead(2, 0);
        assert_eq!(grid.rows().count(), 2);
        assert_eq!(grid.to_text(), "\n\n");
    }

    #[test]
    fn test_from_rows() {
        let grid = grid(&["101", "010", "101"]);
        assert_eq!(grid.shape(), (3, 3));
        assert_eq!(grid.living_count(), 5);
        assert_eq!(grid.living_cells()[..2], [(0, 0), (0, 2)]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![Cell::Dead; 3], vec![Cell::Dead; 2]];
        let err = Grid::from_rows(rows).unwrap_err();
        assert!(matches!(err, LifeError::RaggedRows { row: 1, len: 2, expected: 3 }));
    }

    #[test]
    fn test_from_cells_length_checked() {
        assert!(Grid::from_cells(2, 2, vec![Cell::Alive; 4]).is_ok());
        assert!(matches!(
            Grid::from_cells(2, 2, vec![Cell::Alive; 3]),
            Err(LifeError::CellCountMismatch { expected: 4, len: 3 })
        ));
        assert!(matches!(
            Grid::from_cells(0, 5, vec![Cell::Dead]),
            Err(LifeError::CellCountMismatch { expected: 0, len: 1 })
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut grid = Grid::dead(2, 3);
        grid.set(1, 2, Cell::Alive).unwrap();
        assert_eq!(grid.get(1, 2), Some(Cell::Alive));
        assert_eq!(grid.get(2, 0), None);
        assert!(!grid.is_alive(5, 5));
        assert!(grid.set(2, 0, Cell::Alive).is_err());
    }

    #[test]
    fn test_neighbour_counting() {
        let grid = grid(&["111", "101", "111"]);

        // Center cell sees all eight
        assert_eq!(grid.count_live_neighbours(1, 1).unwrap(), 8);
        // Corner sees only three in-bounds neighbours, the center being dead
        assert_eq!(grid.count_live_neighbours(0, 0).unwrap(), 2);
        assert_eq!(grid.count_live_neighbours(0, 1).unwrap(), 4);
    }

    #[test]
    fn test_corner_ignores_out_of_bounds() {
        let grid = grid(&["1111", "1111", "1111"]);
        assert_eq!(grid.count_live_neighbours(0, 0).unwrap(), 3);
        assert_eq!(grid.count_live_neighbours(2, 3).unwrap(), 3);
        assert_eq!(grid.count_live_neighbours(0, 1).unwrap(), 5);
        assert_eq!(grid.count_live_neighbours(1, 1).unwrap(), 8);
    }

    #[test]
    fn test_neighbour_count_out_of_bounds_fails() {
        let grid = Grid::dead(3, 3);
        assert!(matches!(
            grid.count_live_neighbours(3, 0),
            Err(LifeError::OutOfBounds { row: 3, column: 0, .. })
        ));
        assert!(grid.count_live_neighbours(0, 3).is_err());
    }

    #[test]
    fn test_text_rendering() {
        let grid = grid(&["010", "111"]);
        assert_eq!(grid.to_text(), " # \n###\n");
        assert_eq!(format!("{}", grid), grid.to_text());
    }

    #[test]
    fn test_random_grid_is_seeded() {
        let a = Grid::random(16, 16, &mut StdRng::seed_from_u64(7));
        let b = Grid::random(16, 16, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.shape(), (16, 16));
        // 256 fair coin flips are neither all heads nor all tails
        assert!(a.living_count() > 0 && a.living_count() < 256);
    }
}

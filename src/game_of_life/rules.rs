//! Game of Life transition rule (B3/S23)

use super::{Cell, Grid};
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Next state of a cell given its current state and live neighbour count
    pub fn next_state(current: Cell, neighbours: u8) -> Cell {
        match (current, neighbours) {
            (Cell::Alive, 2) | (Cell::Alive, 3) | (Cell::Dead, 3) => Cell::Alive, // Survive or birth
            _ => Cell::Dead,
        }
    }

    /// Compute the next generation into a fresh grid.
    ///
    /// Every neighbour count is read from `current`; the result shares no
    /// storage with it.
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = Grid::dead(current.height(), current.width()).into_cells();
        let width = current.width();

        for (idx, slot) in next.iter_mut().enumerate() {
            let (row, column) = (idx / width, idx % width);
            *slot = Self::next_cell(current, row, column);
        }

        Self::assemble(current, next)
    }

    /// Same as [`evolve`](Self::evolve), with rows computed on the rayon pool
    pub fn evolve_parallel(current: &Grid) -> Grid {
        let mut next = Grid::dead(current.height(), current.width()).into_cells();
        let width = current.width();

        if width > 0 {
            next.par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, cells)| {
                    for (column, slot) in cells.iter_mut().enumerate() {
                        *slot = Self::next_cell(current, row, column);
                    }
                });
        }

        Self::assemble(current, next)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// Neighbour counts for every cell, row-major
    pub fn neighbour_counts(grid: &Grid) -> Vec<u8> {
        (0..grid.height())
            .flat_map(|row| (0..grid.width()).map(move |column| (row, column)))
            .map(|(row, column)| grid.live_neighbours(row, column))
            .collect()
    }

    #[inline]
    fn next_cell(current: &Grid, row: usize, column: usize) -> Cell {
        let neighbours = current.live_neighbours(row, column);
        let state = current.cells()[current.index(row, column)];
        Self::next_state(state, neighbours)
    }

    fn assemble(current: &Grid, cells: Vec<Cell>) -> Grid {
        Grid::from_parts(current.height(), current.width(), cells)
    }
}

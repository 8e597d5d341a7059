//! Simulation engine owning the current generation

use super::{GameOfLifeRules, Grid};
use crate::error::{LifeError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Owns one generation and advances it under the B3/S23 rule.
///
/// The shape is fixed at construction. Callers only ever see the grid through
/// a shared borrow or an owned copy; a replacement grid is moved in whole.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    height: usize,
    width: usize,
    grid: Grid,
    parallel: bool,
}

impl SimulationEngine {
    /// Engine seeded with a random 50/50 grid from the thread RNG
    pub fn new(height: usize, width: usize) -> Self {
        Self::from_grid(Grid::random(height, width, &mut rand::thread_rng()))
    }

    /// Engine seeded with a random 50/50 grid from a fixed seed
    pub fn with_seed(height: usize, width: usize, seed: u64) -> Self {
        Self::from_grid(Grid::random(height, width, &mut StdRng::seed_from_u64(seed)))
    }

    /// Engine taking ownership of `grid`, which must be `height` x `width`
    pub fn with_grid(height: usize, width: usize, grid: Grid) -> Result<Self> {
        Self::check_shape(height, width, &grid)?;
        Ok(Self::from_grid(grid))
    }

    /// Engine whose shape is taken from `grid`
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            height: grid.height(),
            width: grid.width(),
            grid,
            parallel: false,
        }
    }

    /// Compute each generation on the rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Replace the current generation with the next one and return it.
    ///
    /// The next generation is built in a separate buffer from a read-only view
    /// of the current one, then swapped in; the old grid is dropped.
    pub fn advance(&mut self) -> &Grid {
        self.grid = if self.parallel {
            GameOfLifeRules::evolve_parallel(&self.grid)
        } else {
            GameOfLifeRules::evolve(&self.grid)
        };
        &self.grid
    }

    /// Borrow the current generation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the current generation
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Replace the current generation with a new starting pattern
    pub fn set_grid(&mut self, grid: Grid) -> Result<()> {
        Self::check_shape(self.height, self.width, &grid)?;
        self.grid = grid;
        Ok(())
    }

    /// Live Moore neighbours of an in-bounds cell
    pub fn count_live_neighbours(&self, row: usize, column: usize) -> Result<u8> {
        self.grid.count_live_neighbours(row, column)
    }

    pub fn live_count(&self) -> usize {
        self.grid.living_count()
    }

    pub fn is_extinct(&self) -> bool {
        self.grid.is_empty()
    }

    /// Debug rendering of the current generation
    pub fn to_text(&self) -> String {
        self.grid.to_text()
    }

    fn check_shape(height: usize, width: usize, grid: &Grid) -> Result<()> {
        if grid.shape() != (height, width) {
            return Err(LifeError::DimensionMismatch {
                expected_height: height,
                expected_width: width,
                height: grid.height(),
                width: grid.width(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for SimulationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

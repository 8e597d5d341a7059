//! Conway's Game of Life simulation engine
//!
//! A fixed-size grid of dead/alive cells advanced one generation at a time
//! under the B3/S23 rule, plus pattern-file loading and a driver loop for
//! running it.

pub mod config;
pub mod driver;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{Driver, RunBudget, RunSummary, StopHandle};
pub use error::{LifeError, Result};
pub use game_of_life::{Cell, GameOfLifeRules, Grid, SimulationEngine};

//! Game of Life core functionality

pub mod cell;
pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use cell::Cell;
pub use engine::SimulationEngine;
pub use grid::Grid;
pub use io::{
    create_example_patterns, grid_to_pattern, load_pattern_auto, load_pattern_from_file,
    load_patterns_from_directory, parse_pattern, parse_pattern_auto, save_pattern_to_file,
};
pub use rules::GameOfLifeRules;

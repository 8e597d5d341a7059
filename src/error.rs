//! Error types for the simulation engine and pattern loading

use thiserror::Error;

/// Errors produced by the library layer
#[derive(Error, Debug)]
pub enum LifeError {
    /// A supplied grid does not have the shape the engine was declared with
    #[error("Grid is {height}x{width}, expected {expected_height}x{expected_width}")]
    DimensionMismatch {
        expected_height: usize,
        expected_width: usize,
        height: usize,
        width: usize,
    },

    /// Coordinates outside the grid
    #[error("Coordinates ({row}, {column}) out of bounds for {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    },

    /// Rows of a nested grid literal have different lengths
    #[error("Row {row} has length {len}, expected {expected}")]
    RaggedRows { row: usize, len: usize, expected: usize },

    /// A flat cell buffer does not hold `height * width` cells
    #[error("Cell buffer holds {len} cells, expected {expected}")]
    CellCountMismatch { expected: usize, len: usize },

    /// A pattern does not fit in the requested grid
    #[error("Pattern is {lines} lines by {columns} columns, grid is only {height}x{width}")]
    PatternTooLarge {
        lines: usize,
        columns: usize,
        height: usize,
        width: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, LifeError>;

//! Utility functions for display and console output

pub mod display;

pub use display::{Color, ColorOutput, GenerationRecord, GridFormatter};

//! Display utilities for grids and console output

use crate::config::OutputFormat;
use crate::game_of_life::{grid_to_pattern, GameOfLifeRules, Grid};
use serde::Serialize;

/// One generation as written by the JSON output format
#[derive(Debug, Serialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub height: usize,
    pub width: usize,
    pub population: usize,
    pub rows: Vec<String>,
}

impl GenerationRecord {
    pub fn new(generation: usize, grid: &Grid) -> Self {
        Self {
            generation,
            height: grid.height(),
            width: grid.width(),
            population: grid.living_count(),
            rows: grid_to_pattern(grid).lines().map(str::to_owned).collect(),
        }
    }
}

/// Grid formatting utilities
pub struct GridFormatter;

impl GridFormatter {
    /// Format one generation in the configured output format
    pub fn format_generation(
        generation: usize,
        grid: &Grid,
        format: OutputFormat,
    ) -> serde_json::Result<String> {
        Ok(match format {
            OutputFormat::Text => format!(
                "Generation {} (Living: {}):\n{}",
                generation,
                grid.living_count(),
                grid.to_text()
            ),
            OutputFormat::Pattern => grid_to_pattern(grid),
            OutputFormat::Json => serde_json::to_string(&GenerationRecord::new(generation, grid))?,
        })
    }

    /// Format a grid with row and column numbers
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for column in 0..grid.width() {
            output.push_str(&format!("{:2}", column % 10));
        }
        output.push('\n');

        for (row, cells) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", row));
            for cell in cells {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Live neighbour count of every cell, one digit per cell
    pub fn format_neighbour_map(grid: &Grid) -> String {
        let counts = GameOfLifeRules::neighbour_counts(grid);
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));

        for row in 0..grid.height() {
            let start = row * grid.width();
            for count in &counts[start..start + grid.width()] {
                output.push(char::from(b'0' + count));
            }
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

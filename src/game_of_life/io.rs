//! Pattern file I/O for Game of Life grids
//!
//! Format: line `i` is row `i`, character `j` is column `j`. `'1'` marks a live
//! cell; any other character, and any position past the end of a short line
//! or past the last line, is dead.

use super::{Cell, Grid};
use crate::error::{LifeError, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Lines of a pattern, without trailing blank lines
fn pattern_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Parse a pattern into a grid of a fixed shape
pub fn parse_pattern(content: &str, height: usize, width: usize) -> Result<Grid> {
    let lines = pattern_lines(content);
    let columns = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    if lines.len() > height || columns > width {
        return Err(LifeError::PatternTooLarge {
            lines: lines.len(),
            columns,
            height,
            width,
        });
    }

    let mut grid = Grid::dead(height, width);
    for (row, line) in lines.iter().enumerate() {
        for (column, ch) in line.chars().enumerate() {
            grid.set(row, column, Cell::from_pattern_char(ch))?;
        }
    }
    Ok(grid)
}

/// Parse a pattern, sizing the grid to the number of lines and the longest line
pub fn parse_pattern_auto(content: &str) -> Grid {
    let rows: Vec<Vec<Cell>> = pattern_lines(content)
        .into_iter()
        .map(|line| line.chars().map(Cell::from_pattern_char).collect())
        .collect();
    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut cells = Vec::with_capacity(height * width);
    for mut row in rows {
        row.resize(width, Cell::Dead);
        cells.extend(row);
    }
    Grid::from_parts(height, width, cells)
}

/// Load a pattern file into a grid of a fixed shape
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P, height: usize, width: usize) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)?;
    debug!(path = %path.as_ref().display(), height, width, "loading pattern");
    parse_pattern(&content, height, width)
}

/// Load a pattern file, sizing the grid to its contents
pub fn load_pattern_auto<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)?;
    let grid = parse_pattern_auto(&content);
    debug!(
        path = %path.as_ref().display(),
        height = grid.height(),
        width = grid.width(),
        "loaded pattern"
    );
    Ok(grid)
}

/// Convert a grid to the pattern format
pub fn grid_to_pattern(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for row in grid.rows() {
        result.extend(row.iter().map(|cell| cell.to_pattern_char()));
        result.push('\n');
    }

    result
}

/// Save a grid in the pattern format
pub fn save_pattern_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, grid_to_pattern(grid))?;
    Ok(())
}

/// Load every `*.txt` pattern in a directory, sorted by name.
///
/// Files that cannot be read are logged and skipped.
pub fn load_patterns_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Grid)>> {
    let mut patterns = Vec::new();

    for entry in std::fs::read_dir(&dir_path)? {
        let path = entry?.path();

        if !path.is_file() || path.extension().map_or(true, |ext| ext != "txt") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_pattern_auto(&path) {
            Ok(grid) => patterns.push((name, grid)),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable pattern"),
        }
    }

    patterns.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(patterns)
}

/// Gosper glider gun in a 9x36 bounding box
pub const GOSPER_GLIDER_GUN: &str = "\
000000000000000000000000100000000000
000000000000000000000010100000000000
000000000000110000001100000000000011
000000000001000100001100000000000011
110000000010000010001100000000000000
110000000010001011000010100000000000
000000000010000010000000100000000000
000000000001000100000000000000000000
000000000000110000000000000000000000
";

/// Built-in starting patterns, by file stem
pub const EXAMPLE_PATTERNS: [(&str, &str); 5] = [
    ("glider", "00100\n10100\n01100\n00000\n00000\n"),
    ("blinker", "00000\n00000\n01110\n00000\n00000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("beacon", "110000\n110000\n001100\n001100\n"),
    ("gosper_glider_gun", GOSPER_GLIDER_GUN),
];

/// Write the built-in example patterns into a directory
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)?;

    for (name, content) in EXAMPLE_PATTERNS {
        std::fs::write(dir.join(format!("{name}.txt")), content)?;
    }

    Ok(())
}

//! Cell state

/// State of a single grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Character used by the pattern file format
    pub fn from_pattern_char(ch: char) -> Self {
        if ch == '1' {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    pub fn to_pattern_char(self) -> char {
        match self {
            Cell::Alive => '1',
            Cell::Dead => '0',
        }
    }

    /// Character used by the debug text rendering
    pub fn to_text_char(self) -> char {
        match self {
            Cell::Alive => '#',
            Cell::Dead => ' ',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell as u8
    }
}

pub mod generator;
pub mod grid;
pub mod matcher;

use serde::{Deserialize, Serialize};

pub use generator::{DEFAULT_GRID_SIZE, generate_puzzle, normalize_words};
pub use grid::Grid;
pub use matcher::check_word;

/// A cell position: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The cell `steps` cells away in `direction`.
    pub fn step(self, direction: Direction, steps: usize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + steps * dx,
            y: self.y + steps * dy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// Unit vector `(dx, dy)`; words only ever run forward.
    pub const fn delta(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

/// A word committed to the grid, with every cell it covers in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub start: Coord,
    pub direction: Direction,
    pub cells: Vec<Coord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Grid,
    pub size: usize,
    /// Successfully placed words in placement order. Requested words that did
    /// not fit are absent.
    pub words: Vec<String>,
    pub placed_words: Vec<PlacedWord>,
}

impl Puzzle {
    pub fn placed_word(&self, word: &str) -> Option<&PlacedWord> {
        self.placed_words.iter().find(|pw| pw.word == word)
    }
}

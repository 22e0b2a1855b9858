use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Coord, Direction};

pub const NOISE_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Row-major scratch grid owned by a single generation call. Empty cells are
/// `None` until [`GridBuffer::fill_noise`] turns the buffer into a [`Grid`].
pub struct GridBuffer {
    size: usize,
    cells: Vec<Option<char>>,
}

impl GridBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> Option<char> {
        if coord.x >= self.size || coord.y >= self.size {
            return None;
        }
        self.cells[coord.y * self.size + coord.x]
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    /// True when every cell the word would cover is inside the grid and is
    /// either empty or already holds the same letter.
    pub fn can_place(&self, letters: &[char], start: Coord, direction: Direction) -> bool {
        letters.iter().enumerate().all(|(i, &letter)| {
            let coord = start.step(direction, i);
            self.in_bounds(coord)
                && match self.get(coord) {
                    None => true,
                    Some(existing) => existing == letter,
                }
        })
    }

    /// Writes the word and returns the covered cells. Callers check
    /// [`GridBuffer::can_place`] first.
    pub fn place(&mut self, letters: &[char], start: Coord, direction: Direction) -> Vec<Coord> {
        let mut cells = Vec::with_capacity(letters.len());
        for (i, &letter) in letters.iter().enumerate() {
            let coord = start.step(direction, i);
            self.cells[coord.y * self.size + coord.x] = Some(letter);
            cells.push(coord);
        }
        cells
    }

    /// Fills every empty cell with an independent uniform letter and freezes
    /// the result.
    pub fn fill_noise<R: Rng + ?Sized>(self, rng: &mut R) -> Grid {
        let letters = self
            .cells
            .into_iter()
            .map(|cell| {
                cell.unwrap_or_else(|| NOISE_LETTERS[rng.gen_range(0..NOISE_LETTERS.len())] as char)
            })
            .collect();
        Grid {
            size: self.size,
            letters,
        }
    }
}

/// The finished, read-only letter grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    letters: Vec<char>,
}

impl Grid {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> Option<char> {
        if coord.x >= self.size || coord.y >= self.size {
            return None;
        }
        self.letters.get(coord.y * self.size + coord.x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.letters.chunks(self.size.max(1))
    }

    /// The letters spelled by a path; out-of-range cells are skipped.
    pub fn letters_at(&self, cells: &[Coord]) -> String {
        cells.iter().filter_map(|&c| self.get(c)).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

use std::collections::HashSet;
use std::time::Instant;

use log::info;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::categories::Category;
use crate::puzzle::{Coord, Puzzle, check_word, generate_puzzle};

/// Shuffles `words` and keeps the first `count`.
pub fn choose_round_words<R: Rng + ?Sized>(words: &[String], count: usize, rng: &mut R) -> Vec<String> {
    let mut chosen = words.to_vec();
    chosen.shuffle(rng);
    chosen.truncate(count);
    chosen
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    Found(String),
    AlreadyFound(String),
    NoMatch,
}

/// One puzzle from generation until it is won or replaced.
pub struct RoundState {
    pub category: String,
    pub puzzle: Puzzle,
    /// Words found so far, in the order they were found.
    pub found: Vec<String>,
    found_cells: HashSet<Coord>,
    pub started_at: Instant,
    pub finished_at: Option<Instant>,
}

impl RoundState {
    pub fn new<R: Rng + ?Sized>(
        category: &Category,
        words_per_round: usize,
        size: usize,
        rng: &mut R,
    ) -> Self {
        let words = choose_round_words(&category.words, words_per_round, rng);
        let puzzle = generate_puzzle(&words, size, rng);
        if puzzle.words.len() < words.len() {
            info!(
                "placed {} of {} {} words on a {size}x{size} grid",
                puzzle.words.len(),
                words.len(),
                category.name
            );
        }
        Self::from_puzzle(&category.name, puzzle)
    }

    pub fn from_puzzle(category: &str, puzzle: Puzzle) -> Self {
        Self {
            category: category.to_string(),
            puzzle,
            found: Vec::new(),
            found_cells: HashSet::new(),
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    /// Matches a finished gesture against the puzzle and records new finds.
    pub fn submit(&mut self, path: &[Coord]) -> SelectionOutcome {
        let Some(placed) = check_word(path, &self.puzzle.placed_words) else {
            return SelectionOutcome::NoMatch;
        };
        if self.is_found(&placed.word) {
            return SelectionOutcome::AlreadyFound(placed.word.clone());
        }

        self.found.push(placed.word.clone());
        self.found_cells.extend(placed.cells.iter().copied());
        if self.is_won() && self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
        SelectionOutcome::Found(placed.word.clone())
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|w| w == word)
    }

    pub fn is_cell_found(&self, coord: Coord) -> bool {
        self.found_cells.contains(&coord)
    }

    /// Won once every placed word is found. A puzzle with nothing placed is
    /// won from the start.
    pub fn is_won(&self) -> bool {
        self.found_count() == self.puzzle.words.len()
    }

    /// Placed words already found. A word placed twice counts twice once found.
    pub fn found_count(&self) -> usize {
        self.puzzle.words.iter().filter(|w| self.is_found(w)).count()
    }

    pub fn remaining(&self) -> Vec<&str> {
        self.puzzle
            .words
            .iter()
            .filter(|w| !self.is_found(w))
            .map(|w| w.as_str())
            .collect()
    }

    pub fn progress(&self) -> f64 {
        if self.puzzle.words.is_empty() {
            return 1.0;
        }
        self.found_count() as f64 / self.puzzle.words.len() as f64
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self.finished_at {
            Some(end) => end.duration_since(self.started_at).as_secs_f64(),
            None => self.started_at.elapsed().as_secs_f64(),
        }
    }
}

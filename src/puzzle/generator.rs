use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::GridBuffer;
use super::{Coord, Direction, PlacedWord, Puzzle};

pub const DEFAULT_GRID_SIZE: usize = 12;

/// Uppercases, strips all whitespace, drops words that end up empty or longer
/// than `size`, and orders the rest longest first. Equal lengths keep their
/// input order.
pub fn normalize_words<S: AsRef<str>>(words: &[S], size: usize) -> Vec<String> {
    let mut normalized: Vec<String> = words
        .iter()
        .map(|w| {
            w.as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase)
                .collect::<String>()
        })
        .filter(|w| {
            let len = w.chars().count();
            len > 0 && len <= size
        })
        .collect();
    normalized.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    normalized
}

/// Builds a `size` x `size` puzzle from `words`.
///
/// Placement is greedy first-fit: each word (longest first) tries both
/// directions in random order and every start cell in random order, and takes
/// the first spot where it fits. Words that fit nowhere are dropped without
/// error, so `words` in the result may be shorter than the request.
pub fn generate_puzzle<S, R>(words: &[S], size: usize, rng: &mut R) -> Puzzle
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut buffer = GridBuffer::new(size);
    let mut placed_words = Vec::new();

    for word in normalize_words(words, size) {
        match try_place_word(&mut buffer, &word, rng) {
            Some(placed) => placed_words.push(placed),
            None => debug!("no room for {word} on a {size}x{size} grid, dropping it"),
        }
    }

    let grid = buffer.fill_noise(rng);
    let words = placed_words.iter().map(|pw| pw.word.clone()).collect();

    Puzzle {
        grid,
        size,
        words,
        placed_words,
    }
}

fn try_place_word<R: Rng + ?Sized>(
    buffer: &mut GridBuffer,
    word: &str,
    rng: &mut R,
) -> Option<PlacedWord> {
    let size = buffer.size();
    let letters: Vec<char> = word.chars().collect();

    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    for direction in directions {
        let mut positions: Vec<Coord> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Coord::new(x, y)))
            .collect();
        positions.shuffle(rng);

        let start = positions
            .into_iter()
            .find(|&start| buffer.can_place(&letters, start, direction));

        if let Some(start) = start {
            let cells = buffer.place(&letters, start, direction);
            debug!(
                "placed {word} {} at ({}, {})",
                direction.as_str(),
                start.x,
                start.y
            );
            return Some(PlacedWord {
                word: word.to_string(),
                start,
                direction,
                cells,
            });
        }
    }

    None
}

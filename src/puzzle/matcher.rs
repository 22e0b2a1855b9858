use super::{Coord, PlacedWord};

/// Finds the placed word whose cells equal `path`, read forwards or
/// backwards. The first match in `placed_words` order wins.
pub fn check_word<'a>(path: &[Coord], placed_words: &'a [PlacedWord]) -> Option<&'a PlacedWord> {
    placed_words.iter().find(|pw| {
        pw.cells.len() == path.len()
            && (pw.cells.iter().eq(path.iter()) || pw.cells.iter().eq(path.iter().rev()))
    })
}

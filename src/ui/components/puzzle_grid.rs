use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use stevio::puzzle::Coord;
use stevio::session::round::RoundState;
use stevio::session::selection::Selection;

use crate::ui::layout::GridGeometry;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Plain,
    Found,
    Selected,
    Cursor,
}

pub struct PuzzleGrid<'a> {
    round: &'a RoundState,
    selection: &'a Selection,
    cursor: Option<Coord>,
    theme: &'a Theme,
}

impl<'a> PuzzleGrid<'a> {
    pub fn new(
        round: &'a RoundState,
        selection: &'a Selection,
        cursor: Option<Coord>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            round,
            selection,
            cursor,
            theme,
        }
    }

    // The live selection draws over found cells; the cursor draws over both.
    fn cell_state(&self, coord: Coord) -> CellState {
        if self.cursor == Some(coord) {
            CellState::Cursor
        } else if self.selection.contains(coord) {
            CellState::Selected
        } else if self.round.is_cell_found(coord) {
            CellState::Found
        } else {
            CellState::Plain
        }
    }
}

impl Widget for PuzzleGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let grid = &self.round.puzzle.grid;

        let block = Block::bordered()
            .title(" Today's Puzzle ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        block.render(area, buf);

        let geometry = GridGeometry::new(area, grid.size());

        for (y, row) in grid.rows().enumerate() {
            for (x, &letter) in row.iter().enumerate() {
                let coord = Coord::new(x, y);
                let Some((col, row_pos)) = geometry.letter_position(coord) else {
                    continue;
                };
                let style = match self.cell_state(coord) {
                    CellState::Plain => Style::default().fg(colors.cell_fg()).bg(colors.bg()),
                    CellState::Found => Style::default()
                        .fg(colors.found_fg())
                        .bg(colors.found_bg()),
                    CellState::Selected => Style::default()
                        .fg(colors.selected_fg())
                        .bg(colors.selected_bg())
                        .add_modifier(Modifier::BOLD),
                    CellState::Cursor => Style::default()
                        .fg(colors.cursor_fg())
                        .bg(colors.cursor_bg())
                        .add_modifier(Modifier::BOLD),
                };
                buf.set_string(col - 1, row_pos, format!(" {letter} "), style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use stevio::puzzle::generate_puzzle;

    fn round() -> RoundState {
        let mut rng = SmallRng::seed_from_u64(12);
        let puzzle = generate_puzzle(&["PRESS", "INK"], 6, &mut rng);
        RoundState::from_puzzle("vintage", puzzle)
    }

    #[test]
    fn cursor_beats_selection_beats_found() {
        let mut round = round();
        let press = round.puzzle.placed_word("PRESS").unwrap().cells.clone();
        round.submit(&press);

        let theme = Theme::default();
        let mut selection = Selection::new();
        selection.begin(press[0]);
        let grid = PuzzleGrid::new(&round, &selection, Some(press[1]), &theme);

        assert_eq!(grid.cell_state(press[0]), CellState::Selected);
        assert_eq!(grid.cell_state(press[1]), CellState::Cursor);
        assert_eq!(grid.cell_state(press[2]), CellState::Found);
    }

    #[test]
    fn renders_every_letter() {
        let round = round();
        let theme = Theme::default();
        let selection = Selection::new();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        PuzzleGrid::new(&round, &selection, None, &theme).render(area, &mut buf);

        let geometry = GridGeometry::new(area, 6);
        for (y, row) in round.puzzle.grid.rows().enumerate() {
            for (x, letter) in row.iter().enumerate() {
                let (col, r) = geometry.letter_position(Coord::new(x, y)).unwrap();
                assert_eq!(buf[(col, r)].symbol(), letter.to_string());
            }
        }
    }
}

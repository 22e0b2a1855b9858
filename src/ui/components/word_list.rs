use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use stevio::session::round::RoundState;

use crate::ui::theme::Theme;

pub struct WordList<'a> {
    round: &'a RoundState,
    theme: &'a Theme,
}

impl<'a> WordList<'a> {
    pub fn new(round: &'a RoundState, theme: &'a Theme) -> Self {
        Self { round, theme }
    }
}

pub fn discovered_label(found: usize, total: usize) -> String {
    format!("{found} of {total} discovered")
}

impl Widget for WordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let puzzle = &self.round.puzzle;

        let mut lines = vec![
            Line::from(Span::styled(
                discovered_label(self.round.found_count(), puzzle.words.len()),
                Style::default()
                    .fg(colors.text_dim())
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];

        for word in &puzzle.words {
            let line = if self.round.is_found(word) {
                Line::from(Span::styled(
                    format!("  {word}"),
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::CROSSED_OUT),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {word}"),
                    Style::default().fg(colors.fg()),
                ))
            };
            lines.push(line);
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "How to Play",
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "Drag across letters with the mouse, or move with the arrows and press \
             space at each end. Words run horizontally or vertically.",
            Style::default().fg(colors.text_dim()),
        )));

        let block = Block::bordered()
            .title(" Words to Find ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

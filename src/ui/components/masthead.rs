use chrono::{Local, NaiveDate};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// Newspaper-style header: title, tagline, and the edition line.
pub struct Masthead<'a> {
    edition: Option<String>,
    theme: &'a Theme,
}

impl<'a> Masthead<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            edition: None,
            theme,
        }
    }

    pub fn edition(mut self, category_title: &str, issue: u32) -> Self {
        self.edition = Some(format!("{category_title} Edition \u{2022} Vol. I, No. {issue}"));
        self
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

impl Widget for Masthead<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let base = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

        let mut dateline = format_date(Local::now().date_naive());
        if let Some(edition) = &self.edition {
            dateline = format!("{dateline} \u{2022} {edition}");
        }

        let lines = vec![
            Line::from(Span::styled(
                "S T E V I O",
                base.fg(colors.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "The Daily Word Search",
                base.add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(dateline, base.fg(colors.text_dim()))),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(base)
            .render(area, buf);
    }
}

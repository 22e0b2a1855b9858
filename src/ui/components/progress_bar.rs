use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Found-words meter: a filled bar with a "found/total" label in the middle.
pub struct ProgressBar<'a> {
    label: String,
    found: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, found: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            found: found.min(total),
            total,
            theme,
        }
    }

    fn filled_width(&self, width: u16) -> u16 {
        if self.total == 0 {
            return width;
        }
        (self.found * width as usize / self.total) as u16
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled = inner.x + self.filled_width(inner.width);
        for x in inner.x..inner.x + inner.width {
            let style = if x < filled {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let counts = format!("{}/{}", self.found, self.total);
        let label_x = inner.x + inner.width.saturating_sub(counts.len() as u16) / 2;
        buf.set_string(label_x, inner.y, &counts, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_proportional() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new("Found", 2, 8, &theme).filled_width(16), 4);
        assert_eq!(ProgressBar::new("Found", 9, 8, &theme).filled_width(16), 16);
        assert_eq!(ProgressBar::new("Found", 0, 0, &theme).filled_width(16), 16);
    }

    #[test]
    fn renders_counts_label() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new("Found", 3, 8, &theme).render(area, &mut buf);
        let row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("3/8"));
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;

use stevio::puzzle::Coord;

/// Terminal columns per grid cell: the letter with a space either side.
pub const CELL_WIDTH: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥80 cols: grid + word list sidebar
    Narrow, // <80 cols: grid only, word list in footer line
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(7),
                Constraint::Length(3),
            ])
            .split(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                sidebar: Some(horizontal[1]),
                footer: vertical[2],
                tier,
            }
        } else {
            Self {
                header: vertical[0],
                main: vertical[1],
                sidebar: None,
                footer: vertical[2],
                tier,
            }
        }
    }
}

/// Where each grid cell lands on screen inside a bordered grid panel. Shared by
/// drawing and mouse hit testing so both agree on cell positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub left: u16,
    pub top: u16,
    pub size: usize,
    pub visible: Rect,
}

impl GridGeometry {
    pub fn new(panel: Rect, size: usize) -> Self {
        let inner = Block::bordered().inner(panel);
        let grid_w = (size as u16).saturating_mul(CELL_WIDTH);
        let grid_h = size as u16;
        let left = inner.x + inner.width.saturating_sub(grid_w) / 2;
        let top = inner.y + inner.height.saturating_sub(grid_h) / 2;
        Self {
            left,
            top,
            size,
            visible: inner,
        }
    }

    /// Screen position of the letter in `coord`, if it is on screen.
    pub fn letter_position(&self, coord: Coord) -> Option<(u16, u16)> {
        let col = self.left + (coord.x as u16) * CELL_WIDTH + 1;
        let row = self.top + coord.y as u16;
        let v = self.visible;
        (col < v.x + v.width && row < v.y + v.height).then_some((col, row))
    }

    pub fn cell_at(&self, col: u16, row: u16) -> Option<Coord> {
        if col < self.left || row < self.top {
            return None;
        }
        let x = ((col - self.left) / CELL_WIDTH) as usize;
        let y = (row - self.top) as usize;
        if x >= self.size || y >= self.size {
            return None;
        }
        let coord = Coord::new(x, y);
        self.letter_position(coord).map(|_| coord)
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 44;
    const MIN_POPUP_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

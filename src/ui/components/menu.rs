use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NewPuzzle,
    Resume,
    Settings,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem {
        key: 'n',
        label: "New Puzzle",
        description: "Start a fresh puzzle from a themed word list",
        action: MenuAction::NewPuzzle,
    },
    MenuItem {
        key: 'r',
        label: "Resume",
        description: "Return to the puzzle in progress",
        action: MenuAction::Resume,
    },
    MenuItem {
        key: 'c',
        label: "Settings",
        description: "Grid size, words per puzzle, theme, category",
        action: MenuAction::Settings,
    },
    MenuItem {
        key: 'q',
        label: "Quit",
        description: "Put the paper down",
        action: MenuAction::Quit,
    },
];

pub struct Menu<'a> {
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { selected: 0, theme }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = MENU_ITEMS.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        MENU_ITEMS[self.selected].action
    }

    pub fn action_for_key(key: char) -> Option<MenuAction> {
        MENU_ITEMS
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.action)
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "STEVIO",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "A Digital Amusement",
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::ITALIC),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(MENU_ITEMS.iter().map(|_| Constraint::Length(3)))
            .split(layout[2]);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, item.label),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.text_dim()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

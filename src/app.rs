use std::path::PathBuf;

use log::{info, warn};
use rand::Rng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;

use stevio::categories;
use stevio::config::{
    Config, MAX_GRID_SIZE, MAX_WORDS_PER_ROUND, MIN_GRID_SIZE, MIN_WORDS_PER_ROUND,
};
use stevio::puzzle::Coord;
use stevio::session::round::{RoundState, SelectionOutcome};
use stevio::session::selection::Selection;

use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::layout::{AppLayout, GridGeometry};
use crate::ui::theme::Theme;

pub const SETTINGS_FIELDS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Playing,
    Won,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    /// Effective settings for this run, command-line overrides included.
    pub config: Config,
    /// Settings as stored on disk. Only edits made on the settings screen
    /// reach it, so one-run overrides are never saved.
    pub saved_config: Config,
    pub config_path: PathBuf,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub round: Option<RoundState>,
    pub selection: Selection,
    pub cursor: Coord,
    /// Space has anchored a keyboard selection that follows the cursor.
    pub keyboard_selecting: bool,
    pub mouse_dragging: bool,
    pub last_outcome: Option<SelectionOutcome>,
    pub issue: u32,
    pub viewport: Rect,
    pub settings_selected: usize,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        saved_config: Config,
        theme: &'static Theme,
        rng: SmallRng,
    ) -> Self {
        Self {
            screen: AppScreen::Menu,
            config,
            saved_config,
            config_path: Config::config_path(),
            theme,
            menu: Menu::new(theme),
            round: None,
            selection: Selection::new(),
            cursor: Coord::new(0, 0),
            keyboard_selecting: false,
            mouse_dragging: false,
            last_outcome: None,
            issue: 1,
            viewport: Rect::new(0, 0, 80, 24),
            settings_selected: 0,
            should_quit: false,
            rng,
        }
    }

    pub fn start_round(&mut self) {
        let category = match categories::resolve(&self.config.category, &mut self.rng) {
            Ok(category) => Some(category),
            Err(err) => {
                warn!("{err}; picking a random category");
                categories::random_category(&mut self.rng)
            }
        };
        let Some(category) = category else {
            warn!("no categories available");
            return;
        };

        let round = RoundState::new(
            category,
            self.config.words_per_round,
            self.config.grid_size,
            &mut self.rng,
        );
        info!(
            "new {} puzzle with {} words",
            round.category,
            round.puzzle.words.len()
        );

        self.round = Some(round);
        self.issue = self.rng.gen_range(1..=999);
        self.cursor = Coord::new(0, 0);
        self.reset_gesture();
        self.last_outcome = None;
        self.screen = AppScreen::Playing;
    }

    fn reset_gesture(&mut self) {
        self.selection.clear();
        self.keyboard_selecting = false;
        self.mouse_dragging = false;
    }

    pub fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::NewPuzzle => self.start_round(),
            MenuAction::Resume => self.resume(),
            MenuAction::Settings => self.go_to_settings(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    pub fn resume(&mut self) {
        match &self.round {
            Some(round) if !round.is_won() => self.screen = AppScreen::Playing,
            _ => self.start_round(),
        }
    }

    pub fn go_to_menu(&mut self) {
        self.reset_gesture();
        self.menu.selected = 0;
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn leave_settings(&mut self) {
        if let Err(err) = self.saved_config.save_to(&self.config_path) {
            warn!("could not save config: {err:#}");
        }
        self.go_to_menu();
    }

    fn grid_size(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.puzzle.size)
    }

    pub fn grid_geometry(&self) -> Option<GridGeometry> {
        let round = self.round.as_ref()?;
        let layout = AppLayout::new(self.viewport);
        Some(GridGeometry::new(layout.main, round.puzzle.size))
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let size = self.grid_size();
        if size == 0 {
            return;
        }
        let max = size as isize - 1;
        let x = (self.cursor.x as isize + dx).clamp(0, max) as usize;
        let y = (self.cursor.y as isize + dy).clamp(0, max) as usize;
        self.cursor = Coord::new(x, y);
        if self.keyboard_selecting {
            self.selection.drag_to(self.cursor);
        }
    }

    /// First press anchors a selection at the cursor, second press submits it.
    pub fn toggle_select(&mut self) {
        if self.keyboard_selecting {
            self.submit_selection();
        } else {
            self.selection.begin(self.cursor);
            self.keyboard_selecting = true;
        }
    }

    pub fn cancel_selection(&mut self) {
        self.reset_gesture();
    }

    pub fn submit_selection(&mut self) {
        let path = self.selection.take();
        self.keyboard_selecting = false;
        self.mouse_dragging = false;

        let Some(round) = self.round.as_mut() else {
            return;
        };
        let outcome = round.submit(&path);
        let won = matches!(outcome, SelectionOutcome::Found(_)) && round.is_won();
        self.last_outcome = Some(outcome);
        if won {
            self.screen = AppScreen::Won;
        }
    }

    pub fn mouse_down(&mut self, col: u16, row: u16) {
        let Some(coord) = self.grid_geometry().and_then(|g| g.cell_at(col, row)) else {
            return;
        };
        self.keyboard_selecting = false;
        self.selection.begin(coord);
        self.mouse_dragging = true;
        self.cursor = coord;
    }

    pub fn mouse_drag(&mut self, col: u16, row: u16) {
        if !self.mouse_dragging {
            return;
        }
        let Some(coord) = self.grid_geometry().and_then(|g| g.cell_at(col, row)) else {
            return;
        };
        // Fast drags can skip cells, so fall back to the straight line.
        if !self.selection.extend(coord) {
            self.selection.drag_to(coord);
        }
        self.cursor = coord;
    }

    pub fn mouse_up(&mut self) {
        if self.mouse_dragging {
            self.submit_selection();
        }
    }

    pub fn selection_preview(&self) -> String {
        match &self.round {
            Some(round) => round.puzzle.grid.letters_at(self.selection.cells()),
            None => String::new(),
        }
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => self.config.grid_size = (self.config.grid_size + 1).min(MAX_GRID_SIZE),
            1 => {
                self.config.words_per_round =
                    (self.config.words_per_round + 1).min(MAX_WORDS_PER_ROUND)
            }
            2 => self.cycle_theme(true),
            3 => self.cycle_category(true),
            _ => {}
        }
        self.keep_setting();
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.grid_size = self.config.grid_size.saturating_sub(1).max(MIN_GRID_SIZE)
            }
            1 => {
                self.config.words_per_round = self
                    .config
                    .words_per_round
                    .saturating_sub(1)
                    .max(MIN_WORDS_PER_ROUND)
            }
            2 => self.cycle_theme(false),
            3 => self.cycle_category(false),
            _ => {}
        }
        self.keep_setting();
    }

    /// Copies the field under the settings cursor into the config that gets saved.
    fn keep_setting(&mut self) {
        match self.settings_selected {
            0 => self.saved_config.grid_size = self.config.grid_size,
            1 => self.saved_config.words_per_round = self.config.words_per_round,
            2 => self.saved_config.theme = self.config.theme.clone(),
            3 => self.saved_config.category = self.config.category.clone(),
            _ => {}
        }
    }

    fn cycle_theme(&mut self, forward: bool) {
        let themes = Theme::available_themes();
        self.config.theme = cycle(&themes, &self.config.theme, forward);
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let mut options = vec![categories::RANDOM.to_string()];
        options.extend(categories::names());
        self.config.category = cycle(&options, &self.config.category, forward);
    }
}

fn cycle(options: &[String], current: &str, forward: bool) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let next = match options.iter().position(|o| o == current) {
        Some(idx) if forward => (idx + 1) % options.len(),
        Some(idx) => (idx + options.len() - 1) % options.len(),
        None => 0,
    };
    options[next].clone()
}

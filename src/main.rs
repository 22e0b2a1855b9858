mod app;
mod event;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use stevio::categories;
use stevio::config::Config;
use stevio::logging::init_logger;
use stevio::puzzle::Puzzle;
use stevio::session::round::{RoundState, SelectionOutcome};

use app::{App, AppScreen, SETTINGS_FIELDS};
use event::{AppEvent, EventHandler};
use ui::components::masthead::Masthead;
use ui::components::menu::Menu;
use ui::components::progress_bar::ProgressBar;
use ui::components::puzzle_grid::PuzzleGrid;
use ui::components::word_list::{WordList, discovered_label};
use ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "stevio", version, about = "The daily word search, in your terminal")]
struct Cli {
    #[arg(short, long, help = "Grid size (cells per side)")]
    size: Option<usize>,

    #[arg(short, long, help = "Words per puzzle")]
    words: Option<usize>,

    #[arg(short, long, help = "Word category, or \"random\"")]
    category: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Seed for reproducible puzzles")]
    seed: Option<u64>,

    #[arg(long, help = "Print one puzzle as text and exit")]
    print: bool,

    #[arg(long, help = "Print one puzzle as JSON and exit")]
    json: bool,

    #[arg(long, help = "List the word categories and exit")]
    list_categories: bool,

    #[arg(long, help = "Log debug output to stderr")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    if cli.list_categories {
        for category in categories::all() {
            println!("{:<10} {}", category.name, category.words.join(", "));
        }
        return Ok(());
    }

    let saved_config = Config::load().unwrap_or_else(|err| {
        log::warn!("ignoring unreadable config: {err:#}");
        Config::default()
    });
    let mut config = saved_config.clone();
    apply_overrides(&mut config, &cli)?;
    config.validate()?;

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    if cli.print || cli.json {
        let category = categories::resolve(&config.category, &mut rng)?;
        let round = RoundState::new(category, config.words_per_round, config.grid_size, &mut rng);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&round.puzzle)?);
        } else {
            print!("{}", render_plain(&category.title(), &round.puzzle));
        }
        return Ok(());
    }

    let theme = ui::theme::Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
    let mut app = App::new(config, saved_config, theme, rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.viewport = Rect::new(0, 0, size.width, size.height);

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Layers command-line flags over the loaded config for this run only.
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(size) = cli.size {
        config.grid_size = size;
    }
    if let Some(words) = cli.words {
        config.words_per_round = words;
    }
    match &cli.category {
        // Unknown names on the command line are fatal; stale config values are not.
        Some(category) if category.eq_ignore_ascii_case(categories::RANDOM) => {
            config.category = categories::RANDOM.to_string();
        }
        Some(category) => config.category = categories::find(category)?.name.clone(),
        None => config.normalize_category(&categories::names()),
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    Ok(())
}

fn render_plain(category_title: &str, puzzle: &Puzzle) -> String {
    let mut out = format!("{category_title} Edition\n\n{}\n", puzzle.grid);
    out.push_str("Words to find:\n");
    for word in &puzzle.words {
        out.push_str(&format!("  {word}\n"));
    }
    out
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Resize(w, h) => app.viewport = Rect::new(0, 0, w, h),
            AppEvent::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Playing => handle_playing_key(app, key),
        AppScreen::Won => handle_won_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.run_menu_action(app.menu.selected_action()),
        KeyCode::Char(ch) => {
            if let Some(action) = Menu::action_for_key(ch) {
                app.run_menu_action(action);
            }
        }
        _ => {}
    }
}

fn handle_playing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.selection.is_empty() {
                app.go_to_menu();
            } else {
                app.cancel_selection();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_select(),
        KeyCode::Char('n') => app.start_round(),
        KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_won_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char(' ') => app.start_round(),
        KeyCode::Esc | KeyCode::Char('m') => app.go_to_menu(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_FIELDS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != AppScreen::Playing {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Playing => render_playing(frame, app),
        AppScreen::Won => {
            render_playing(frame, app);
            render_won(frame, app);
        }
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::new(area);
    frame.render_widget(Masthead::new(app.theme), layout.header);

    let menu_area = ui::layout::centered_rect(50, 70, layout.main);
    frame.render_widget(&app.menu, menu_area);
}

fn render_playing(frame: &mut ratatui::Frame, app: &App) {
    let Some(round) = &app.round else {
        return;
    };
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = AppLayout::new(area);

    let category_title = categories::find(&round.category)
        .map(|c| c.title())
        .unwrap_or_else(|_| round.category.clone());
    frame.render_widget(
        Masthead::new(app.theme).edition(&category_title, app.issue),
        layout.header,
    );

    let cursor = (app.screen == AppScreen::Playing && !app.mouse_dragging).then_some(app.cursor);
    frame.render_widget(
        PuzzleGrid::new(round, &app.selection, cursor, app.theme),
        layout.main,
    );

    if let Some(sidebar) = layout.sidebar {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(sidebar);
        frame.render_widget(WordList::new(round, app.theme), parts[0]);
        frame.render_widget(
            ProgressBar::new(
                "Discovered",
                round.found_count(),
                round.puzzle.words.len(),
                app.theme,
            ),
            parts[1],
        );
    }

    let status = status_line(app, round);
    let remaining = format!(
        "{}: {}",
        discovered_label(round.found_count(), round.puzzle.words.len()),
        round.remaining().join(" ")
    );
    let mut hints = vec![status.as_str()];
    // Narrow terminals have no word list panel
    if !layout.tier.show_sidebar() {
        hints.push(&remaining);
    }
    hints.extend([
        "[arrows] Move",
        "[space] Select",
        "[esc] Cancel",
        "[n] New puzzle",
        "[q] Menu",
    ]);

    let footer_lines: Vec<Line> = pack_hint_lines(&hints, layout.footer.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_dim()))))
        .collect();
    let footer = Paragraph::new(footer_lines).block(
        Block::bordered().border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(footer, layout.footer);
}

fn status_line(app: &App, round: &RoundState) -> String {
    if !app.selection.is_empty() {
        return format!("Selecting: {}", app.selection_preview());
    }
    match &app.last_outcome {
        Some(SelectionOutcome::Found(word)) => format!("Found {word}!"),
        Some(SelectionOutcome::AlreadyFound(word)) => format!("{word} is already found"),
        Some(SelectionOutcome::NoMatch) => "No word there".to_string(),
        None => format!("Category: {}", round.category),
    }
}

fn render_won(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let popup = ui::layout::centered_rect(40, 40, area);

    frame.render_widget(Clear, popup);
    let block = Block::bordered()
        .title(" Puzzle Solved ")
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let elapsed = app.round.as_ref().map_or(0.0, |r| r.elapsed_secs());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "EXTRA! EXTRA!",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Puzzle Solved!",
            Style::default().fg(colors.fg()).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Every word discovered in {}:{:02}. Well done, dear reader.",
                elapsed as u64 / 60,
                elapsed as u64 % 60
            ),
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[n] Another puzzle  [m] Menu  [q] Quit",
            Style::default().fg(colors.accent()),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .render(inner, frame.buffer_mut());
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: [(&str, String); SETTINGS_FIELDS] = [
        ("Grid Size", format!("{0} x {0}", app.config.grid_size)),
        ("Words per Puzzle", app.config.words_per_round.to_string()),
        ("Theme", app.config.theme.clone()),
        ("Category", app.config.category.clone()),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    Paragraph::new(Line::from(Span::styled(
        "  Arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_dim()),
    )))
    .render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)))
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = if is_selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let value_style = Style::default().fg(if is_selected {
            colors.fg()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    Paragraph::new(Line::from(Span::styled(
        "  Changes apply to the next puzzle",
        Style::default().fg(colors.text_dim()),
    )))
    .render(layout[3], frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use stevio::puzzle::generate_puzzle;

    #[test]
    fn plain_render_lists_grid_and_words() {
        let mut rng = SmallRng::seed_from_u64(9);
        let puzzle = generate_puzzle(&["ink", "press"], 6, &mut rng);
        let text = render_plain("Vintage", &puzzle);

        assert!(text.starts_with("Vintage Edition\n\n"));
        assert_eq!(text.lines().filter(|l| l.len() == 11).count(), 6);
        assert!(text.ends_with("Words to find:\n  PRESS\n  INK\n"));
    }

    #[test]
    fn category_flag_is_stored_by_its_canonical_name() {
        let mut config = Config::default();
        let cli = Cli::parse_from(["stevio", "--category", "Coffee", "--size", "7"]);
        apply_overrides(&mut config, &cli).unwrap();
        assert_eq!(config.category, "coffee");
        assert_eq!(config.grid_size, 7);

        let cli = Cli::parse_from(["stevio", "--category", "RANDOM"]);
        apply_overrides(&mut config, &cli).unwrap();
        assert_eq!(config.category, categories::RANDOM);

        let cli = Cli::parse_from(["stevio", "--category", "sports"]);
        assert!(apply_overrides(&mut config, &cli).is_err());
    }

    #[test]
    fn stale_config_category_is_normalized() {
        let mut config = Config {
            category: "NATURE".to_string(),
            ..Config::default()
        };
        apply_overrides(&mut config, &Cli::parse_from(["stevio"])).unwrap();
        assert_eq!(config.category, "nature");

        config.category = "sports".to_string();
        apply_overrides(&mut config, &Cli::parse_from(["stevio"])).unwrap();
        assert_eq!(config.category, categories::RANDOM);
    }

    #[test]
    fn cli_parses_print_flags() {
        let cli = Cli::parse_from(["stevio", "--print", "--size", "10", "--seed", "4"]);
        assert!(cli.print);
        assert_eq!(cli.size, Some(10));
        assert_eq!(cli.seed, Some(4));
        assert!(!cli.json);
    }
}

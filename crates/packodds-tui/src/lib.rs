mod app;
mod ui;

pub use app::{App, AppOptions};

use app::InputMode;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use packodds_config::Catalog;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

pub fn run(catalog: Catalog, options: AppOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, options);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('?') => app.toggle_help(),
                    KeyCode::Char('j') | KeyCode::Down => app.next(),
                    KeyCode::Char('k') | KeyCode::Up => app.previous(),
                    KeyCode::Char('l') | KeyCode::Right => app.next_packet(),
                    KeyCode::Char('h') | KeyCode::Left => app.previous_packet(),
                    KeyCode::Char('a') => app.toggle_grouping(),
                    KeyCode::Char('/') => app.start_filter(),
                    KeyCode::Tab => app.switch_tab(),
                    KeyCode::Esc => app.cancel_filter(),
                    _ => {}
                },
                InputMode::Filtering => match key.code {
                    KeyCode::Enter => app.confirm_filter(),
                    KeyCode::Esc => app.cancel_filter(),
                    KeyCode::Backspace => app.input_backspace(),
                    KeyCode::Char(c) => app.input_char(c),
                    _ => {}
                },
                InputMode::ShowingHelp => match key.code {
                    KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.toggle_help(),
                    _ => {}
                },
            }
        }
    }
}

mod app;
mod config;
mod content;
mod games;
mod logging;
mod nav;
mod timer;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use app::App;
use config::{Config, DEFAULT_CONFIG_PATH};

/// Upper bound on how long the loop sleeps waiting for a key.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load_or_default(&config_path)?;
    logging::init(config.log_file.as_deref())?;

    let content = match &config.content_dir {
        Some(dir) => content::load_content(dir)?,
        None => content::builtin()?,
    };
    log::info!(
        "{} puzzles, {} chapters, {} hidden items",
        content.puzzles.len(),
        content.chapters.len(),
        content.items.len()
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(content, config);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    println!("\n🌺 Happy Onam! Maveli will be back next year.\n");
    Ok(())
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last = Instant::now();

    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = app.until_next_timer().map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        let key = if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
                _ => None,
            }
        } else {
            None
        };

        let now = Instant::now();
        app.step(now - last, key);
        last = now;
    }

    log::info!("quitting");
    Ok(())
}

//! rmdex - Rick and Morty catalog browser
//!
//! A terminal application for browsing the public Rick and Morty character
//! catalog. Features include name and status filters, pagination, favorites
//! persisted between sessions, and per-character episode details.

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use rmdex::application::{App, AppMode, Coordinator, CoordinatorOptions, Tasks};
use rmdex::infrastructure::{init_logging, AppConfig, FileFavoriteStore, HttpCatalogClient};
use rmdex::presentation::{install_panic_hook, render_ui, restore_terminal, InputHandler};

/// How long the event loop waits for a key before checking background work.
const TICK: Duration = Duration::from_millis(100);

/// Entry point for the rmdex terminal catalog browser.
///
/// Loads configuration, sets up logging, wires the catalog client and the
/// favorites store into the coordinator, and runs the terminal event loop
/// until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_logging(&config.log_file)?;
    tracing::info!(
        api_url = %config.api_url,
        favorites_file = %config.favorites_file.display(),
        "rmdex starting"
    );

    let api = Arc::new(HttpCatalogClient::new(config.api_url.clone()));
    let store = FileFavoriteStore::new(&config.favorites_file);
    let coordinator = Coordinator::new(
        api,
        Box::new(store),
        CoordinatorOptions::from(&config),
        Tasks::threaded(),
    );
    let mut app = App::new(coordinator, Tasks::threaded());

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    restore_terminal(terminal.backend_mut())?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }
    tracing::info!("rmdex stopped");

    Ok(())
}

/// Main application event loop.
///
/// Applies finished background fetches, redraws, and dispatches key presses.
/// Continues until the user presses 'q' while browsing or Ctrl+C anywhere.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.poll_background();
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                    KeyCode::Char('q') if app.mode == AppMode::Browse => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}

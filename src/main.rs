//! barback - a terminal cocktail recipe browser.
//!
//! A static recipe document is fetched once at startup through an
//! offline-capable asset cache, then browsed through three view modes:
//! search (category filters plus free-text query), my bar (what can I make
//! from the ingredients I own) and favorites. Favorites and owned
//! ingredients persist across sessions.

mod app;
mod cache;
mod config;
mod filter;
mod ingredients;
mod models;
mod persist;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--dump-ingredients" {
        return dump_ingredients().await;
    }

    // Initialize logging
    init_tracing();
    info!("barback starting");

    // Create app, prime the offline cache, then load the recipe store.
    // Rendering waits for the one-time startup fetch; a failure is logged
    // and leaves the UI running on an empty store.
    let mut app = App::new()?;
    app.prime_offline_cache().await;
    if let Err(e) = app.load_recipes().await {
        error!(error = %e, "Failed to load recipe data");
        app.load_error = Some("Could not load recipes (offline with empty cache?)".to_string());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("barback shutting down");
    Ok(())
}

/// Dump the normalized ingredient frequency table to stdout as JSON
async fn dump_ingredients() -> Result<()> {
    use std::path::PathBuf;

    let config = config::Config::load()?;
    let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
    let asset_cache = cache::AssetCache::new(cache_dir, &config.base_url())?;

    eprintln!("Fetching recipe document...");
    let body = asset_cache.fetch(app::RECIPES_PATH).await?;
    let recipes: Vec<models::Recipe> = serde_json::from_slice(&body)?;
    eprintln!("Found {} recipes", recipes.len());

    #[derive(Serialize)]
    struct IngredientRow {
        name: String,
        count: usize,
    }

    let mut rows: Vec<IngredientRow> = ingredients::ingredient_counts(&recipes)
        .into_iter()
        .map(|(name, count)| IngredientRow { name, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    println!("{}", serde_json::to_string_pretty(&rows)?);
    eprintln!("Done! {} distinct ingredients.", rows.len());
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

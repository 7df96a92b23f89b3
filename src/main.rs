//! Meal order wizard
//!
//! Terminal client for placing meal service requests: fill in the order
//! details, choose entities and headcount, pick menus, then review and
//! submit to the backend.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, AppMode};
use infrastructure::{AppConfig, ConfigOverrides, HttpOrderApi, OrderApi};
use presentation::{render_ui, InputHandler};

#[derive(Parser, Debug)]
#[command(name = "mealorder", version, about = "Terminal client for meal service requests")]
struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the order backend
    #[arg(long, env = "MEALORDER_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, env = "MEALORDER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Catalog file used when the backend is unreachable
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            timeout_secs: self.timeout,
            catalog_path: self.catalog.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Entry point for the meal order wizard.
///
/// Loads configuration, fetches the catalog, sets up the terminal and runs
/// the event loop until the user quits.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), cli.overrides())?;
    init_tracing(&config)?;
    info!(api_url = %config.api_url, "starting meal order wizard");

    let api = HttpOrderApi::new(&config)?;
    let mut app = App::default();
    app.refresh_catalog(&api, config.catalog_path.as_deref());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &api);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("meal order wizard closed");
    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode or on the
/// success screen.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, api: &dyn OrderApi) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if app.submitting {
            app.submit(api);
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal | AppMode::Success) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}

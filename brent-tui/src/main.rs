//! Brent Dashboard TUI — oil prices, change points, events and volatility.
//!
//! Layout:
//! 1. Header
//! 2. Filter — start/end date inputs, Apply / Clear
//! 3. Chart — price and volatility lines with markers
//! 4. Summary — change-point details, price changes around events
//! 5. Status bar

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use brent_core::config::API_URL_ENV;
use brent_core::sample::sample_source;
use brent_core::{DashConfig, DashboardSource, HttpSource};
use brent_tui::app::AppState;
use brent_tui::worker::{self, WorkerCommand};
use brent_tui::{input, ui};

#[derive(Parser, Debug)]
#[command(
    name = "brent-tui",
    about = "Brent oil price dashboard in the terminal"
)]
struct Args {
    /// Path to a TOML config file. Defaults to <config_dir>/brent-dash/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and environment).
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Render the built-in sample data instead of calling the backend.
    #[arg(long, default_value_t = false)]
    sample: bool,

    /// Directory for the log file.
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Log to a file; the terminal belongs to the UI. RUST_LOG overrides.
    let appender = tracing_appender::rolling::never(&args.log_dir, "brent-tui.log");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(appender)
        .with_ansi(false)
        .init();

    let config = DashConfig::resolve(args.config.as_deref(), args.api_url.as_deref())
        .context("loading configuration")?;

    let source: Arc<dyn DashboardSource> = if args.sample {
        Arc::new(sample_source(42))
    } else {
        Arc::new(
            HttpSource::new(&config.api.base_url, config.api.timeout())
                .context("building HTTP client")?,
        )
    };
    let source_label = if args.sample {
        "sample data".to_string()
    } else {
        config.api.base_url.clone()
    };
    tracing::info!(source = %source_label, "starting brent-tui");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(source, cmd_rx, resp_tx).context("spawning worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, config.chart, source_label);
    app.request_load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker; in-flight fetch threads are detached.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_worker();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

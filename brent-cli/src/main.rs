//! Brent CLI — headless dashboard commands.
//!
//! Commands:
//! - `summary` — change-point details, price changes around events, and the
//!   event list (optionally filtered by date range)
//! - `rows` — prices joined with volatility, as a table or JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use brent_core::config::API_URL_ENV;
use brent_core::sample::sample_source;
use brent_core::summary::{change_point_block, price_change_block};
use brent_core::{DashConfig, Dashboard, DashboardSource, Endpoint, HttpSource};

#[derive(Parser)]
#[command(name = "brent", about = "Brent oil price dashboard — headless commands")]
struct Cli {
    /// Path to a TOML config file. Defaults to <config_dir>/brent-dash/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and environment).
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Use the built-in sample data instead of calling the backend.
    #[arg(long, global = true, default_value_t = false)]
    sample: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print change-point and price-change details plus the event list.
    Summary {
        /// Start date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        end: Option<String>,
    },
    /// Print prices joined with volatility, one row per price point.
    Rows {
        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DashConfig::resolve(cli.config.as_deref(), cli.api_url.as_deref())
        .context("loading configuration")?;
    let source: Box<dyn DashboardSource> = if cli.sample {
        Box::new(sample_source(42))
    } else {
        Box::new(
            HttpSource::new(&config.api.base_url, config.api.timeout())
                .context("building HTTP client")?,
        )
    };

    let (mut dashboard, failures) = load(source.as_ref());

    match cli.command {
        Commands::Summary { start, end } => {
            run_summary(&mut dashboard, start.as_deref().unwrap_or(""), end.as_deref().unwrap_or(""))?
        }
        Commands::Rows { json } => run_rows(&dashboard, json)?,
    }

    if failures > 0 {
        eprintln!("{failures} of {} endpoints failed; output is partial", Endpoint::ALL.len());
        std::process::exit(1);
    }
    Ok(())
}

/// Fetch every endpoint in turn. A failed endpoint leaves its slot empty.
fn load(source: &dyn DashboardSource) -> (Dashboard, usize) {
    let mut dashboard = Dashboard::new();
    let mut failures = 0;
    for endpoint in Endpoint::ALL {
        match source.fetch(endpoint) {
            Ok(payload) => {
                tracing::info!(endpoint = endpoint.path(), source = source.name(), "fetched");
                dashboard.apply(payload);
            }
            Err(e) => {
                tracing::error!(endpoint = endpoint.path(), error = %e, "fetch failed");
                eprintln!("Error fetching {}: {e}", endpoint.label());
                failures += 1;
            }
        }
    }
    (dashboard, failures)
}

fn run_summary(dashboard: &mut Dashboard, start: &str, end: &str) -> Result<()> {
    dashboard
        .handle_filter(start, end)
        .context("invalid date range")?;

    println!("=== Change Point Details ===");
    if dashboard.change_points().is_empty() {
        println!("  (none)");
    }
    for cp in dashboard.change_points() {
        for line in change_point_block(cp) {
            println!("  {line}");
        }
        println!();
    }

    println!("=== Price Changes Around Events ===");
    if dashboard.indicators().price_changes.is_empty() {
        println!("  (none)");
    }
    for pc in &dashboard.indicators().price_changes {
        for line in price_change_block(pc) {
            println!("  {line}");
        }
        println!();
    }

    println!(
        "=== Events ({} of {}) ===",
        dashboard.filtered_events().len(),
        dashboard.events().len()
    );
    for event in dashboard.filtered_events() {
        match &event.description {
            Some(desc) => println!("  {}  {} — {desc}", event.date, event.event),
            None => println!("  {}  {}", event.date, event.event),
        }
    }
    Ok(())
}

fn run_rows(dashboard: &Dashboard, json: bool) -> Result<()> {
    let model = dashboard.chart_model();

    if json {
        println!("{}", serde_json::to_string_pretty(&model.rows)?);
        return Ok(());
    }

    println!("{:<12} {:>10} {:>12}", "Date", "Price", "Volatility");
    println!("{}", "-".repeat(36));
    for row in &model.rows {
        let vol = row
            .volatility
            .map(|v| format!("{v:.4}"))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} {:>10.2} {:>12}", row.date, row.price, vol);
    }
    println!();
    println!("{} rows, {} markers", model.rows.len(), model.markers.len());
    Ok(())
}

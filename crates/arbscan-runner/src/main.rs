//! # arbscan-runner
//!
//! Main entry point for the arbscan spread scanner.
//!
//! Loads a JSON configuration file, builds a price source for each configured
//! exchange, runs fetch cycles on a fixed interval and serves the latest
//! snapshot over HTTP.
//!
//! # Usage
//!
//! ```bash
//! arbscan-runner config.json --log-level info
//! arbscan-runner config.json --once --exchanges binance,hyperliquid
//! ```

mod api;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arbscan_core::Selection;
use arbscan_engine::{CycleDriver, CycleRunner, SnapshotPublisher, SpreadParams, query};
use arbscan_feed::orchestrator::FetchOrchestrator;
use arbscan_feed::registry::SourceRegistry;
use clap::Parser;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cross-exchange price spread scanner.
#[derive(Parser)]
#[command(name = "arbscan-runner", about = "Cross-exchange price spread scanner")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Run a single cycle, print the snapshot as JSON and exit.
    #[arg(long)]
    once: bool,

    /// HTTP listen address; overrides `server.listen`.
    #[arg(long)]
    listen: Option<String>,

    /// Comma-separated exchange ids to fetch instead of the enabled set.
    #[arg(long)]
    exchanges: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = arbscan_core::config::load_config(&cli.config)?;

    // 2. Initialize logging
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    arbscan_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &config.module_name());
    info!("arbscan-runner starting, config={}, log_level={}", cli.config.display(), cli.log_level);

    // 3. Build sources and the initial selection
    let registry = Arc::new(SourceRegistry::from_config(&config)?);
    let selection = match cli.exchanges.as_deref() {
        Some(csv) => Selection::parse_csv(csv)?,
        None => registry.default_selection(),
    };
    registry.resolve(&selection).context("--exchanges")?;
    info!("{} source(s) configured, fetching [{selection}]", registry.len());

    let params = SpreadParams::from_config(&config.scan);
    let publisher = Arc::new(SnapshotPublisher::new());
    let orchestrator =
        FetchOrchestrator::new(Arc::clone(&registry), config.scan.effective_timeout());

    let runner = CycleRunner::new(orchestrator, Arc::clone(&publisher), params);
    let cancel = CancellationToken::new();

    if cli.once {
        let snapshot = runner.run_once(&selection, &cancel).await?;
        let out = serde_json::to_string_pretty(&query(&snapshot, None, &params))?;
        println!("{out}");
        return Ok(());
    }

    // 4. Start the cycle driver and the query API
    let (selection_tx, selection_rx) = watch::channel(selection);
    let driver = CycleDriver::new(runner, config.scan.effective_interval(), selection_rx);
    let driver_task = tokio::spawn(driver.run(cancel.clone()));

    let listen = cli.listen.clone().or_else(|| config.server.as_ref().map(|s| s.listen.clone()));
    let server_task = listen.map(|listen| {
        let state = api::ApiState {
            publisher: Arc::clone(&publisher),
            registry: Arc::clone(&registry),
            selection: Arc::new(selection_tx),
            params,
        };
        let shutdown = cancel.clone().cancelled_owned();
        tokio::spawn(async move {
            if let Err(e) = api::serve(&listen, state, shutdown).await {
                error!("query API on {listen} failed: {e:#}");
            }
        })
    });

    info!("running, press Ctrl+C to stop");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    // 6. Stop the driver (dropping in-flight fetches) and the server
    cancel.cancel();
    if let Err(e) = driver_task.await {
        error!("cycle driver task failed: {e}");
    }
    if let Some(task) = server_task {
        if let Err(e) = task.await {
            error!("query API task failed: {e}");
        }
    }

    info!("stopped, last snapshot #{}", publisher.current().sequence);
    Ok(())
}

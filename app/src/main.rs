// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::prelude::*;

/// How long `run` waits for webhook posts before exiting.
const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A regime-adaptive signal engine and paper portfolio ledger.")]
struct Cli {
    /// Directory holding `base.toml` and the per-environment overrides.
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs one evaluation cycle over every configured instrument and prints the report.
    Run,

    /// Prints the persisted ledger.
    Status,

    /// Serves the HTTP trigger and dashboard endpoints.
    Serve,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings_from(&cli.config_dir)
        .with_context(|| format!("loading settings from {}", cli.config_dir.display()))?;
    init_tracing(&settings);
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    match cli.command {
        Commands::Run => handle_run(settings).await,
        Commands::Status => handle_status(settings).await,
        Commands::Serve => handle_serve(settings).await,
    }
}

fn init_tracing(settings: &Settings) {
    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("sqlx::query", tracing::Level::WARN) // Disable sqlx query debug logs
            .with_target("hyper", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- Subcommand Logic ---

/// One cycle, report as JSON on stdout. A failed cycle exits non-zero.
async fn handle_run(settings: Settings) -> Result<()> {
    let engine = engine::build_engine(settings).await?;

    let outcome = engine.run_cycle().await;
    engine.flush_notifications(NOTIFICATION_DRAIN_TIMEOUT).await;

    match outcome {
        Ok(report) => {
            tracing::info!("{}", report.summary());
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Cycle failed.");
            Err(e.into())
        }
    }
}

async fn handle_status(settings: Settings) -> Result<()> {
    let engine = engine::build_engine(settings).await?;
    let ledger = engine.snapshot().await?;
    println!("{}", serde_json::to_string_pretty(&ledger)?);
    Ok(())
}

/// Serves until terminated. Cycles are triggered externally through `/run`.
async fn handle_serve(settings: Settings) -> Result<()> {
    let server = settings.server.clone();
    let engine = Arc::new(engine::build_engine(settings).await?);

    tracing::info!("Launching web server...");
    web_server::run(&server, engine).await?;
    Ok(())
}

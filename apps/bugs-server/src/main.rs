mod config;
mod http;
mod logging;
mod signals;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bugs::BugsModule;
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database};

use crate::config::{AppConfig, CliOverrides};

/// Bugs Server - bug tracking REST API
#[derive(Parser)]
#[command(name = "bugs-server")]
#[command(about = "Bugs Server - bug tracking REST API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    if cli.print_config {
        println!("{}", config.to_redacted_json()?);
        return Ok(());
    }

    logging::init_logging(&config.logging);
    tracing::info!("Bugs Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.server.socket_addr()?;
    println!("Configuration is valid");
    println!("{}", config.to_redacted_json()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    // Fail on a bad address before touching the database.
    config.server.socket_addr()?;

    let mut opts = ConnectOptions::new(config.database.dsn.clone());
    opts.max_connections(config.database.max_conns)
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;
    tracing::info!(
        dsn = %config::redact_dsn_password(&config.database.dsn)?,
        "Connected to database"
    );

    let module = BugsModule::new(db, &config.bugs)?;
    module.migrate().await?;

    let app = http::build_app(module.router(), &config.server);
    http::serve(app, &config.server).await
}

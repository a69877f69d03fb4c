//! Main entry point for the MMR Parlor scenario runner
//!
//! Loads configuration and a scenario file, drives the in-memory
//! matchmaking model through it and reports the result as text or JSON.

use anyhow::{anyhow, Result};
use clap::Parser;
use mmr_parlor::config::{AppConfig, OutputFormat, Scenario};
use mmr_parlor::scenario::{RunSummary, ScenarioRunner};
use std::path::PathBuf;
use tracing::{error, info};

/// MMR Parlor - host, join and play rated games in memory
#[derive(Parser)]
#[command(
    name = "mmr-parlor",
    version,
    about = "Run matchmaking scenarios against the in-memory MMR model",
    long_about = "MMR Parlor creates players, lets them host Ranked or Unranked games, \
                 join games within ±10% of the host's rating, and resolves matches that \
                 move every participant's rating. Scenarios are described in TOML."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Scenario file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to the scenario to run (TOML format)"
    )]
    scenario: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Emit the run summary as JSON
    #[arg(long, help = "Print the full run summary as JSON")]
    json: bool,

    /// Abort on the first failing step
    #[arg(long, help = "Stop the scenario at the first step that errors")]
    stop_on_error: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and scenario, then exit)
    #[arg(long, help = "Validate configuration and scenario and exit without running")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if args.json {
        config.matchmaking.output = OutputFormat::Json;
    }

    if args.stop_on_error {
        config.matchmaking.stop_on_error = true;
    }

    mmr_parlor::config::validate_config(&config)?;
    Ok(config)
}

/// Print the run summary in the configured format
fn report(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Text => {
            for line in &summary.output {
                println!("{}", line);
            }

            if !summary.standings.is_empty() {
                println!();
                println!(
                    "{:<20} {:>6} {:>5} {:>8} {:>7}",
                    "player", "games", "wins", "net", "rating"
                );
                for stats in &summary.standings {
                    println!(
                        "{:<20} {:>6} {:>5} {:>+8} {:>7}",
                        stats.player,
                        stats.games_played,
                        stats.wins,
                        stats.net_change,
                        stats.last_rating
                    );
                }
            }

            println!();
            println!(
                "{} steps, {} failed, {} matches played",
                summary.outcomes.len(),
                summary.failed_steps(),
                summary.matches.len()
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("{} v{}", config.service.name, mmr_parlor::VERSION);

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_file(path)?,
        None if args.dry_run => Scenario::default(),
        None => return Err(anyhow!("A scenario file is required (use --scenario)")),
    };

    if args.dry_run {
        info!(
            "Configuration valid; scenario has {} players and {} steps",
            scenario.players.len(),
            scenario.steps.len()
        );
        return Ok(());
    }

    let runner = ScenarioRunner::new(config.matchmaking.clone());
    let summary = match runner.run(&scenario) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Scenario aborted: {:#}", e);
            std::process::exit(1);
        }
    };

    report(&summary, config.matchmaking.output)
}

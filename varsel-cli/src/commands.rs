use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use varsel_config::{ConfigError, VarselConfig};
use varsel_engine::{EngineConfig, StatusEngine, TracingSink};
use varsel_telemetry::{EventLogger, MetricsRecorder};

use crate::classify::classify_line;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the reporter, consuming `LEVEL MESSAGE` lines from stdin
    Run(RunArgs),
    /// Load and validate the configuration, then exit
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file; defaults to the config/ hierarchy
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Configuration file; defaults to the config/ hierarchy
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::Run(args) => run_reporter(args).await,
        Commands::Check(args) => check_config(args).await,
    }
}

fn load_settings(path: &Option<PathBuf>) -> Result<VarselConfig, ConfigError> {
    match path {
        Some(path) => VarselConfig::load_from_path(path),
        None => VarselConfig::load(),
    }
}

async fn run_reporter(args: RunArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = load_settings(&args.config)?;
    EventLogger::init(&settings.telemetry.tracing.filter);

    let metrics = Arc::new(MetricsRecorder::new());
    let engine_config = EngineConfig::from_settings(&settings)?;
    info!(target_identity = %engine_config.target, "Starting varsel reporter");

    let handle = StatusEngine::spawn(engine_config, Arc::new(TracingSink), metrics.clone());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match classify_line(&line) {
                        Ok(event) => handle.handle_event(event).await?,
                        // Upstream contract breach: reject loudly, keep consuming.
                        Err(e) => error!("Rejected input line: {e}"),
                    }
                }
                None => {
                    info!("Event stream closed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    handle.shutdown().await?;

    if settings.telemetry.metrics.enabled {
        info!("Final metrics:\n{}", metrics.gather_metrics()?);
    }
    Ok(())
}

async fn check_config(args: CheckArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = load_settings(&args.config)?;
    EventLogger::init(&settings.telemetry.tracing.filter);

    info!(
        target_identity = %settings.target.identity,
        interval_secs = settings.reporting.message_interval_secs,
        recovery_secs = settings.reporting.auto_recovery_secs,
        no_event_severity = %settings.reporting.no_event_severity,
        "Configuration is valid"
    );
    Ok(())
}

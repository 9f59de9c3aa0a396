use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use glidepath::config::GuidanceConfig;
use glidepath::logging::init_tracing;

mod commands;

#[derive(Parser)]
#[command(
    name = "glidepath",
    version,
    about = "Visual approach guidance from aircraft telemetry and runway data"
)]
struct Cli {
    /// Guidance threshold config (defaults to $GLIDEPATH_CONFIG or ./glidepath.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the aircraft sample in a scenario file once
    Guide {
        scenario: PathBuf,
        /// Print the guidance record as JSON instead of the announcement
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a telemetry log against a scenario's runway
    Replay {
        scenario: PathBuf,
        /// CSV with latitude,longitude,altitude_ft,heading_mag columns
        telemetry: PathBuf,
        /// Wait the recommended update interval between samples
        #[arg(long)]
        realtime: bool,
        /// Report the raw phase of every sample
        #[arg(long)]
        no_smoothing: bool,
        /// Print one JSON guidance record per sample
        #[arg(long)]
        json: bool,
    },
    /// Show intercept options and localizer geometry for the scenario's aircraft
    Intercepts { scenario: PathBuf },
    /// Query every waypoint slot from the scenario's aircraft position
    Waypoints { scenario: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = GuidanceConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Guide { scenario, json } => commands::handle_guide(&config, &scenario, json),
        Commands::Replay {
            scenario,
            telemetry,
            realtime,
            no_smoothing,
            json,
        } => {
            commands::handle_replay(
                &config,
                &scenario,
                &telemetry,
                commands::ReplayOptions {
                    realtime,
                    smoothing: config.smoothing.enabled && !no_smoothing,
                    json,
                },
            )
            .await
        }
        Commands::Intercepts { scenario } => commands::handle_intercepts(&scenario),
        Commands::Waypoints { scenario } => commands::handle_waypoints(&scenario),
    }
}

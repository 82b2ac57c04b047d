//! MargaNav - lookahead waypoint replay
//!
//! Replays a scenario (track + pose / traffic / obstacle events) through
//! the waypoint updater and logs every published window.
//!
//! Usage:
//!   marga-nav scenarios/square_loop.yaml
//!   marga-nav --config configs/marga.toml scenarios/square_loop.yaml
//!
//! Set `RUST_LOG=marga_nav=debug` for per-pose selection details.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use marga_nav::io::{Replay, Scenario};
use marga_nav::{LogSink, MargaConfig, Result};

/// Default config file looked up in the working directory
const DEFAULT_CONFIG: &str = "marga.toml";

/// Replay a waypoint scenario through the lookahead selector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (default: ./marga.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario YAML file
    scenario: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marga_nav=info")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Waypoint updater stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            MargaConfig::load(path)?
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG);
            MargaConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => {
            info!("Using default configuration");
            MargaConfig::default()
        }
    };
    info!(
        "Lookahead {} waypoints, min update distance {:.3} m",
        config.updater.lookahead_wps, config.updater.min_update_distance
    );

    let scenario = Scenario::load(&args.scenario)?;
    let mut replay = Replay::new(config, LogSink);
    let stats = replay.run(&scenario)?;

    info!(
        "{} events: {} poses, {} windows, {} suppressed, {} overlay updates",
        stats.events, stats.poses, stats.published, stats.suppressed, stats.overlay_updates
    );
    if let Some(updater) = replay.updater() {
        let overlays = updater.overlays();
        info!(
            "Final overlays: traffic {}, obstacle {}",
            overlays.traffic, overlays.obstacle
        );
    }
    Ok(())
}

//! Vitalwatch host simulator
//!
//! Runs the vitals engine in real time on a single-threaded runtime.
//!
//! Tasks:
//! - tick: paces the engine at the frame cadence
//! - controller: owns the engine, applies commands, fans out events
//! - location: resolves position and nearest hospitals once at startup
//! - dispatch: builds and sends alert payloads
//! - watch: logs the watch face every second
//! - input: reads operator commands from stdin
//! - script: optionally arms a scenario after a delay

mod channels;
mod command;
mod config;
mod display;
mod providers;
mod tasks;

use std::future;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitalwatch_core::engine::VitalsEngine;
use vitalwatch_core::scenario::ScenarioKind;

use crate::config::{load_config, SimConfig};
use crate::providers::{ConfiguredHospitalDirectory, FixedGeolocation, LogTransport};
use crate::tasks::{
    controller_task, dispatch_task, input_task, location_task, script_task, tick_task,
    watch_task, DispatchSettings,
};

/// Scenario selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    Monitor,
    Hazard,
}

impl From<ScenarioArg> for ScenarioKind {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Monitor => ScenarioKind::Monitor,
            ScenarioArg::Hazard => ScenarioKind::Hazard,
        }
    }
}

/// Wearable vital-sign simulator with emergency alerting
#[derive(Debug, Parser)]
#[command(name = "vitalwatch-sim", version, about)]
struct Args {
    /// Configuration file (defaults to the embedded vitalwatch.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Arm a scenario automatically
    #[arg(long, value_enum)]
    scenario: Option<ScenarioArg>,

    /// Delay before the scripted scenario is armed (ms)
    #[arg(long, default_value_t = 1000)]
    scenario_delay_ms: u64,

    /// Stop after this many seconds
    #[arg(long)]
    duration_s: Option<u64>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Vitalwatch simulator starting...");

    let config = load_config(args.config.as_deref()).context("loading configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;

    runtime.block_on(run(args, config));
    info!("Vitalwatch simulator stopped");
    Ok(())
}

async fn run(args: Args, config: SimConfig) {
    let rng = match args.seed {
        Some(seed) => {
            info!(seed, "Seeded run");
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    };

    let start = Instant::now();
    let engine = VitalsEngine::new(config.engine, config.display.ecg_width, 0);

    let geolocation = FixedGeolocation::new(config.location.coordinate());
    let directory = ConfiguredHospitalDirectory::new(config.location.hospitals.clone());
    let transport = LogTransport::new(config.dispatch.endpoint.clone());
    let settings = DispatchSettings {
        device: config.device.clone(),
        timeout: Duration::from_millis(config.dispatch.timeout_ms),
    };

    let script = async {
        if let Some(scenario) = args.scenario {
            script_task(scenario.into(), Duration::from_millis(args.scenario_delay_ms)).await;
        }
    };

    let tasks = async {
        tokio::join!(
            tick_task(start, config.engine.cadence.frame_ms),
            controller_task(engine, rng, config.display.sparkline_width),
            location_task(
                geolocation,
                directory,
                config.location.search_radius_m,
                Duration::from_millis(config.location.timeout_ms),
            ),
            dispatch_task(transport, settings),
            watch_task(),
            input_task(),
            script,
        )
    };

    let limit = async {
        match args.duration_s {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = tasks => {}
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
        _ = limit => info!("Run time elapsed"),
    }
}

//! coverage — one multi-robot target-tracking run.
//!
//! Usage: `coverage [CONFIG] [--log console|file|both] [--out DIR]`
//!
//! Without a config path the embedded default config is used (3 robots,
//! 6 targets, 120 s at 1 s ticks, radius 100 m, seed 4).  Missing fields in a
//! supplied file fall back to the same defaults.  `RUST_LOG` sets the level.

mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ptrack_core::SimConfig;
use ptrack_output::{CsvWriter, SimOutputObserver};
use ptrack_sim::SimBuilder;

use logging::{LogConfig, LogOutput, init_logging};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_CONFIG_JSON: &str = r#"{
    "robot_count": 3,
    "target_count": 6,
    "duration_secs": 120.0,
    "dt_secs": 1.0,
    "env_radius": 100.0,
    "tracking": false,
    "robot_max_speed": 2.0,
    "target_max_speed": 1.5,
    "target_turn_chance": 0.05,
    "agent_radius": 2.0,
    "seed": 4,
    "output_interval_ticks": 1
}"#;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "coverage")]
#[command(about = "Multi-robot target tracking coverage run")]
struct Cli {
    /// JSON simulation config (embedded default when omitted)
    config: Option<PathBuf>,

    /// Log destination: console, file or both
    #[arg(long, default_value = "console")]
    log: LogOutput,

    /// Directory for the CSV output
    #[arg(long, default_value = "output/coverage")]
    out: PathBuf,
}

// ── Config loading ────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => serde_json::from_str(DEFAULT_CONFIG_JSON).context("parsing embedded default config"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&LogConfig { output: cli.log, ..LogConfig::default() })?;

    let config = load_config(cli.config.as_deref())?;
    let source = cli
        .config
        .as_ref()
        .map_or_else(|| "embedded".to_string(), |p| p.display().to_string());
    info!(source = source.as_str(), "configuration loaded");

    println!("=== coverage — multi-robot target tracking ===");
    println!(
        "Robots: {}  |  Targets: {}  |  T: {} s  |  dt: {} s  |  Tracking: {}  |  Seed: {}",
        config.robot_count,
        config.target_count,
        config.duration_secs,
        config.dt_secs,
        if config.tracking { "on" } else { "off" },
        config.seed,
    );
    println!();

    // 1. Build sim.
    let mut sim = SimBuilder::new(config.clone()).build()?;

    // 2. Set up output.
    let writer = CsvWriter::new(&cli.out)?;
    let mut obs = SimOutputObserver::new(writer, &config);

    // 3. Run.
    let t0 = Instant::now();
    let report = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), report.ticks_run);
    println!("  average observations            : {:.4}", report.average_observations(false));
    println!("  average observations per target : {:.4}", report.average_observations(true));
    println!("  output                          : {}/", cli.out.display());
    println!();

    // 5. Final robot positions.
    println!("{:<8} {:>10} {:>10} {:>8} {:>8}", "Robot", "x", "y", "sensed", "tracked");
    println!("{}", "-".repeat(48));
    for robot in &sim.robots {
        println!(
            "{:<8} {:>10.2} {:>10.2} {:>8} {:>8}",
            robot.id.0,
            robot.state.pose.x,
            robot.state.pose.y,
            robot.memory().sensed().len(),
            robot.memory().tracked_len(),
        );
    }

    Ok(())
}

//! grovecraft - a single-player voxel sandbox engine
//!
//! Headless executable: the rendering and UI layers live out of tree and
//! drive the same session API this binary exercises with scripted input.

mod config;
mod game;
mod input;
mod runner;
mod scripted_input;

use anyhow::Result;
use config::GameplayConfig;
use runner::RunOptions;
use std::{env, path::PathBuf};
use tracing::info;

struct CliOptions {
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    event_log: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    max_ticks: Option<u64>,
    tick_rate: f32,
    show_help: bool,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = CliOptions {
            script: None,
            config: None,
            event_log: None,
            snapshot: None,
            max_ticks: None,
            tick_rate: 60.0,
            show_help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--script" => options.script = Some(require_value(&arg, args.next())?.into()),
                "--config" => options.config = Some(require_value(&arg, args.next())?.into()),
                "--event-log" => {
                    options.event_log = Some(require_value(&arg, args.next())?.into())
                }
                "--snapshot" => options.snapshot = Some(require_value(&arg, args.next())?.into()),
                "--max-ticks" => {
                    options.max_ticks = Some(require_value(&arg, args.next())?.parse()?)
                }
                "--tick-rate" => {
                    let rate: f32 = require_value(&arg, args.next())?.parse()?;
                    if !(rate.is_finite() && rate > 0.0) {
                        anyhow::bail!("--tick-rate must be a positive number");
                    }
                    options.tick_rate = rate;
                }
                "--help" | "-h" => options.show_help = true,
                other => anyhow::bail!("unknown argument '{other}' (try --help)"),
            }
        }

        Ok(options)
    }
}

fn require_value(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

fn print_help() {
    println!(
        "grovecraft {} - headless voxel sandbox session runner

USAGE:
    grovecraft [OPTIONS]

OPTIONS:
    --script <path>      JSON scripted input to replay (runs until finished)
    --config <path>      gameplay config (default: config/gameplay.toml)
    --event-log <path>   write session events as JSONL
    --snapshot <path>    write the final session snapshot as JSON
    --max-ticks <n>      stop after n ticks (default: 600 without a script)
    --tick-rate <hz>     simulation rate (default: 60)
    -h, --help           show this help",
        env!("CARGO_PKG_VERSION")
    );
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via
    // RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = CliOptions::parse(env::args().skip(1))?;
    if cli.show_help {
        print_help();
        return Ok(());
    }

    info!("Starting grovecraft v{}", env!("CARGO_PKG_VERSION"));

    let gameplay = match &cli.config {
        Some(path) => GameplayConfig::load_from_path(path),
        None => GameplayConfig::load(),
    };

    runner::run(
        &gameplay,
        RunOptions {
            script: cli.script,
            event_log: cli.event_log,
            snapshot: cli.snapshot,
            max_ticks: cli.max_ticks,
            tick_rate: cli.tick_rate,
        },
    )
}

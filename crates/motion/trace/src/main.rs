//! Replays a TOML motion script through a `Mover` and prints the pixel trace.
mod replay;
mod script;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use motion_core::MovementType;
use replay::{TraceStep, find_gap, replay};
use script::Script;
use tracing_subscriber::EnvFilter;

/// Prints the per-frame pixel positions of a motion script
#[derive(Parser, Debug)]
#[command(name = "motion-trace")]
#[command(about = "Replay a motion script frame by frame", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the TOML script
    script: PathBuf,

    /// Override the script's movement type (stairstep or smooth)
    #[arg(long, value_parser = parse_movement_type)]
    movement_type: Option<MovementType>,

    /// Print the trace as a JSON array
    #[arg(long)]
    json: bool,

    /// Fail if two consecutive positions are more than one pixel apart
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let script = Script::load(&cli.script)?;
    let kind = cli
        .movement_type
        .or(script.movement_type)
        .unwrap_or_default();
    tracing::info!(
        script = %cli.script.display(),
        %kind,
        frames = script.frame_count(),
        "replaying"
    );

    let trace = replay(&script, kind).context("Replay failed")?;

    if cli.check {
        if let Some((from, to)) = find_gap(&trace) {
            bail!(
                "Pixel skipped at frame {}: ({}, {}) -> ({}, {})",
                to.frame,
                from.x,
                from.y,
                to.x,
                to.y
            );
        }
        tracing::info!("no gaps in {} steps", trace.len());
    }

    print_trace(&trace, cli.json)
}

/// Logs go to stderr so the trace on stdout stays machine-readable.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_trace(trace: &[TraceStep], json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, trace)
            .context("Failed to write JSON trace")?;
        writeln!(out)?;
    } else {
        for step in trace {
            writeln!(out, "{} {} {}", step.frame, step.x, step.y)?;
        }
    }
    Ok(())
}

fn parse_movement_type(value: &str) -> Result<MovementType, String> {
    value
        .parse()
        .map_err(|_| format!("expected stairstep or smooth, got '{value}'"))
}

//! Escher city renderer
//!
//! Runs the recursive city for a fixed number of display refreshes and writes
//! every rendered frame to `frames.jsonl`, plus periodic SVG snapshots.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

use escher_core::{default_config_toml, EscherConfig};
use escher_runner::{run, FrameDriver, RunOptions, RunnerError};

/// Command line arguments for the renderer
#[derive(Parser, Debug)]
#[command(name = "escher_city")]
#[command(about = "Renders a recursive, self-similar Escher-style city")]
struct Args {
    /// Path to a TOML config file (defaults to ./escher.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of display refreshes to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Directory for frames.jsonl and snapshots
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Write an SVG snapshot every N rendered frames (0 disables)
    #[arg(long, default_value_t = 60)]
    snapshot_interval: u64,

    /// Press the pause key at this refresh (repeatable)
    #[arg(long = "toggle-at")]
    toggle_at: Vec<u64>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<EscherConfig, RunnerError> {
    match &args.config {
        Some(path) => Ok(EscherConfig::from_file(path)?),
        None => Ok(EscherConfig::load_or_default()),
    }
}

fn execute(args: &Args) -> Result<(), RunnerError> {
    let config = load_config(args)?;

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let compositor = config.build_compositor(&mut rng)?;

    tracing::info!(
        seed = args.seed,
        topology = ?config.lattice.topology,
        side = config.lattice.side,
        houses = compositor.lattice().len(),
        max_recursion_level = config.compositor.max_recursion_level,
        "starting run"
    );

    let options = RunOptions {
        refreshes: args.frames,
        output_dir: args.output_dir.clone(),
        snapshot_interval: args.snapshot_interval,
        toggle_at: args.toggle_at.clone(),
    };

    let mut driver = FrameDriver::new(compositor);
    let summary = run(&mut driver, &options)?;

    tracing::info!(
        refreshes = summary.refreshes,
        rendered = summary.frames_rendered,
        snapshots = summary.snapshots_written,
        zoom = summary.final_state.zoom_factor,
        "run complete, frames in {}",
        summary.frames_path.display()
    );
    if driver.is_paused() {
        tracing::warn!("run ended while paused");
    }

    Ok(())
}

//! Autopilot simulator CLI.
//!
//! Plays headless sessions with a simple bot to see how the tuning plays.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs
//!   cargo run --bin simulate -- -n 500 --seed 42
//!   cargo run --bin simulate -- --height 600 --json

use clap::Parser;
use flappy::config::load_config;
use flappy::game::Viewport;
use flappy::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Run headless autopilot sessions")]
struct Args {
    /// Number of sessions to play
    #[arg(short = 'n', long = "runs", default_value_t = 100)]
    runs: u32,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tick cap per session
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// World width in units
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// World height in units
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Game config JSON (defaults are used if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every run
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Print only the report
    #[arg(short, long)]
    quiet: bool,

    /// Also write a JSON report to the working directory
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(flappy::constants::LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let game = match &args.config {
        Some(path) => match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Could not load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Default::default(),
    };

    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        max_ticks_per_run: args.max_ticks,
        viewport: Viewport::new(args.width, args.height),
        game,
        verbosity: if args.quiet {
            0
        } else if args.verbose {
            2
        } else {
            1
        },
    };

    if config.shows_summary() {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              FLAPPY AUTOPILOT SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Max Ticks:      {}", config.max_ticks_per_run);
        println!(
            "  World:          {} x {}",
            config.viewport.width, config.viewport.height
        );
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

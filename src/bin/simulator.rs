//! Tanks headless simulator
//!
//! Plays complete games with a fixed autopilot and reports how far each run
//! got. Uses the same `GameEngine` as the terminal game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --seed N        RNG seed for the first run (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --config FILE   Game settings JSON
//!   --json          Print the full report as JSON
//!   --quiet         Only the final summary line
//!
//! Set RUST_LOG (e.g. `RUST_LOG=tanks=debug`) for engine tracing on stderr.

use std::path::PathBuf;
use std::process::exit;
use tanks::simulator::{run_simulation, SimConfig};
use tanks::GameConfig;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

struct CliOptions {
    sim: SimConfig,
    config_path: Option<PathBuf>,
    json: bool,
    quiet: bool,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("{flag} requires a number");
            exit(1);
        }
    }
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = CliOptions {
        sim: SimConfig::default(),
        config_path: None,
        json: false,
        quiet: false,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                options.sim.seed = parse_number("--seed", args.get(i));
            }
            "--runs" => {
                i += 1;
                options.sim.num_runs = parse_number("--runs", args.get(i));
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => options.config_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config requires a file path");
                        exit(1);
                    }
                }
            }
            "--json" => options.json = true,
            "--quiet" => options.quiet = true,
            "--help" | "-h" => {
                print_usage();
                exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                exit(1);
            }
        }
        i += 1;
    }
    options
}

fn print_usage() {
    eprintln!(
        "Tanks Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N       RNG seed for the first run (default: 42)\n\
         \x20 --runs N       Number of runs with incrementing seeds (default: 1)\n\
         \x20 --config FILE  Game settings JSON (display delays are ignored)\n\
         \x20 --json         Print the full report as JSON\n\
         \x20 --quiet        Only the final summary line\n\
         \x20 --help, -h     Show this help"
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let mut options = parse_args();

    if let Some(path) = &options.config_path {
        match GameConfig::load(path) {
            Ok(game) => {
                options.sim.game = GameConfig {
                    enemy_turn_delay_ms: 0,
                    victory_delay_ms: 0,
                    ..game
                };
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                exit(1);
            }
        }
    }

    let report = run_simulation(&options.sim);

    if options.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                exit(1);
            }
        }
        return;
    }

    if !options.quiet {
        for (i, run) in report.runs.iter().enumerate() {
            println!("Run {:>3}: {}", i + 1, run.summary_line());
        }
    }
    println!("{}", report.summary_line());
}

//! Game balance simulator CLI.
//!
//! Plays seeded sessions with a scripted policy to check how far the
//! standard rules (or a rules file) let a player get.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 --seed 42      # Reproducible run
//!   cargo run --bin simulate -- --rules hard.json     # Custom tables

use std::env;

use tapquest::rules::GameRules;
use tapquest::simulator::{run_simulation, SimConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, rules_path) = parse_args(&args);

    let rules = match rules_path {
        Some(path) => match load_rules(&path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Failed to load rules from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameRules::standard(),
    };

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              TAPQUEST BALANCE SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Areas:          {}", rules.area_count());
        println!("  Steps/Area:     {}", rules.steps_per_area);
        println!("  Max Actions:    {}", config.max_actions_per_run);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config, &rules);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
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

fn load_rules(path: &str) -> Result<GameRules, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    GameRules::from_json(&text).map_err(|e| e.to_string())
}

fn parse_args(args: &[String]) -> (SimConfig, Option<String>) {
    let mut config = SimConfig::default();
    let mut rules_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--actions" => {
                if i + 1 < args.len() {
                    config.max_actions_per_run = args[i + 1].parse().unwrap_or(200_000);
                    i += 1;
                }
            }
            "--taps" => {
                if i + 1 < args.len() {
                    config.taps_per_enemy_attack = args[i + 1].parse().unwrap_or(3).max(1);
                    i += 1;
                }
            }
            "--rules" => {
                if i + 1 < args.len() {
                    rules_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, rules_path)
}

fn print_help() {
    println!("TapQuest Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulated sessions (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --actions <T>   Max actions per session (default: 200,000)");
    println!("    --taps <K>          Player actions between enemy attacks (default: 3)");
    println!("    --rules <FILE>      Load game rules from a JSON file");
    println!("    -q, --quiet         Only print the report");
    println!("    -v, --verbose       Print one line per session");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=tapquest=debug to trace phase transitions.");
}

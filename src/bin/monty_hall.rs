//! Monty Hall Simulation Binary
//!
//! Plays the game many times while always switching, then many times while
//! always staying, and reports the winning percentage of each strategy.
//!
//! ## Usage
//! ```bash
//! cargo run --bin monty_hall --release
//! cargo run --bin monty_hall --release -- --trials 100000 --seed 7 --format json
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;

use monty_hall_simulation::config::{SimulationConfig, DEFAULT_TRIALS};
use monty_hall_simulation::error::ExitCode;
use monty_hall_simulation::logging::{init_logging, LogFormat};
use monty_hall_simulation::{AggregateResult, Strategy, StrategyComparison};

/// Monte Carlo simulation of the Monty Hall problem.
#[derive(Parser, Debug)]
#[command(name = "monty_hall", version, about)]
struct Cli {
    /// Number of games per strategy.
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS, env = "MONTY_HALL_TRIALS")]
    trials: u64,

    /// Seed for a reproducible run.
    #[arg(long, env = "MONTY_HALL_SEED")]
    seed: Option<u64>,

    /// Split each batch into this many chunks and run them in parallel.
    #[arg(long, value_name = "CHUNKS")]
    parallel: Option<u64>,

    /// Report format.
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Serialize)]
struct StrategyReport {
    strategy: Strategy,
    wins: u64,
    losses: u64,
    win_percentage: f64,
}

#[derive(Serialize)]
struct Report {
    trials: u64,
    seed: Option<u64>,
    results: Vec<StrategyReport>,
}

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        let log_format = match cli.format {
            OutputFormat::Human => LogFormat::Human,
            OutputFormat::Json => LogFormat::Json,
        };
        init_logging(log_format, cli.verbose);
    }

    let config = SimulationConfig {
        trials: cli.trials,
        seed: cli.seed,
        chunks: cli.parallel,
    }
    .pin_seed();

    let comparison = match config.run() {
        Ok(comparison) => comparison,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    match cli.format {
        OutputFormat::Human => print_human(&comparison),
        OutputFormat::Json => {
            if let Err(e) = print_json(&comparison, config.seed) {
                eprintln!("error: {e}");
                std::process::exit(ExitCode::ERROR);
            }
        }
    }
}

fn print_human(comparison: &StrategyComparison) {
    for strategy in Strategy::all() {
        let result = comparison.get(strategy);
        println!();
        println!("{} Monty Hall games ({}):", comparison.trials, strategy.name());
        print_result(&result);
    }
    println!();
}

fn print_result(result: &AggregateResult) {
    println!("  won: {} games", result.wins);
    println!("  lost: {} games", result.losses);
    println!("  odds: {:.2}% winning percentage", result.win_percentage());
}

fn print_json(comparison: &StrategyComparison, seed: Option<u64>) -> serde_json::Result<()> {
    let report = Report {
        trials: comparison.trials,
        seed,
        results: Strategy::all()
            .into_iter()
            .map(|strategy| {
                let result = comparison.get(strategy);
                StrategyReport {
                    strategy,
                    wins: result.wins,
                    losses: result.losses,
                    win_percentage: result.win_percentage(),
                }
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

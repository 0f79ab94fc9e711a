//! Monty Hall Simulation Library
//!
//! Monte Carlo simulation of the Monty Hall problem: a prize sits behind one
//! of three doors, the contestant picks one, the host opens another door
//! hiding no prize, and the contestant may switch to the last closed door.
//! Switching wins with probability 2/3; staying wins with probability 1/3.
//!
//! ## Modules
//!
//! - `door`: doors and injectable door sources (random, seeded, scripted)
//! - `trial`: the single-game state machine
//! - `batch`: sequential and parallel aggregation over many trials
//! - `config`: run configuration used by the binary
//! - `logging`: tracing subscriber setup
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin monty_hall --release
//! cargo run --bin monty_hall --release -- --trials 100000 --seed 42 --parallel 8
//! ```

pub mod batch;
pub mod config;
pub mod door;
pub mod error;
pub mod logging;
pub mod trial;

pub use batch::{
    compare_strategies, compare_strategies_parallel, run_batch, run_parallel_batch,
    AggregateResult, StrategyComparison,
};
pub use door::{Door, DoorSource, RandomDoors, ScriptedDoors};
pub use error::SimulationError;
pub use trial::{play_trial, run_trial, Phase, Strategy, Trial, TrialRecord};

//! Batch aggregation over many independent trials.
//!
//! ## Entry points
//! - [`run_batch`]: sequential trials drawn from a single door source
//! - [`run_parallel_batch`]: fixed chunks on independent seeded streams
//! - [`compare_strategies`]: one switch batch followed by one stay batch

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, debug_span, info};

use crate::door::{DoorSource, RandomDoors};
use crate::error::SimulationError;
use crate::trial::{run_trial, Strategy};

/// Win/loss tally for one batch under one strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub wins: u64,
    pub losses: u64,
}

impl AggregateResult {
    pub fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.wins + self.losses
    }

    /// Fraction of trials won, in `[0, 1]`. Zero for an empty tally.
    pub fn win_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total() as f64
    }

    pub fn win_percentage(&self) -> f64 {
        100.0 * self.win_rate()
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
        }
    }
}

/// Runs `trials` fresh trials under `strategy`, drawing from `source`.
pub fn run_batch(
    trials: u64,
    strategy: Strategy,
    source: &mut impl DoorSource,
) -> Result<AggregateResult, SimulationError> {
    if trials < 1 {
        return Err(SimulationError::InvalidBatchSize(trials));
    }

    let _span = debug_span!("batch", trials, strategy = ?strategy).entered();

    let mut result = AggregateResult::default();
    for _ in 0..trials {
        result.record(run_trial(source, strategy)?);
    }

    debug!(wins = result.wins, losses = result.losses, "batch finished");
    Ok(result)
}

/// Splits `trials` into `chunks` near-equal parts and runs them on rayon.
///
/// Chunk `i` draws from ChaCha stream `i` of `seed`, so the result depends
/// only on `seed` and `chunks`, never on the thread count. Chunk counts
/// above `trials` are clamped so no chunk is empty.
pub fn run_parallel_batch(
    trials: u64,
    strategy: Strategy,
    seed: u64,
    chunks: u64,
) -> Result<AggregateResult, SimulationError> {
    if trials < 1 {
        return Err(SimulationError::InvalidBatchSize(trials));
    }
    if chunks < 1 {
        return Err(SimulationError::InvalidChunkCount);
    }

    let chunks = chunks.min(trials);
    let base = trials / chunks;
    let extra = trials % chunks;

    debug!(trials, chunks, seed, strategy = ?strategy, "starting parallel batch");

    let partials: Vec<AggregateResult> = (0..chunks)
        .into_par_iter()
        .map(|i| {
            let size = base + u64::from(i < extra);
            let mut source = RandomDoors::stream(seed, i);
            run_batch(size, strategy, &mut source)
        })
        .collect::<Result<_, _>>()?;

    Ok(partials
        .into_iter()
        .fold(AggregateResult::default(), AggregateResult::merge))
}

/// Results of running both strategies on the same trial count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StrategyComparison {
    pub trials: u64,
    pub switch: AggregateResult,
    pub stay: AggregateResult,
}

impl StrategyComparison {
    pub fn get(&self, strategy: Strategy) -> AggregateResult {
        match strategy {
            Strategy::Switch => self.switch,
            Strategy::Stay => self.stay,
        }
    }
}

/// Runs a switch batch, then a stay batch, on the same source.
pub fn compare_strategies(
    trials: u64,
    source: &mut impl DoorSource,
) -> Result<StrategyComparison, SimulationError> {
    let switch = run_batch(trials, Strategy::Switch, source)?;
    info!(wins = switch.wins, losses = switch.losses, rate = switch.win_rate(), "switch batch done");

    let stay = run_batch(trials, Strategy::Stay, source)?;
    info!(wins = stay.wins, losses = stay.losses, rate = stay.win_rate(), "stay batch done");

    Ok(StrategyComparison {
        trials,
        switch,
        stay,
    })
}

/// Parallel counterpart of [`compare_strategies`].
///
/// The stay batch uses `seed + 1` so its streams never repeat the switch
/// batch's draws.
pub fn compare_strategies_parallel(
    trials: u64,
    seed: u64,
    chunks: u64,
) -> Result<StrategyComparison, SimulationError> {
    let switch = run_parallel_batch(trials, Strategy::Switch, seed, chunks)?;
    info!(wins = switch.wins, losses = switch.losses, rate = switch.win_rate(), "switch batch done");

    let stay = run_parallel_batch(trials, Strategy::Stay, seed.wrapping_add(1), chunks)?;
    info!(wins = stay.wins, losses = stay.losses, rate = stay.win_rate(), "stay batch done");

    Ok(StrategyComparison {
        trials,
        switch,
        stay,
    })
}

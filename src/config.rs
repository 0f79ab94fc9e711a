//! Simulation run configuration.

use rand::Rng;

use crate::batch::{compare_strategies, compare_strategies_parallel, StrategyComparison};
use crate::door::RandomDoors;
use crate::error::SimulationError;

pub const DEFAULT_TRIALS: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: u64,
    pub seed: Option<u64>, // None draws from OS entropy
    pub chunks: Option<u64>, // None runs sequentially
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            chunks: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trials < 1 {
            return Err(SimulationError::InvalidBatchSize(self.trials));
        }
        if self.chunks == Some(0) {
            return Err(SimulationError::InvalidChunkCount);
        }
        Ok(())
    }

    /// Seed used for parallel runs, drawing a fresh one when none is set.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }

    /// Fixes the seed of a parallel run up front so it can be reported.
    pub fn pin_seed(mut self) -> Self {
        if self.chunks.is_some() && self.seed.is_none() {
            self.seed = Some(self.resolved_seed());
        }
        self
    }

    /// Runs both strategies as configured.
    pub fn run(&self) -> Result<StrategyComparison, SimulationError> {
        self.validate()?;

        match (self.chunks, self.seed) {
            (Some(chunks), _) => {
                let seed = self.resolved_seed();
                tracing::info!(seed, chunks, "running parallel batches");
                compare_strategies_parallel(self.trials, seed, chunks)
            }
            (None, Some(seed)) => {
                tracing::info!(seed, "running seeded batches");
                compare_strategies(self.trials, &mut RandomDoors::seeded(seed))
            }
            (None, None) => compare_strategies(self.trials, &mut RandomDoors::from_entropy()),
        }
    }
}

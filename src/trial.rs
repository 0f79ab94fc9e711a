//! Single play of the three-door game.
//!
//! A [`Trial`] walks through four phases:
//! 1. Initialized: the prize is placed behind a random door
//! 2. Selected: the contestant picks a random door
//! 3. Revealed: the host opens a door that hides no prize and was not picked
//! 4. Resolved: the contestant switches or stays
//!
//! Each step checks the current phase, so driving a trial by hand out of
//! order is reported as [`SimulationError::InvalidState`]. [`run_trial`]
//! drives a fresh trial through every step and cannot hit that error.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::door::{Door, DoorSource};
use crate::error::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Switch, // Always take the remaining door
    Stay,   // Always keep the first pick
}

impl Strategy {
    pub fn all() -> Vec<Self> {
        vec![Self::Switch, Self::Stay]
    }

    pub fn from_switch(switch: bool) -> Self {
        if switch {
            Self::Switch
        } else {
            Self::Stay
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Switch => "with switching",
            Self::Stay => "staying with original choice",
        }
    }
}

impl From<bool> for Strategy {
    fn from(switch: bool) -> Self {
        Self::from_switch(switch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Initialized,
    Selected,
    Revealed,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialized => "initialized",
            Self::Selected => "selected",
            Self::Revealed => "revealed",
            Self::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

/// Snapshot of a finished trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrialRecord {
    pub prize: Door,
    pub initial_selection: Door,
    pub removed: Door,
    pub final_selection: Door,
    pub won: bool,
}

#[derive(Clone, Debug)]
pub struct Trial {
    prize: Door,
    initial_selection: Option<Door>,
    selected: Option<Door>,
    removed: Option<Door>,
    phase: Phase,
}

impl Trial {
    /// Places the prize behind a door drawn from `source`.
    pub fn new(source: &mut impl DoorSource) -> Result<Self, SimulationError> {
        Ok(Self::with_prize(source.next_door()?))
    }

    /// Starts a trial with a known prize door.
    pub fn with_prize(prize: Door) -> Self {
        Self {
            prize,
            initial_selection: None,
            selected: None,
            removed: None,
            phase: Phase::Initialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prize(&self) -> Door {
        self.prize
    }

    pub fn selected(&self) -> Option<Door> {
        self.selected
    }

    pub fn removed(&self) -> Option<Door> {
        self.removed
    }

    fn require(&self, expected: Phase, operation: &'static str) -> Result<(), SimulationError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SimulationError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    /// The contestant picks a door, independently of the prize.
    pub fn select(&mut self, source: &mut impl DoorSource) -> Result<Door, SimulationError> {
        self.require(Phase::Initialized, "select")?;

        let door = source.next_door()?;
        self.initial_selection = Some(door);
        self.selected = Some(door);
        self.phase = Phase::Selected;
        Ok(door)
    }

    /// The host opens a door that is neither the selection nor the prize.
    ///
    /// A wrong first pick leaves exactly one eligible door and no randomness
    /// is consumed. A correct first pick leaves two; draws that land on the
    /// picked door are rejected so both remaining doors stay equally likely.
    pub fn reveal(&mut self, source: &mut impl DoorSource) -> Result<Door, SimulationError> {
        self.require(Phase::Selected, "reveal")?;
        let selected = self.current_selection("reveal")?;

        let removed = match Door::third(selected, self.prize) {
            Some(only) => only,
            None => loop {
                let candidate = source.next_door()?;
                if candidate != selected {
                    break candidate;
                }
            },
        };

        self.removed = Some(removed);
        self.phase = Phase::Revealed;
        Ok(removed)
    }

    /// Applies the strategy and returns the final selection.
    pub fn apply_strategy(&mut self, strategy: Strategy) -> Result<Door, SimulationError> {
        self.require(Phase::Revealed, "apply a strategy to")?;
        let selected = self.current_selection("apply a strategy to")?;

        if strategy.is_switch() {
            let removed = self.removed.ok_or(SimulationError::InvalidState {
                operation: "switch",
                phase: self.phase,
            })?;
            // removed != selected holds after reveal, so a third door exists
            let switched = Door::third(selected, removed).ok_or(SimulationError::InvalidState {
                operation: "switch",
                phase: self.phase,
            })?;
            self.selected = Some(switched);
        }

        self.phase = Phase::Resolved;
        self.current_selection("apply a strategy to")
    }

    /// Whether the final selection hides the prize.
    ///
    /// Valid once the strategy is applied, or straight after the reveal,
    /// where staying changes nothing.
    pub fn won(&self) -> Result<bool, SimulationError> {
        match self.phase {
            Phase::Revealed | Phase::Resolved => Ok(self.current_selection("score")? == self.prize),
            phase => Err(SimulationError::InvalidState {
                operation: "score",
                phase,
            }),
        }
    }

    /// Snapshot of a resolved trial.
    pub fn record(&self) -> Result<TrialRecord, SimulationError> {
        self.require(Phase::Resolved, "record")?;
        let missing = SimulationError::InvalidState {
            operation: "record",
            phase: self.phase,
        };

        Ok(TrialRecord {
            prize: self.prize,
            initial_selection: self.initial_selection.ok_or_else(|| missing.clone())?,
            removed: self.removed.ok_or_else(|| missing.clone())?,
            final_selection: self.selected.ok_or(missing)?,
            won: self.won()?,
        })
    }

    fn current_selection(&self, operation: &'static str) -> Result<Door, SimulationError> {
        self.selected.ok_or(SimulationError::InvalidState {
            operation,
            phase: self.phase,
        })
    }
}

/// Plays one fresh trial under `strategy` and returns its record.
pub fn play_trial(
    source: &mut impl DoorSource,
    strategy: Strategy,
) -> Result<TrialRecord, SimulationError> {
    let mut trial = Trial::new(source)?;
    trial.select(source)?;
    trial.reveal(source)?;
    trial.apply_strategy(strategy)?;

    let record = trial.record()?;
    trace!(
        prize = record.prize.number(),
        initial = record.initial_selection.number(),
        removed = record.removed.number(),
        final_selection = record.final_selection.number(),
        won = record.won,
        "trial resolved"
    );
    Ok(record)
}

/// Plays one fresh trial under `strategy` and reports whether it was won.
pub fn run_trial(source: &mut impl DoorSource, strategy: Strategy) -> Result<bool, SimulationError> {
    play_trial(source, strategy).map(|record| record.won)
}

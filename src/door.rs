//! Doors and door sources.
//!
//! A [`DoorSource`] yields one of the three doors with uniform probability.
//! Trials take the source as an argument instead of reaching for a global
//! generator, so tests can script exact draws and parallel workers can each
//! own an independent stream.

use std::fmt;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Door {
    One,
    Two,
    Three,
}

impl Door {
    pub const ALL: [Door; 3] = [Door::One, Door::Two, Door::Three];

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    /// The unique door distinct from both `a` and `b`.
    ///
    /// Returns `None` when `a == b`, since two doors remain in that case.
    pub fn third(a: Door, b: Door) -> Option<Door> {
        if a == b {
            return None;
        }
        // 1 + 2 + 3 = 6
        Self::from_number(6 - a.number() - b.number())
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "door {}", self.number())
    }
}

/// Uniform source of doors, independent across calls.
pub trait DoorSource {
    fn next_door(&mut self) -> Result<Door, SimulationError>;
}

impl<S: DoorSource + ?Sized> DoorSource for &mut S {
    fn next_door(&mut self) -> Result<Door, SimulationError> {
        (**self).next_door()
    }
}

/// Door source backed by a `rand` generator.
#[derive(Clone, Debug)]
pub struct RandomDoors<R> {
    rng: R,
}

impl<R: Rng> RandomDoors<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDoors<ThreadRng> {
    /// Non-reproducible source seeded by the operating system.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomDoors<ChaCha8Rng> {
    /// Reproducible source: the same seed always yields the same doors.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Reproducible source on its own ChaCha stream.
    ///
    /// Streams sharing a seed but differing in `index` never overlap, which
    /// is what parallel chunks need to stay statistically independent.
    pub fn stream(seed: u64, index: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(index);
        Self::new(rng)
    }
}

impl<R: Rng> DoorSource for RandomDoors<R> {
    fn next_door(&mut self) -> Result<Door, SimulationError> {
        Ok(Door::ALL[self.rng.gen_range(0..Door::ALL.len())])
    }
}

/// Replays a fixed sequence of doors.
///
/// Running past the end of the script is reported as
/// [`SimulationError::SourceExhausted`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedDoors {
    doors: Vec<Door>,
    position: usize,
}

impl ScriptedDoors {
    pub fn new(doors: impl IntoIterator<Item = Door>) -> Self {
        Self {
            doors: doors.into_iter().collect(),
            position: 0,
        }
    }

    /// Builds a script from numeric labels, skipping anything outside 1..=3.
    pub fn from_numbers(numbers: &[u8]) -> Self {
        Self::new(numbers.iter().filter_map(|&n| Door::from_number(n)))
    }

    /// Number of doors handed out so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.doors.len() - self.position
    }
}

impl DoorSource for ScriptedDoors {
    fn next_door(&mut self) -> Result<Door, SimulationError> {
        let door = self
            .doors
            .get(self.position)
            .copied()
            .ok_or(SimulationError::SourceExhausted {
                draws: self.position,
            })?;
        self.position += 1;
        Ok(door)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_numbers_round_trip() {
        for door in Door::ALL {
            assert_eq!(Door::from_number(door.number()), Some(door));
        }
        assert_eq!(Door::from_number(0), None);
        assert_eq!(Door::from_number(4), None);
    }

    #[test]
    fn test_third_door() {
        assert_eq!(Door::third(Door::One, Door::Two), Some(Door::Three));
        assert_eq!(Door::third(Door::Three, Door::One), Some(Door::Two));
        assert_eq!(Door::third(Door::Two, Door::Three), Some(Door::One));
        assert_eq!(Door::third(Door::Two, Door::Two), None);
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut a = RandomDoors::seeded(42);
        let mut b = RandomDoors::seeded(42);

        for _ in 0..100 {
            assert_eq!(a.next_door().unwrap(), b.next_door().unwrap());
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut a = RandomDoors::stream(42, 0);
        let mut b = RandomDoors::stream(42, 1);

        let seq_a: Vec<_> = (0..32).map(|_| a.next_door().unwrap()).collect();
        let seq_b: Vec<_> = (0..32).map(|_| b.next_door().unwrap()).collect();

        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_random_doors_uniform() {
        let mut source = RandomDoors::seeded(7);
        let mut counts = [0u32; 3];
        let n = 90_000;
        for _ in 0..n {
            counts[(source.next_door().unwrap().number() - 1) as usize] += 1;
        }

        let expected = n as f64 / 3.0;
        for (i, &count) in counts.iter().enumerate() {
            let ratio = count as f64 / expected;
            assert!(
                ratio > 0.97 && ratio < 1.03,
                "door {} drawn {} times (expected ~{:.0})",
                i + 1,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_scripted_doors_exhaust() {
        let mut source = ScriptedDoors::from_numbers(&[3, 1]);

        assert_eq!(source.next_door(), Ok(Door::Three));
        assert_eq!(source.next_door(), Ok(Door::One));
        assert_eq!(source.remaining(), 0);
        assert_eq!(
            source.next_door(),
            Err(SimulationError::SourceExhausted { draws: 2 })
        );
    }

    #[test]
    fn test_borrowed_source_advances_owner() {
        fn draw<S: DoorSource>(mut source: S) -> Door {
            source.next_door().unwrap()
        }

        let mut source = ScriptedDoors::from_numbers(&[1, 2, 3]);
        assert_eq!(draw(&mut source), Door::One);
        assert_eq!(draw(&mut source), Door::Two);
        assert_eq!(source.consumed(), 2);
    }
}

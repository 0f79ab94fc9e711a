//! Property-based tests for trial and batch invariants.

use proptest::prelude::*;

use monty_hall_simulation::trial::{self, play_trial, run_trial, Trial};
use monty_hall_simulation::{
    run_batch, run_parallel_batch, Door, RandomDoors, ScriptedDoors, SimulationError,
};

/// Strategy: a single door label (1-3).
fn door_number() -> impl Strategy<Value = u8> {
    1..=3u8
}

/// Strategy: a door script long enough for any single trial to finish.
fn trial_script() -> impl Strategy<Value = Vec<u8>> {
    (door_number(), door_number(), prop::collection::vec(door_number(), 0..6)).prop_map(
        |(prize, pick, mut reveal)| {
            // guarantee at least one draw that differs from the pick
            reveal.push(if pick == 1 { 2 } else { 1 });
            let mut script = vec![prize, pick];
            script.append(&mut reveal);
            script
        },
    )
}

fn play_strategy() -> impl Strategy<Value = trial::Strategy> {
    any::<bool>().prop_map(trial::Strategy::from_switch)
}

proptest! {
    // 1. Prize, selection and removed door are pairwise distinct after the reveal
    #[test]
    fn revealed_doors_distinct(script in trial_script()) {
        let mut source = ScriptedDoors::from_numbers(&script);
        let mut trial = Trial::new(&mut source).unwrap();
        let selected = trial.select(&mut source).unwrap();
        let removed = trial.reveal(&mut source).unwrap();

        prop_assert_ne!(removed, selected);
        prop_assert_ne!(removed, trial.prize());
    }

    // 2. Switching lands on the door that is neither the pick nor the removed one
    #[test]
    fn switch_takes_third_door(script in trial_script()) {
        let mut source = ScriptedDoors::from_numbers(&script);
        let record = play_trial(&mut source, trial::Strategy::Switch).unwrap();

        prop_assert_ne!(record.final_selection, record.initial_selection);
        prop_assert_ne!(record.final_selection, record.removed);
        prop_assert_eq!(
            Some(record.final_selection),
            Door::third(record.initial_selection, record.removed)
        );
    }

    // 3. Switching wins exactly when the first pick was wrong
    #[test]
    fn switch_wins_iff_first_pick_wrong(script in trial_script()) {
        let mut source = ScriptedDoors::from_numbers(&script);
        let record = play_trial(&mut source, trial::Strategy::Switch).unwrap();

        prop_assert_eq!(record.won, record.initial_selection != record.prize);
    }

    // 4. Staying wins exactly when the first pick was right
    #[test]
    fn stay_wins_iff_first_pick_right(script in trial_script()) {
        let mut source = ScriptedDoors::from_numbers(&script);
        let record = play_trial(&mut source, trial::Strategy::Stay).unwrap();

        prop_assert_eq!(record.final_selection, record.initial_selection);
        prop_assert_eq!(record.won, record.initial_selection == record.prize);
    }

    // 5. A wrong first pick consumes no reveal draws
    #[test]
    fn forced_reveal_consumes_nothing(prize in door_number(), pick in door_number()) {
        prop_assume!(prize != pick);
        let mut source = ScriptedDoors::from_numbers(&[prize, pick]);

        prop_assert!(run_trial(&mut source, trial::Strategy::Switch).unwrap());
        prop_assert_eq!(source.remaining(), 0);
    }

    // 6. Seeded runs are reproducible
    #[test]
    fn seeded_trials_deterministic(seed in any::<u64>(), strategy in play_strategy()) {
        let mut a = RandomDoors::seeded(seed);
        let mut b = RandomDoors::seeded(seed);

        for _ in 0..50 {
            prop_assert_eq!(
                play_trial(&mut a, strategy).unwrap(),
                play_trial(&mut b, strategy).unwrap()
            );
        }
    }

    // 7. Every trial in a batch is counted exactly once
    #[test]
    fn batch_counts_every_trial(seed in any::<u64>(), n in 1..500u64, strategy in play_strategy()) {
        let mut source = RandomDoors::seeded(seed);
        let first = run_batch(n, strategy, &mut source).unwrap();
        let second = run_batch(n, strategy, &mut source).unwrap();

        prop_assert_eq!(first.total(), n);
        prop_assert_eq!(second.total(), n);
    }

    // 8. Parallel batches depend only on seed and chunk count
    #[test]
    fn parallel_batch_reproducible(seed in any::<u64>(), n in 1..2_000u64, chunks in 1..16u64) {
        let a = run_parallel_batch(n, trial::Strategy::Switch, seed, chunks).unwrap();
        let b = run_parallel_batch(n, trial::Strategy::Switch, seed, chunks).unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(a.total(), n);
    }
}

#[test]
fn empty_batch_is_rejected() {
    let mut source = RandomDoors::seeded(0);
    assert_eq!(
        run_batch(0, trial::Strategy::Stay, &mut source),
        Err(SimulationError::InvalidBatchSize(0))
    );
}

#[test]
fn switching_beats_staying() {
    let mut source = RandomDoors::seeded(31);
    let switch = run_batch(100_000, trial::Strategy::Switch, &mut source).unwrap();
    let stay = run_batch(100_000, trial::Strategy::Stay, &mut source).unwrap();

    assert!((0.64..=0.70).contains(&switch.win_rate()), "switch {}", switch.win_rate());
    assert!((0.30..=0.36).contains(&stay.win_rate()), "stay {}", stay.win_rate());
}

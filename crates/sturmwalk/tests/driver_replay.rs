//! Driver determinism and sink-contract tests.

use proptest::prelude::*;
use sturmwalk::{ChannelSet, Direction, Driver, Strategy as Generator, SturmianWord};

/// Records moves and answers `true` on call `stop_at`.
fn record<S: sturmwalk::BitSource>(source: S, stop_at: usize) -> (Vec<Direction>, u64) {
    let mut log = Vec::with_capacity(stop_at);
    let mut after_stop = 0u64;
    let mut stopped = false;
    let done = Driver::new(source).run(|d: Direction| {
        if stopped {
            after_stop += 1;
        }
        log.push(d);
        stopped = log.len() == stop_at;
        stopped
    });
    assert_eq!(done.moves as usize, log.len());
    (log, after_stop)
}

#[test]
fn replay_seeded_set() {
    let (a, _) = record(ChannelSet::default(), 10_000);
    let (b, _) = record(ChannelSet::default(), 10_000);
    assert_eq!(a, b);
}

#[test]
fn replay_every_strategy() {
    for generator in [
        Generator::Sturmian,
        Generator::default(),
        Generator::Reference,
        Generator::Seeded {
            channels: 7,
            rotation: Some(3),
            seed: 99,
        },
    ] {
        let first = record(generator.build().unwrap(), 2_000).0;
        let second = record(generator.build().unwrap(), 2_000).0;
        assert_eq!(first, second, "{generator}");
    }
}

#[test]
fn emits_only_right_and_up() {
    let (log, _) = record(ChannelSet::reference(), 50_000);
    assert!(log
        .iter()
        .all(|d| matches!(d, Direction::Right | Direction::Up)));
}

#[test]
fn ups_follow_one_or_two_rights() {
    let (log, _) = record(SturmianWord::new(), 30_000);
    let mut run = 0;
    for d in log {
        match d {
            Direction::Right => run += 1,
            Direction::Up => {
                assert!(run == 1 || run == 2, "run of {run} rights");
                run = 0;
            }
            other => panic!("unexpected {other}"),
        }
    }
}

proptest! {
    /// A sink that answers false N times, then true, sees the same N + 1
    /// moves on every run and is never called again.
    #[test]
    fn prop_prefix_replay(n in 0usize..3_000, seed: u64) {
        let generator = Generator::Seeded { channels: 4, rotation: None, seed };
        let (a, after_a) = record(generator.build().unwrap(), n + 1);
        let (b, after_b) = record(generator.build().unwrap(), n + 1);
        prop_assert_eq!(a.len(), n + 1);
        prop_assert_eq!(a, b);
        prop_assert_eq!(after_a, 0);
        prop_assert_eq!(after_b, 0);
    }
}

//! Parallel board sweeps.
//!
//! Each board gets its own generator and torus, so boards are simulated
//! independently on the rayon pool and folded into one [`SweepReport`].

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use sturmwalk::Strategy;
use tracing::{info, warn};

use crate::board::{all_boards, Board};
use crate::cover::{simulate_cover, CapPolicy, CoverResult};
use crate::error::SimError;
use crate::report::SweepReport;

/// Boards between progress events.
pub const PROGRESS_EVERY: u64 = 10_000;

/// Simulates every board and aggregates the verdicts.
///
/// Emits an `info` event every [`PROGRESS_EVERY`] boards and a `warn` event
/// for each failing board. Failures in the returned report are ordered by
/// board regardless of scheduling.
///
/// # Errors
///
/// [`SimError::Config`] if `strategy` is invalid; no board is simulated.
pub fn sweep<I>(boards: I, strategy: &Strategy, cap: CapPolicy) -> Result<SweepReport, SimError>
where
    I: IntoParallelIterator<Item = Board>,
{
    // Reject a bad generator once, up front.
    strategy.build()?;

    let label = strategy.to_string();
    let checked = AtomicU64::new(0);
    let failed = AtomicU64::new(0);

    let mut report = boards
        .into_par_iter()
        .map(|board| -> Result<CoverResult, SimError> {
            let result = simulate_cover(board, strategy, cap)?;
            let n = checked.fetch_add(1, Ordering::Relaxed) + 1;
            if !result.ok {
                failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    board = %board,
                    steps = result.steps,
                    ratio = result.ratio(),
                    cap = ?result.cap,
                    "board exceeded cap"
                );
            }
            if n % PROGRESS_EVERY == 0 {
                info!(
                    checked = n,
                    fails = failed.load(Ordering::Relaxed),
                    "sweep progress"
                );
            }
            Ok(result)
        })
        .try_fold(
            || SweepReport::new(label.as_str()),
            |mut report, result: Result<CoverResult, SimError>| {
                report.push(result?);
                Ok::<_, SimError>(report)
            },
        )
        .try_reduce(|| SweepReport::new(label.as_str()), |a, b| Ok(a.merge(b)))?;

    report.failures.sort_by_key(|r| r.board());
    info!(
        checked = report.checked,
        fails = report.failure_count(),
        mean_ratio = report.mean_ratio,
        "sweep done"
    );
    Ok(report)
}

/// Sizes the global rayon pool that [`sweep`] runs on.
///
/// `None` leaves rayon's default of one worker per core (or
/// `RAYON_NUM_THREADS`). Must run before the first sweep.
///
/// # Errors
///
/// [`SimError::ThreadPool`] if the global pool already exists.
pub fn configure_threads(threads: Option<usize>) -> Result<(), SimError> {
    let Some(n) = threads else {
        return Ok(());
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global()?;
    info!(threads = n, "sweep pool configured");
    Ok(())
}

/// [`sweep`] over every board with `S < max_area`, enumerated lazily.
///
/// # Errors
///
/// As [`sweep`].
pub fn sweep_all(
    max_area: u64,
    strategy: &Strategy,
    cap: CapPolicy,
) -> Result<SweepReport, SimError> {
    sweep(all_boards(max_area).par_bridge(), strategy, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_small_boards() {
        let report = sweep(
            all_boards(60).collect::<Vec<_>>(),
            &Strategy::default(),
            CapPolicy::STANDARD,
        )
        .unwrap();
        assert_eq!(report.checked, crate::board::board_count(60));
        assert!(report.all_passed(), "{:?}", report.failures);
    }

    #[test]
    fn test_sweep_matches_sequential() {
        let boards: Vec<Board> = all_boards(40).collect();
        let strategy = Strategy::Sturmian;
        let cap = CapPolicy::factor(3.0);
        let report = sweep(boards.clone(), &strategy, cap).unwrap();

        let mut expected: Vec<_> = boards
            .iter()
            .map(|&b| simulate_cover(b, &strategy, cap).unwrap())
            .filter(|r| !r.ok)
            .collect();
        expected.sort_by_key(|r| r.board());
        assert_eq!(report.failures, expected);
    }

    #[test]
    fn test_sweep_rejects_bad_strategy() {
        let bad = Strategy::Seeded {
            channels: 0,
            rotation: None,
            seed: 0,
        };
        assert!(sweep(Vec::<Board>::new(), &bad, CapPolicy::STANDARD).is_err());
    }

    #[test]
    fn test_configure_threads() {
        configure_threads(None).unwrap();
        // The global pool is built at most once per process.
        let _ = configure_threads(Some(2));
        assert!(matches!(
            configure_threads(Some(2)),
            Err(SimError::ThreadPool(_))
        ));
        let boards: Vec<Board> = all_boards(20).collect();
        let report = sweep(boards, &Strategy::default(), CapPolicy::STANDARD).unwrap();
        assert_eq!(report.checked, crate::board::board_count(20));
    }

    #[test]
    fn test_sweep_bridged_iterator() {
        let report = sweep_all(30, &Strategy::Reference, CapPolicy::factor(1_000.0)).unwrap();
        assert_eq!(report.checked, crate::board::board_count(30));
    }
}

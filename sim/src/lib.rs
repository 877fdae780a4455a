//! sturmwalk-sim - torus coverage harness.
//!
//! Plays the judge for the `sturmwalk` move stream: it owns the grid, tracks
//! which cells the agent has seen, and answers the driver's sink. On top of
//! the single-board simulation it offers parallel sweeps, seeded board
//! sampling, a height audit for multichannel sets, and a per-channel probe.
//!
//! # Modes
//!
//! | Mode | Entry point |
//! |------|-------------|
//! | Listed boards | [`simulate_cover`] |
//! | Every board `S < N` | [`sweep_all`] |
//! | Random boards | [`sweep`] over [`sample_boards`] |
//! | Height audit | [`audit_heights`] |
//! | Channel probe | [`probe`] |
//! | Inlined cross-check | [`selftest`] |
//!
//! # Entry Point
//!
//! ```
//! use sturmwalk::Strategy;
//! use sturmwalk_sim::{simulate_cover, Board, CapPolicy};
//!
//! let board: Board = "3x3".parse().unwrap();
//! let result = simulate_cover(board, &Strategy::Sturmian, CapPolicy::STANDARD).unwrap();
//! assert!(result.ok);
//! assert_eq!(result.steps, 13);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod audit;
pub mod board;
pub mod config;
pub mod cover;
pub mod error;
pub mod probe;
pub mod report;
pub mod sweep;
pub mod torus;

pub use audit::{audit_heights, best_distance, AuditReport};
pub use board::{all_boards, board_count, sample_boards, Board, MAX_AREA};
pub use config::{SimConfig, StrategyKind};
pub use cover::{selftest, simulate_cover, CapPolicy, CoverResult, SelftestResult};
pub use error::SimError;
pub use probe::{probe, ChannelProbe};
pub use report::{Severity, SweepReport};
pub use sweep::{configure_threads, sweep, sweep_all};
pub use torus::Torus;

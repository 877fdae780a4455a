//! Coverage simulation: one board, one fresh generator, one verdict.

use core::fmt;

use serde::Serialize;
use sturmwalk::{BitSource, Block, Direction, Driver, Strategy, BUDGET_FACTOR};
use tracing::debug;

use crate::board::Board;
use crate::error::SimError;
use crate::report::Severity;
use crate::torus::Torus;

/// Move ceiling applied to a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapPolicy {
    /// The ceiling is `⌊factor · S⌋` moves.
    pub factor: f64,
    /// When false the walk runs until the board is covered.
    pub enabled: bool,
}

impl CapPolicy {
    /// The standard `35·S` ceiling.
    pub const STANDARD: Self = Self {
        factor: BUDGET_FACTOR as f64,
        enabled: true,
    };

    /// No ceiling.
    pub const NONE: Self = Self {
        factor: BUDGET_FACTOR as f64,
        enabled: false,
    };

    /// A ceiling of `factor · S`.
    pub const fn factor(factor: f64) -> Self {
        Self {
            factor,
            enabled: true,
        }
    }

    /// Move limit for `area` cells; a walk fails once it exceeds this.
    pub fn limit(&self, area: u64) -> Option<u64> {
        self.enabled.then(|| (self.factor * area as f64) as u64)
    }
}

impl Default for CapPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Verdict for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverResult {
    /// Width A.
    pub width: u64,
    /// Height B.
    pub height: u64,
    /// Cell count S.
    pub area: u64,
    /// Moves made when the walk stopped.
    pub steps: u64,
    /// Whether every cell was visited within the cap.
    pub ok: bool,
    /// The move limit in force, if any.
    pub cap: Option<u64>,
}

impl CoverResult {
    /// The board this result is for.
    pub const fn board(&self) -> Board {
        Board {
            width: self.width,
            height: self.height,
        }
    }

    /// Moves per cell, `steps / S`.
    pub fn ratio(&self) -> f64 {
        self.steps as f64 / self.area as f64
    }

    /// Pass or failure.
    pub const fn severity(&self) -> Severity {
        if self.ok {
            Severity::Pass
        } else {
            Severity::Failure
        }
    }

    fn new(torus: &Torus, cap: Option<u64>) -> Self {
        let board = torus.board();
        Self {
            width: board.width,
            height: board.height,
            area: board.area(),
            steps: torus.moves(),
            ok: torus.is_complete(),
            cap,
        }
    }
}

impl fmt::Display for CoverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.ok { "[OK]  " } else { "[FAIL]" };
        write!(
            f,
            "{status} {}: steps={} ({:.3}·S), S={}",
            self.board(),
            self.steps,
            self.ratio(),
            self.area
        )?;
        match self.cap {
            Some(cap) => write!(f, " cap={cap}"),
            None => write!(f, " cap=none"),
        }
    }
}

/// Walks `board` with a fresh generator from `strategy` until the board is
/// covered or the cap is exceeded.
///
/// A board that is already covered at the start (`1×1`) needs no moves.
///
/// # Errors
///
/// [`SimError::Config`] if `strategy` does not describe a valid generator.
pub fn simulate_cover(
    board: Board,
    strategy: &Strategy,
    cap: CapPolicy,
) -> Result<CoverResult, SimError> {
    let source = strategy.build()?;
    let limit = cap.limit(board.area());
    let mut torus = Torus::new(board);

    if !torus.is_complete() {
        Driver::new(source).run(|d: Direction| {
            torus.step(d);
            torus.is_complete() || limit.is_some_and(|l| torus.moves() > l)
        });
    }

    let result = CoverResult::new(&torus, limit);
    debug!(
        board = %board,
        steps = result.steps,
        ok = result.ok,
        "board simulated"
    );
    Ok(result)
}

/// Result of [`selftest`]: the inlined walk and the driver walk side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelftestResult {
    /// Verdict of the inlined block loop.
    pub inline: CoverResult,
    /// Moves the [`Driver`] path needed on the same board.
    pub driver_steps: u64,
}

impl SelftestResult {
    /// Whether both paths stopped after the same move.
    pub const fn agrees(&self) -> bool {
        self.inline.steps == self.driver_steps
    }
}

/// Walks `board` with an inlined block loop that pulls bits straight from
/// the generator, then cross-checks the move count against
/// [`simulate_cover`].
///
/// # Errors
///
/// As [`simulate_cover`].
pub fn selftest(
    board: Board,
    strategy: &Strategy,
    cap: CapPolicy,
) -> Result<SelftestResult, SimError> {
    let mut source = strategy.build()?;
    let limit = cap.limit(board.area());
    let mut torus = Torus::new(board);
    let over = |t: &Torus| limit.is_some_and(|l| t.moves() > l);

    'walk: while !torus.is_complete() {
        let block = Block::from_bit(source.next_bit());
        for k in 0..block.len() {
            torus.step(block.step(k));
            if torus.is_complete() || over(&torus) {
                break 'walk;
            }
        }
    }

    let inline = CoverResult::new(&torus, limit);
    let driver_steps = simulate_cover(board, strategy, cap)?.steps;
    Ok(SelftestResult {
        inline,
        driver_steps,
    })
}

//! Height audit for multichannel sets.
//!
//! On an `A × B` torus a channel with increment `P` returns to the same row
//! every `B` blocks, and its state has moved by `δ = (B·P) mod M` in that
//! time. If `δ = 0` for every channel the per-row block pattern repeats
//! exactly and the walk can loop forever on a strict subset of cells. The
//! audit checks that no height below the bound is degenerate for the whole
//! set and reports the height whose best channel comes closest.

use rayon::prelude::*;
use serde::Serialize;
use sturmwalk::ring::mul_mod;
use sturmwalk::ChannelSet;
use tracing::info;

/// Result of [`audit_heights`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Heights `1..max_height` were checked.
    pub max_height: u64,
    /// Smallest height with `δ = 0` on every channel, if any.
    pub degenerate: Option<u64>,
    /// Height whose best channel has the smallest circular distance.
    pub weakest_height: Option<u64>,
    /// That distance, `min(δ, M − δ) / M` on the best channel.
    pub weakest_distance: f64,
}

impl AuditReport {
    /// Returns true if no checked height is degenerate.
    pub fn passed(&self) -> bool {
        self.degenerate.is_none()
    }
}

/// Circular distance of the row-return offset from zero, maximised over
/// the channels of `set`.
pub fn best_distance(set: &ChannelSet, height: u64) -> f64 {
    set.channels()
        .iter()
        .map(|ch| {
            let p = ch.params();
            let m = p.modulus();
            let delta = mul_mod(height % m, p.increment(), m);
            delta.min(m - delta) as f64 / m as f64
        })
        .fold(0.0, f64::max)
}

/// Checks every height in `1..max_height`.
pub fn audit_heights(set: &ChannelSet, max_height: u64) -> AuditReport {
    let (weakest_distance, weakest_height) = (1..max_height)
        .into_par_iter()
        .map(|b| (best_distance(set, b), b))
        .reduce(
            || (f64::INFINITY, u64::MAX),
            |a, b| if b.0 < a.0 || (b.0 == a.0 && b.1 < a.1) { b } else { a },
        );
    let weakest_height = (weakest_height != u64::MAX).then_some(weakest_height);

    // δ = 0 on every channel is exactly a best distance of zero.
    let degenerate = match weakest_height {
        Some(_) if weakest_distance == 0.0 => (1..max_height)
            .into_par_iter()
            .find_first(|&b| best_distance(set, b) == 0.0),
        _ => None,
    };

    info!(
        max_height,
        weakest = ?weakest_height,
        distance = weakest_distance,
        "height audit done"
    );
    AuditReport {
        max_height,
        degenerate,
        weakest_height,
        weakest_distance: if weakest_height.is_some() {
            weakest_distance
        } else {
            0.0
        },
    }
}

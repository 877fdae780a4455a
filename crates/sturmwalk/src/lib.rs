//! sturmwalk - grid-blind move sequences for toroidal coverage
//!
//! A blind agent on an unknown `A × B` torus receives an endless stream of
//! moves and is told only when every cell has been visited. sturmwalk
//! produces that stream without ever seeing `A` or `B`.
//!
//! # Execution Model
//!
//! ```text
//! bit source ──bit──▶ block ──moves──▶ driver ──▶ sink(direction) -> stop?
//! ```
//!
//! Each bit becomes a **block**: `t = 1 + bit` moves RIGHT, then one UP.
//! The driver checks the sink after every move and stops the moment it
//! answers `true`.
//!
//! # Bit Sources
//!
//! | Source | Type | Notes |
//! |--------|------|-------|
//! | Fibonacci word | [`SturmianWord`] | lazy morphism expansion, no `11` |
//! | Rotation channel | [`Channel`] | `x ← x + P mod M`, bit `= [x < T]` |
//! | Multichannel | [`ChannelSet`] | K channels, index `n·R mod K` |
//!
//! A single Sturmian channel can be forced into needing far more than
//! `35·S` moves by heights `B` that make its row-return offsets nearly
//! constant. The multichannel set hedges that case with several unrelated
//! rotations. The resulting bound is empirical, not proven.
//!
//! # Example: Driving a Sink
//!
//! ```
//! use sturmwalk::{ChannelSet, Direction, Driver};
//!
//! let mut driver = Driver::new(ChannelSet::default());
//! let mut moves = 0;
//! let done = driver.run(|_: Direction| {
//!     moves += 1;
//!     moves == 100
//! });
//! assert_eq!(done.moves, 100);
//! ```
//!
//! # Example: Pulling Moves
//!
//! ```
//! use sturmwalk::{Direction, Moves, SturmianWord};
//!
//! let rights = Moves::new(SturmianWord::new())
//!     .take(1000)
//!     .filter(|&d| d == Direction::Right)
//!     .count();
//! assert_eq!(rights, 580);
//! ```
//!
//! # Design Principles
//!
//! - **Grid-blind**: no signature in this crate accepts a grid dimension
//! - **Deterministic**: every generator is rebuilt from fixed constants
//! - **Integer-only**: channel arithmetic is exact modular `u64` arithmetic
//! - **Validated once**: invalid configurations are rejected at construction

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

extern crate alloc;

// Numeric foundation (constants, ring, mix)
mod core;

// Construction-time errors
mod error;

// The bit-source seam
mod source;

// Fibonacci word
pub mod word;

// Integer rotation channels
pub mod channel;

// Jumped round-robin over channels
pub mod scheduler;

// Bit → block → moves
pub mod block;

// Sink-driven run loop
pub mod driver;

// Selecting a generator by value
pub mod strategy;

// Re-export submodules for external access
pub use crate::core::constants;
pub use crate::core::mix;
pub use crate::core::ring;

// Re-export core types at crate root
pub use block::{Block, Blocks, Direction, Moves};
pub use channel::{Channel, ChannelParams};
pub use driver::{Driver, MoveSink, Termination};
pub use error::ConfigError;
pub use scheduler::{default_rotation, ChannelSet};
pub use source::BitSource;
pub use strategy::Strategy;
pub use word::SturmianWord;

pub use crate::core::constants::{BUDGET_FACTOR, DEFAULT_CHANNELS, DEFAULT_SEED, MERSENNE_61};

/// Prelude module for convenient imports.
///
/// ```
/// use sturmwalk::prelude::*;
///
/// let mut source = ChannelSet::default();
/// let _ = source.next_bit();
/// ```
pub mod prelude {
    pub use crate::block::{Block, Blocks, Direction, Moves};
    pub use crate::channel::{Channel, ChannelParams};
    pub use crate::core::constants::{BUDGET_FACTOR, DEFAULT_CHANNELS, DEFAULT_SEED};
    pub use crate::core::mix::derive_params;
    pub use crate::driver::{Driver, MoveSink, Termination};
    pub use crate::error::ConfigError;
    pub use crate::scheduler::{default_rotation, ChannelSet};
    pub use crate::source::BitSource;
    pub use crate::strategy::Strategy;
    pub use crate::word::SturmianWord;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_head() {
        let bits: Vec<u8> = SturmianWord::new().take(13).collect();
        assert_eq!(bits, [0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_block_move_counts() {
        // Each block contributes t + 1 moves; summing over the first 1000
        // blocks must agree with the move iterator's UP count.
        let mut word = SturmianWord::new();
        let total: u64 = (0..1000)
            .map(|_| u64::from(Block::from_bit(word.next_bit()).len()))
            .sum();
        let ups = Moves::new(SturmianWord::new())
            .take(total as usize)
            .filter(|&d| d == Direction::Up)
            .count();
        assert_eq!(ups, 1000);
    }

    #[test]
    fn test_sturmian_slope() {
        // Share of 1s tends to 1/φ² ≈ 0.381966.
        let ones: u32 = SturmianWord::new().take(100_000).map(u32::from).sum();
        let share = f64::from(ones) / 100_000.0;
        assert!((share - 0.381_966).abs() < 1e-4, "share {share}");
    }
}

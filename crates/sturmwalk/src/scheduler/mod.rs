//! Multichannel rotation scheduler.
//!
//! A [`ChannelSet`] owns `K` independent [`Channel`]s. Block `n` takes its
//! bit from channel
//!
//! ```text
//! i_n = (n · R) mod K,   gcd(R, K) = 1
//! ```
//!
//! and only that channel advances. Because `R` is a unit mod `K`, every
//! run of `K` consecutive blocks visits each channel exactly once; the jump
//! decorrelates which channel serves which row-return compared with plain
//! round-robin (`R = 1`).
//!
//! # Construction
//!
//! | Constructor | Channels | Rotation |
//! |-------------|----------|----------|
//! | [`ChannelSet::new`] | caller-supplied | caller-supplied, validated |
//! | [`ChannelSet::seeded`] | [`derive_params`] per index | [`default_rotation`] |
//! | [`ChannelSet::reference`] | four irrational-slope channels mod 2^61 − 1 | 1 |
//! | `Default` | `seeded(DEFAULT_CHANNELS, DEFAULT_SEED)` | [`default_rotation`] |
//!
//! No constructor takes a grid dimension.

use alloc::vec::Vec;

use crate::channel::{Channel, ChannelParams};
use crate::core::constants::{
    DEFAULT_CHANNELS, DEFAULT_SEED, MERSENNE_61, REFERENCE_INCREMENTS, REFERENCE_THRESHOLDS,
};
use crate::core::mix::derive_params;
use crate::core::ring::coprime;
use crate::error::ConfigError;
use crate::source::BitSource;

/// Default jump for `k` channels.
///
/// The smallest `r ≥ ⌈0.618·k⌉` coprime to `k`, searching upward and
/// wrapping to 1. Always a unit modulo `k`.
///
/// # Example
///
/// ```
/// use sturmwalk::scheduler::default_rotation;
///
/// assert_eq!(default_rotation(1), 1);
/// assert_eq!(default_rotation(4), 3);
/// assert_eq!(default_rotation(10), 7);
/// ```
#[must_use]
pub fn default_rotation(k: usize) -> u64 {
    let k = k as u64;
    let start = (k * 618).div_ceil(1000).max(1);
    (start..k)
        .chain(1..start.min(k))
        .find(|&r| coprime(r, k))
        .unwrap_or(1)
}

/// K channels behind a jumped round-robin index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSet {
    channels: Vec<Channel>,
    rotation: u64,
    /// `(n · R) mod K` for the next block.
    cursor: usize,
    blocks: u64,
}

impl ChannelSet {
    /// Builds a set from explicit channels and rotation multiplier.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoChannels`] if `channels` is empty,
    /// [`ConfigError::RotationNotCoprime`] if `gcd(rotation, K) ≠ 1`.
    pub fn new(channels: Vec<Channel>, rotation: u64) -> Result<Self, ConfigError> {
        if channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        let k = channels.len() as u64;
        if !coprime(rotation % k, k) {
            return Err(ConfigError::RotationNotCoprime {
                rotation,
                channels: k,
            });
        }
        Ok(Self {
            channels,
            rotation: rotation % k,
            cursor: 0,
            blocks: 0,
        })
    }

    /// `k` channels derived from `seed`, default rotation.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoChannels`] if `k == 0`.
    pub fn seeded(k: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::seeded_with_rotation(k, seed, default_rotation(k))
    }

    /// `k` channels derived from `seed` with an explicit rotation.
    ///
    /// # Errors
    ///
    /// As [`ChannelSet::new`].
    pub fn seeded_with_rotation(k: usize, seed: u64, rotation: u64) -> Result<Self, ConfigError> {
        let channels = (0..k as u64)
            .map(|i| Channel::new(derive_params(seed, i)))
            .collect();
        Self::new(channels, rotation)
    }

    /// The four-channel irrational-slope preset, plain round-robin.
    ///
    /// Increments are `⌊M/c⌋` for `c ∈ {φ, √2, e, √3}` and thresholds
    /// `⌊α·M⌋` for `α ∈ {φ−1, √2−1, 2−φ, 1/√2}`, with `M = 2^61 − 1`.
    ///
    /// # Polarity
    ///
    /// Like every [`Channel`], the preset emits `bit = [x < T]`, so a state
    /// below the threshold gives a long `t = 2` block. Under the
    /// `t = 1 when x < T` convention the same constants give every block
    /// the opposite length, and that move stream is not reproduced here.
    /// The preset is a cross-check of the engine, not a covering
    /// guarantee: with the default cap some small boards take more than
    /// `35·S` moves.
    ///
    /// ```
    /// use sturmwalk::ChannelSet;
    ///
    /// let mut set = ChannelSet::reference();
    /// // Channel 0 starts at x = P = T, so [x < T] = 0.
    /// assert_eq!(set.next_bit(), 0);
    /// ```
    #[must_use]
    pub fn reference() -> Self {
        let channels = REFERENCE_INCREMENTS
            .iter()
            .zip(REFERENCE_THRESHOLDS.iter())
            .map(|(&p, &t)| Channel::new(ChannelParams::from_parts(MERSENNE_61, p, t)))
            .collect();
        Self {
            channels,
            rotation: 1,
            cursor: 0,
            blocks: 0,
        }
    }

    /// Index of the channel that will serve the next block.
    #[inline]
    #[must_use]
    pub const fn next_index(&self) -> usize {
        self.cursor
    }

    /// Advances the selected channel and returns its bit.
    pub fn next_bit(&mut self) -> u8 {
        let bit = self.channels[self.cursor].advance();
        self.cursor = ((self.cursor as u64 + self.rotation) % self.channels.len() as u64) as usize;
        self.blocks += 1;
        bit
    }

    /// Channel count `K`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false: a set holds at least one channel.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Rotation multiplier `R`, reduced mod `K`.
    #[inline]
    #[must_use]
    pub const fn rotation(&self) -> u64 {
        self.rotation
    }

    /// Number of bits served so far (the block counter `n`).
    #[inline]
    #[must_use]
    pub const fn blocks(&self) -> u64 {
        self.blocks
    }

    /// The channels, in index order.
    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Index sequence `i_n` for `n = 0, 1, …`, independent of channel state.
    pub fn schedule(&self) -> impl Iterator<Item = usize> {
        let k = self.channels.len() as u64;
        let r = self.rotation;
        (0u64..).map(move |n| ((n % k) * r % k) as usize)
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        let channels = (0..DEFAULT_CHANNELS as u64)
            .map(|i| Channel::new(derive_params(DEFAULT_SEED, i)))
            .collect();
        Self {
            channels,
            rotation: default_rotation(DEFAULT_CHANNELS),
            cursor: 0,
            blocks: 0,
        }
    }
}

impl BitSource for ChannelSet {
    #[inline]
    fn next_bit(&mut self) -> u8 {
        ChannelSet::next_bit(self)
    }
}

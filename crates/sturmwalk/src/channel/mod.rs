//! Channel - an integer rotation standing in for a Sturmian source.
//!
//! A channel walks the orbit `x ← (x + P) mod M` and reports whether the
//! new state fell below a threshold:
//!
//! ```text
//! advance():  x ← (x + P) mod M     update first
//!             bit = [x < T]         then compare
//! ```
//!
//! Over one full period of the orbit the share of 1 bits is `T/M` up to
//! `O(1/period)`. For `P/M` close to an irrational slope the bit stream is
//! a finite-precision approximation of the corresponding Sturmian word. All
//! arithmetic is exact on `u64`; there is no floating point.
//!
//! # Example
//!
//! ```
//! use sturmwalk::channel::{Channel, ChannelParams};
//!
//! let params = ChannelParams::new(10, 3, 5)?;
//! let mut ch = Channel::new(params);
//! let bits: Vec<u8> = (0..10).map(|_| ch.advance()).collect();
//! // states 3 6 9 2 5 8 1 4 7 0
//! assert_eq!(bits, [1, 0, 0, 1, 0, 0, 1, 1, 0, 1]);
//! # Ok::<(), sturmwalk::ConfigError>(())
//! ```

use crate::core::ring::{add_mod, orbit_period};
use crate::error::ConfigError;
use crate::source::BitSource;

/// The `(M, P, T)` triple of a channel.
///
/// Invariants, checked by [`ChannelParams::new`]: `0 < M < 2^63`,
/// `P < M`, `T ≤ M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelParams {
    modulus: u64,
    increment: u64,
    threshold: u64,
}

impl ChannelParams {
    /// Largest accepted modulus. Keeps `x + P` below `u64::MAX`.
    pub const MAX_MODULUS: u64 = (1 << 63) - 1;

    /// Validates and builds a parameter triple.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `M` is zero or too large, `P ≥ M`, or
    /// `T > M`.
    pub const fn new(modulus: u64, increment: u64, threshold: u64) -> Result<Self, ConfigError> {
        if modulus == 0 {
            return Err(ConfigError::ZeroModulus);
        }
        if modulus > Self::MAX_MODULUS {
            return Err(ConfigError::ModulusTooLarge { modulus });
        }
        if increment >= modulus {
            return Err(ConfigError::IncrementOutOfRange { increment, modulus });
        }
        if threshold > modulus {
            return Err(ConfigError::ThresholdOutOfRange { threshold, modulus });
        }
        Ok(Self {
            modulus,
            increment,
            threshold,
        })
    }

    /// Builds a triple the caller has already proven valid.
    pub(crate) const fn from_parts(modulus: u64, increment: u64, threshold: u64) -> Self {
        debug_assert!(modulus > 0 && modulus <= Self::MAX_MODULUS);
        debug_assert!(increment < modulus && threshold <= modulus);
        Self {
            modulus,
            increment,
            threshold,
        }
    }

    /// The modulus `M`.
    #[inline]
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The increment `P`.
    #[inline]
    #[must_use]
    pub const fn increment(&self) -> u64 {
        self.increment
    }

    /// The threshold `T`.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Orbit period `M / gcd(M, P)`.
    #[inline]
    #[must_use]
    pub const fn period(&self) -> u64 {
        orbit_period(self.increment, self.modulus)
    }
}

/// A rotation channel: parameters plus the current state `x ∈ [0, M)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    params: ChannelParams,
    state: u64,
}

impl Channel {
    /// Creates a channel at state 0.
    #[inline]
    #[must_use]
    pub const fn new(params: ChannelParams) -> Self {
        Self { params, state: 0 }
    }

    /// Creates a channel at `state mod M`.
    #[inline]
    #[must_use]
    pub const fn with_state(params: ChannelParams, state: u64) -> Self {
        Self {
            params,
            state: state % params.modulus,
        }
    }

    /// Steps the orbit once, then reports `x < T`.
    #[inline]
    pub fn advance(&mut self) -> u8 {
        self.state = add_mod(self.state, self.params.increment, self.params.modulus);
        self.peek()
    }

    /// The bit for the current state, without stepping.
    #[inline]
    #[must_use]
    pub const fn peek(&self) -> u8 {
        (self.state < self.params.threshold) as u8
    }

    /// Current state `x`.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// The channel's parameters.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> ChannelParams {
        self.params
    }

    /// Orbit period of the state sequence.
    #[inline]
    #[must_use]
    pub const fn period(&self) -> u64 {
        self.params.period()
    }
}

impl BitSource for Channel {
    #[inline]
    fn next_bit(&mut self) -> u8 {
        self.advance()
    }
}

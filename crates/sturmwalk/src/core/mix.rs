//! Deterministic seed mixing.
//!
//! Channel parameters are drawn from a SplitMix64 stream keyed by a fixed
//! seed and the channel index. The derivation is a pure function: the same
//! `(seed, index)` always yields the same `(M, P, T)` triple, with no
//! external randomness and no reference to the grid.

use super::constants::{GOLDEN_GAMMA, MODULUS_FLOOR};
use crate::channel::ChannelParams;

/// SplitMix64 output stream.
///
/// # Example
///
/// ```
/// use sturmwalk::mix::SplitMix64;
///
/// let mut a = SplitMix64::new(7);
/// let mut b = SplitMix64::new(7);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a stream starting at `seed`.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the stream and returns the next mixed word.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        finalize(self.state)
    }
}

/// SplitMix64 finalizer (Stafford variant 13).
#[inline]
#[must_use]
pub const fn finalize(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derives the parameters of channel `index` from `seed`.
///
/// Ranges:
///
/// | Field | Range |
/// |-------|-------|
/// | `M` | odd, `[2^60, 2^61)` |
/// | `P` | `[M/8, 7M/8)` |
/// | `T` | `[3M/10, 7M/10)` |
///
/// Keeping `T/M` inside `[0.3, 0.7)` keeps every channel's 1-frequency
/// away from the degenerate ends.
///
/// # Example
///
/// ```
/// use sturmwalk::mix::derive_params;
///
/// let p = derive_params(0xC0FFEE, 0);
/// assert_eq!(p, derive_params(0xC0FFEE, 0));
/// assert!(p.threshold() <= p.modulus());
/// ```
#[must_use]
pub fn derive_params(seed: u64, index: u64) -> ChannelParams {
    let mut stream = SplitMix64::new(seed ^ index.wrapping_mul(GOLDEN_GAMMA));
    let r_modulus = stream.next_u64();
    let r_increment = stream.next_u64();
    let r_threshold = stream.next_u64();

    let modulus = MODULUS_FLOOR | (r_modulus & (MODULUS_FLOOR - 1)) | 1;
    let increment = modulus / 8 + r_increment % (modulus / 4 * 3);
    let threshold = modulus / 10 * 3 + r_threshold % (modulus / 5 * 2);

    ChannelParams::from_parts(modulus, increment, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix_known_vector() {
        // First outputs for seed 0 (reference SplitMix64).
        let mut s = SplitMix64::new(0);
        assert_eq!(s.next_u64(), 0xE220_A839_7B1D_CDAF);
        assert_eq!(s.next_u64(), 0x6E78_9E6A_A1B9_65F4);
    }

    #[test]
    fn test_derived_ranges() {
        for seed in [0u64, 1, 0xC0FFEE, u64::MAX] {
            for index in 0..64 {
                let p = derive_params(seed, index);
                let m = p.modulus();
                assert!(m >= MODULUS_FLOOR && m < 2 * MODULUS_FLOOR);
                assert_eq!(m % 2, 1);
                assert!(p.increment() >= m / 8 && p.increment() < m);
                assert!(p.threshold() >= m / 10 * 3);
                assert!(p.threshold() < m / 10 * 3 + m / 5 * 2);
            }
        }
    }

    #[test]
    fn test_indices_are_distinct() {
        let a = derive_params(0xC0FFEE, 0);
        let b = derive_params(0xC0FFEE, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_seed_channel_zero() {
        let p = derive_params(crate::core::constants::DEFAULT_SEED, 0);
        assert_eq!(p.modulus(), 1_910_114_457_377_886_459);
        assert_eq!(p.increment(), 1_550_189_314_908_185_242);
        assert_eq!(p.threshold(), 1_185_902_717_786_834_802);
    }
}

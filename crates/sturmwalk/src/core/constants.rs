//! Fixed constants.
//!
//! Nothing here depends on the grid. Every generator in the crate is
//! re-creatable from these values alone.

/// Mersenne prime 2^61 − 1, the modulus of the reference channel preset.
pub const MERSENNE_61: u64 = (1 << 61) - 1;

/// Lower bound of a derived channel modulus (2^60).
///
/// Derived moduli lie in `[MODULUS_FLOOR, 2 * MODULUS_FLOOR)`, which keeps
/// `x + P` below 2^62 and therefore free of overflow.
pub const MODULUS_FLOOR: u64 = 1 << 60;

/// Number of channels in the default seeded set.
pub const DEFAULT_CHANNELS: usize = 4;

/// Seed the default channel set is derived from.
pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;

/// Golden-ratio increment of the SplitMix64 stream (⌊2^64 / φ⌋).
pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Move budget factor the coverage guarantee is stated against (35·S).
pub const BUDGET_FACTOR: u64 = 35;

/// Reference increments `⌊M / c⌋` for `c ∈ {φ, √2, e, √3}`, `M = 2^61 − 1`.
pub const REFERENCE_INCREMENTS: [u64; 4] = [
    1_425_089_352_415_399_810,
    1_630_477_228_166_597_775,
    848_272_237_658_610_658,
    1_331_279_082_078_542_924,
];

/// Reference thresholds `⌊α · M⌋` for `α ∈ {φ − 1, √2 − 1, 2 − φ, 1/√2}`.
pub const REFERENCE_THRESHOLDS: [u64; 4] = [
    1_425_089_352_415_399_810,
    955_111_447_119_501_600,
    880_753_656_798_294_140,
    1_630_477_228_166_597_775,
];

//! Construction-time contract violations.
//!
//! Generators are validated once, when they are built. A value of any
//! generator type is therefore always well-formed and emitting bits from it
//! cannot fail.

use thiserror::Error;

/// A rejected generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A channel set needs at least one channel.
    #[error("channel set must contain at least one channel")]
    NoChannels,

    /// The scheduler's jump must be a unit modulo the channel count.
    #[error("rotation {rotation} is not coprime to channel count {channels}")]
    RotationNotCoprime {
        /// Requested rotation multiplier R.
        rotation: u64,
        /// Channel count K.
        channels: u64,
    },

    /// A channel modulus of zero has no residues.
    #[error("channel modulus must be positive")]
    ZeroModulus,

    /// A channel modulus at or above 2^63 could overflow `x + P`.
    #[error("channel modulus {modulus} exceeds 2^63 - 1")]
    ModulusTooLarge {
        /// Requested modulus M.
        modulus: u64,
    },

    /// The increment must be a residue in `[0, M)`.
    #[error("increment {increment} outside [0, {modulus})")]
    IncrementOutOfRange {
        /// Requested increment P.
        increment: u64,
        /// Channel modulus M.
        modulus: u64,
    },

    /// The threshold must lie in `[0, M]`.
    #[error("threshold {threshold} outside [0, {modulus}]")]
    ThresholdOutOfRange {
        /// Requested threshold T.
        threshold: u64,
        /// Channel modulus M.
        modulus: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ConfigError::RotationNotCoprime {
                rotation: 2,
                channels: 4
            }
            .to_string(),
            "rotation 2 is not coprime to channel count 4"
        );
        assert_eq!(
            ConfigError::ThresholdOutOfRange {
                threshold: 11,
                modulus: 10
            }
            .to_string(),
            "threshold 11 outside [0, 10]"
        );
    }
}

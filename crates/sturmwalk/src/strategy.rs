//! Grid-independent description of a bit source.
//!
//! Outer tooling (simulators, command lines, configuration files) selects a
//! generator by value and builds a fresh one per run. Nothing here refers to
//! the grid.

use core::fmt;

use crate::core::constants::{DEFAULT_CHANNELS, DEFAULT_SEED};
use crate::error::ConfigError;
use crate::scheduler::{default_rotation, ChannelSet};
use crate::source::BitSource;
use crate::word::SturmianWord;

/// Which generator feeds the block assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The Fibonacci word alone.
    Sturmian,
    /// `channels` seeded rotations behind the jumped scheduler.
    Seeded {
        /// Channel count `K`.
        channels: usize,
        /// Jump `R`; `None` picks [`default_rotation`].
        rotation: Option<u64>,
        /// Seed for [`crate::mix::derive_params`].
        seed: u64,
    },
    /// The four-channel irrational-slope preset.
    ///
    /// Emits `[x < T]` per channel, the opposite block polarity to the
    /// `t = 1 when x < T` convention, so it does not reproduce walks taken
    /// under that convention. Some small boards exceed `35·S`; see
    /// [`ChannelSet::reference`].
    Reference,
}

impl Strategy {
    /// Builds a fresh source at position 0.
    ///
    /// # Errors
    ///
    /// Propagates the [`ConfigError`] of an invalid seeded configuration.
    pub fn build(&self) -> Result<Box<dyn BitSource + Send>, ConfigError> {
        Ok(match *self {
            Self::Sturmian => Box::new(SturmianWord::new()),
            Self::Seeded {
                channels,
                rotation,
                seed,
            } => Box::new(ChannelSet::seeded_with_rotation(
                channels,
                seed,
                rotation.unwrap_or_else(|| default_rotation(channels)),
            )?),
            Self::Reference => Box::new(ChannelSet::reference()),
        })
    }

    /// Builds the channel set behind a multichannel strategy, `None` for
    /// [`Strategy::Sturmian`].
    ///
    /// # Errors
    ///
    /// As [`Strategy::build`].
    pub fn channel_set(&self) -> Result<Option<ChannelSet>, ConfigError> {
        match *self {
            Self::Sturmian => Ok(None),
            Self::Seeded {
                channels,
                rotation,
                seed,
            } => ChannelSet::seeded_with_rotation(
                channels,
                seed,
                rotation.unwrap_or_else(|| default_rotation(channels)),
            )
            .map(Some),
            Self::Reference => Ok(Some(ChannelSet::reference())),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Seeded {
            channels: DEFAULT_CHANNELS,
            rotation: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sturmian => write!(f, "sturmian"),
            Self::Seeded {
                channels,
                rotation: Some(r),
                seed,
            } => write!(f, "seeded(k={channels}, r={r}, seed={seed:#x})"),
            Self::Seeded {
                channels,
                rotation: None,
                seed,
            } => write!(
                f,
                "seeded(k={channels}, r={}, seed={seed:#x})",
                default_rotation(*channels)
            ),
            Self::Reference => write!(f, "reference"),
        }
    }
}

//! Harness errors.

use std::path::PathBuf;

use sturmwalk::ConfigError;
use thiserror::Error;

/// Everything that can go wrong before or around a simulation.
///
/// A board that exceeds its cap is not an error: it is a failed
/// [`crate::CoverResult`].
#[derive(Debug, Error)]
pub enum SimError {
    /// A board token did not parse as `AxB`.
    #[error("invalid board `{0}`: expected AxB with positive integers")]
    InvalidBoard(String),

    /// A board with a zero side has no cells to cover.
    #[error("board {width}x{height} has no cells")]
    EmptyBoard {
        /// Width A.
        width: u64,
        /// Height B.
        height: u64,
    },

    /// The board has more cells than the harness tracks.
    #[error("board {width}x{height} exceeds the {max}-cell limit")]
    BoardTooLarge {
        /// Width A.
        width: u64,
        /// Height B.
        height: u64,
        /// [`crate::board::MAX_AREA`].
        max: u64,
    },

    /// The selected generator configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The TOML configuration did not parse.
    #[error("invalid configuration: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The sweep thread pool could not be configured.
    #[error("failed to configure thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SimError::InvalidBoard("3by3".into()).to_string(),
            "invalid board `3by3`: expected AxB with positive integers"
        );
        assert_eq!(
            SimError::EmptyBoard {
                width: 0,
                height: 7
            }
            .to_string(),
            "board 0x7 has no cells"
        );
        assert_eq!(
            SimError::BoardTooLarge {
                width: 70_000,
                height: 70_000,
                max: 1 << 32
            }
            .to_string(),
            "board 70000x70000 exceeds the 4294967296-cell limit"
        );
        assert_eq!(
            SimError::from(ConfigError::NoChannels).to_string(),
            ConfigError::NoChannels.to_string()
        );
    }
}

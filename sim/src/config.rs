//! Harness configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Command-line flags are applied on top by the caller.
//!
//! ```toml
//! strategy = "seeded"
//! channels = 6
//! seed = 7
//! cap_factor = 20.0
//! threads = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sturmwalk::{Strategy, BUDGET_FACTOR, DEFAULT_CHANNELS, DEFAULT_SEED};

use crate::cover::CapPolicy;
use crate::error::SimError;

/// Generator family, as named in configuration and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// The Fibonacci word.
    Sturmian,
    /// Seeded multichannel set.
    #[default]
    Seeded,
    /// The fixed four-channel preset.
    Reference,
}

/// Settings for every harness mode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Generator family.
    pub strategy: StrategyKind,
    /// Channel count K for [`StrategyKind::Seeded`].
    pub channels: usize,
    /// Scheduler jump R; `None` picks the default for K.
    pub rotation: Option<u64>,
    /// Parameter seed for [`StrategyKind::Seeded`].
    pub seed: u64,
    /// Cap multiplier: a board fails after `cap_factor · S` moves.
    pub cap_factor: f64,
    /// Whether the cap applies at all.
    pub use_cap: bool,
    /// Boards with `S < max_area` are in scope for `all`, `sample`, and
    /// `theorem`.
    pub max_area: u64,
    /// Number of boards drawn by `sample`.
    pub samples: usize,
    /// RNG seed for `sample`.
    pub sample_seed: u64,
    /// Blocks inspected by `probe`.
    pub probe_blocks: usize,
    /// Sweep worker threads; `None` leaves the rayon default.
    pub threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            channels: DEFAULT_CHANNELS,
            rotation: None,
            seed: DEFAULT_SEED,
            cap_factor: BUDGET_FACTOR as f64,
            use_cap: true,
            max_area: 1_000_000,
            samples: 5_000,
            sample_seed: 42,
            probe_blocks: 200,
            threads: None,
        }
    }
}

impl SimConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// [`SimError::ConfigFile`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`SimConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The generator these settings select.
    pub fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Sturmian => Strategy::Sturmian,
            StrategyKind::Seeded => Strategy::Seeded {
                channels: self.channels,
                rotation: self.rotation,
                seed: self.seed,
            },
            StrategyKind::Reference => Strategy::Reference,
        }
    }

    /// The move ceiling these settings select.
    pub fn cap(&self) -> CapPolicy {
        CapPolicy {
            factor: self.cap_factor,
            enabled: self.use_cap,
        }
    }
}

//! Layered game configuration: defaults, then an optional TOML file, then flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use sequence_memory_core::Timing;
use serde::Deserialize;
use thiserror::Error;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Errors detected after the configuration file parsed successfully.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    /// The file declared a format version this build does not understand.
    #[error("unsupported config version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    seed: Option<u64>,
    #[serde(default)]
    timing: TimingOverrides,
}

/// Optional timing values expressed in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TimingOverrides {
    pub(crate) flash_ms: Option<u64>,
    pub(crate) gap_ms: Option<u64>,
    pub(crate) round_pause_ms: Option<u64>,
}

/// Fully resolved settings used to construct the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct GameConfig {
    /// Seed for the symbol source; a random one is drawn when absent.
    pub(crate) seed: Option<u64>,
    /// Durations pacing playback and round transitions.
    pub(crate) timing: Timing,
}

impl GameConfig {
    /// Reads and layers the TOML file at `path` over the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    /// Parses TOML contents and layers them over the defaults.
    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        if file.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                expected: SUPPORTED_CONFIG_VERSION,
            }
            .into());
        }

        let mut config = Self::default();
        config.apply(file.seed, file.timing);
        Ok(config)
    }

    /// Replaces every setting for which a value is provided.
    pub(crate) fn apply(&mut self, seed: Option<u64>, timing: TimingOverrides) {
        if let Some(seed) = seed {
            self.seed = Some(seed);
        }
        if let Some(ms) = timing.flash_ms {
            self.timing.flash = Duration::from_millis(ms);
        }
        if let Some(ms) = timing.gap_ms {
            self.timing.gap = Duration::from_millis(ms);
        }
        if let Some(ms) = timing.round_pause_ms {
            self.timing.round_pause = Duration::from_millis(ms);
        }
    }
}

//! TOML configuration for the solver, the scrambler and the colour scheme.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    color_scheme::ColorScheme,
    scramble::{SCRAMBLE_LENGTH, ScrambleGenerator},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read the config file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverConfig,
    pub scramble: ScrambleConfig,
    pub colors: Option<ColorScheme>,
}

impl Config {
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// # Errors
    ///
    /// Fails when `text` is not a valid config.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// The configured colour scheme, or the standard one.
    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        self.colors.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The deepest iteration the search runs.
    pub max_depth: u32,
    #[serde(rename = "time_limit_secs", with = "duration_secs")]
    pub time_limit: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 25,
            time_limit: Duration::from_secs(300),
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    pub length: usize,
    /// Scrambles are reproducible when set, otherwise seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            length: SCRAMBLE_LENGTH,
            seed: None,
        }
    }
}

impl ScrambleConfig {
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn generator(&self) -> ScrambleGenerator {
        self.seed
            .map_or_else(ScrambleGenerator::default, ScrambleGenerator::with_seed)
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

//! Settings file handling.
//!
//! Every field is optional; a missing file section falls back to defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::entropy::SPECTRUM_TOLERANCE;
use crate::core::errors::ConfigError;

/// Numerical knobs of one analysis run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Single-qubit entropies below this count as zero for the separability gate.
    pub separability_tolerance: f64,
    /// Tolerance of the spectrum sanity check.
    pub spectrum_tolerance: f64,
    /// Run the six pair reductions on the rayon pool.
    pub parallel_pairs: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            separability_tolerance: 1e-9,
            spectrum_tolerance: SPECTRUM_TOLERANCE,
            parallel_pairs: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory of JSON experiment records; in-memory only when absent.
    pub directory: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analysis: AnalysisConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Loads `cli_path` if given, else the default file when it exists, else defaults.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = cli_path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.qentangle/config.toml
    dirs_next::home_dir().map(|h| h.join(".qentangle").join("config.toml"))
}

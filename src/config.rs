//! Environment-backed defaults for the CLI.
//!
//! `.env` is loaded if present. Command-line flags always win over these.

use std::path::PathBuf;

pub const DATA_ENV: &str = "CHURN_SYNTH_DATA";
pub const MODEL_ENV: &str = "CHURN_SYNTH_MODEL";

pub const DEFAULT_DATA_DIR: &str = "data/master";
pub const DEFAULT_MODEL_PATH: &str = "data/saved_models/generator.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Reference CSV, or a directory whose first `.csv` is used.
    pub data: PathBuf,
    /// Generator artifact written by `train` and read by `generate`.
    pub model: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_DIR),
            model: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let defaults = Self::default();
        Self {
            data: var(DATA_ENV).unwrap_or(defaults.data),
            model: var(MODEL_ENV).unwrap_or(defaults.model),
        }
    }

    /// Apply CLI overrides.
    pub fn with_overrides(mut self, data: Option<PathBuf>, model: Option<PathBuf>) -> Self {
        if let Some(data) = data {
            self.data = data;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

use crate::domain::vehicle::record::DEFAULT_REFERENCE_YEAR;
use crate::infrastructure::model_store::DEFAULT_MODEL_PATH;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Predictor runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model_path: PathBuf,
    pub export_dir: PathBuf,
    /// Year the predictor measures vehicle age against
    pub reference_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            export_dir: PathBuf::from("."),
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let model_path = lookup("VEHICLE_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let export_dir = lookup("VEHICLE_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        let reference_year = match lookup("VEHICLE_REFERENCE_YEAR") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .with_context(|| format!("Invalid VEHICLE_REFERENCE_YEAR: {}", raw))?,
            None => defaults.reference_year,
        };

        Ok(Self {
            model_path,
            export_dir,
            reference_year,
        })
    }
}

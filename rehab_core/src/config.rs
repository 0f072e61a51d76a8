//! Configuration file support for the rehab tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/rehab/config.toml`.

use crate::seed::Seed;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub points: PointsConfig,

    #[serde(default)]
    pub seed: Seed,
}

/// Largest award a single completion may carry
pub const MAX_POINT_AWARD: i64 = 1_000_000;

/// Point values awarded by the adherence engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointsConfig {
    #[serde(default = "default_medication_taken")]
    pub medication_taken: i64,

    #[serde(default = "default_exercise_completed")]
    pub exercise_completed: i64,

    /// Take back exercise points when a completion is retracted
    #[serde(default)]
    pub deduct_on_exercise_undo: bool,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            medication_taken: default_medication_taken(),
            exercise_completed: default_exercise_completed(),
            deduct_on_exercise_undo: false,
        }
    }
}

impl PointsConfig {
    /// Awards must lie in `0..=MAX_POINT_AWARD` so completions never lower the total
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("medication_taken", self.medication_taken),
            ("exercise_completed", self.exercise_completed),
        ] {
            if !(0..=MAX_POINT_AWARD).contains(&value) {
                return Err(Error::Config(format!(
                    "points.{} must be between 0 and {}, got {}",
                    field, MAX_POINT_AWARD, value
                )));
            }
        }
        Ok(())
    }
}

// Default value functions
fn default_medication_taken() -> i64 {
    10
}

fn default_exercise_completed() -> i64 {
    15
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("rehab").join("config.toml")
    }

    /// Save the configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

//! Configuration System
//!
//! Loads experiment parameters from a TOML file so runs can be adjusted
//! without recompiling. Every table and key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::agents::{CountBounds, DEFAULT_PASSENGER_MAX, DEFAULT_TRACK_MAX};
use crate::competition::CompetitionConfig;
use crate::topology::MIN_RING_SIZE;

/// Default experiment file path
pub const DEFAULT_CONFIG_PATH: &str = "trolley.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub simulation: SimulationConfig,
    pub experiment: TrialConfig,
    pub competition: CompetitionConfig,
}

/// Ring construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub population: usize,
    pub full_info: bool,
    pub seed: u64,
    pub track_max: u32,
    pub passenger_max: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: 5,
            full_info: false,
            seed: 0,
            track_max: DEFAULT_TRACK_MAX,
            passenger_max: DEFAULT_PASSENGER_MAX,
        }
    }
}

impl SimulationConfig {
    pub fn bounds(&self) -> CountBounds {
        CountBounds {
            track_max: self.track_max,
            passenger_max: self.passenger_max,
        }
    }
}

/// Homogeneous and mixed experiment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Trials per strategy and information mode
    pub trials: u64,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self { trials: 1000 }
    }
}

impl ExperimentConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges the type system cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.population < MIN_RING_SIZE {
            return Err(ConfigError::Invalid(format!(
                "population must be at least {}, got {}",
                MIN_RING_SIZE, sim.population
            )));
        }
        if sim.passenger_max == 0 {
            return Err(ConfigError::Invalid("passenger_max must be at least 1".into()));
        }
        if self.experiment.trials == 0 {
            return Err(ConfigError::Invalid("trials must be at least 1".into()));
        }
        self.competition
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_events::LossType;

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.simulation.population, 5);
        assert_eq!(config.simulation.bounds(), CountBounds::default());
        assert_eq!(config.experiment.trials, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = ExperimentConfig::from_toml_str(
            r#"
            [simulation]
            population = 20
            full_info = true

            [competition]
            loss = "deontological"
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.population, 20);
        assert!(config.simulation.full_info);
        assert_eq!(config.simulation.track_max, 5);
        assert_eq!(config.competition.loss, LossType::Deontological);
        assert_eq!(config.competition.batch_size, 100);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ExperimentConfig::from_toml_str("[simulation]\npopulation = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ExperimentConfig::from_toml_str("[competition]\nreplace_ratio = 0.9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ExperimentConfig::from_toml_str("[simulation]\npopulation = \"many\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_to_toml_parses_back() {
        let toml = ExperimentConfig::default().to_toml().unwrap();
        let parsed = ExperimentConfig::from_toml_str(&toml).unwrap();
        assert_eq!(parsed.competition.rounds, 20);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ExperimentConfig::load_or_default("does/not/exist.toml");
        assert_eq!(config.simulation.seed, 0);
    }
}

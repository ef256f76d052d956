//! Engine configuration module
//!
//! Handles loading and validating configuration from environment variables.

use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Scorer configuration
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Noise floor subtracted from the raw divergence before reporting
    pub tolerance: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

/// Snapshot store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of snapshot versions retained by `prune`
    pub retention: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { retention: 50 }
    }
}

/// Complete engine settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub scoring: ScoringConfig,
    pub store: StoreConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let tolerance = match std::env::var("DRIFT_TOLERANCE") {
            Ok(raw) => raw.parse::<f64>().map_err(|_| {
                ConfigError::InvalidValue(format!("DRIFT_TOLERANCE must be a number, got '{raw}'"))
            })?,
            Err(_) => ScoringConfig::default().tolerance,
        };

        if tolerance < 0.0 {
            return Err(ConfigError::InvalidValue(
                "DRIFT_TOLERANCE must be non-negative".to_string(),
            ));
        }

        let retention = match std::env::var("SNAPSHOT_RETENTION") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "SNAPSHOT_RETENTION must be a positive integer, got '{raw}'"
                ))
            })?,
            Err(_) => StoreConfig::default().retention,
        };

        Ok(Self {
            scoring: ScoringConfig { tolerance },
            store: StoreConfig { retention },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.tolerance, 0.1);
    }

    #[test]
    fn test_default_store_config() {
        let config = StoreConfig::default();
        assert_eq!(config.retention, 50);
    }
}

//! Planner configuration.
//!
//! Load placement settings from TOML so the weekly cap, exam length and
//! random seed can change without code changes.
//!
//! # Examples
//!
//! ```
//! use exam_planner::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     max_exams_per_week = 3
//!     random_seed = 42
//! "#).unwrap();
//!
//! assert_eq!(config.max_exams_per_week, 3);
//! assert_eq!(config.default_duration_minutes, 90);
//! assert_eq!(config.random_seed, Some(42));
//! ```

use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::DEFAULT_DURATION_MINUTES;
use crate::scheduler::MAX_EXAMS_PER_WEEK;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Placement settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Maximum exams one class may write in one week.
    pub max_exams_per_week: usize,

    /// Duration given to newly created exams (minutes).
    pub default_duration_minutes: u32,

    /// Random seed for reproducible weekday shuffles.
    pub random_seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_exams_per_week: MAX_EXAMS_PER_WEEK,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            random_seed: None,
        }
    }
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML,
    /// or fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the weekly cap.
    pub fn with_max_exams_per_week(mut self, max: usize) -> Self {
        self.max_exams_per_week = max;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_exams_per_week == 0 {
            return Err(ConfigError::Invalid(
                "max_exams_per_week must be at least 1".to_string(),
            ));
        }
        if self.default_duration_minutes == 0 {
            return Err(ConfigError::Invalid(
                "default_duration_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Random source for the placement engines.
    ///
    /// Seeded from `random_seed` when set, otherwise from the OS.
    pub fn rng(&self) -> SmallRng {
        match self.random_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_empty_toml_is_default() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.max_exams_per_week, 2);
        assert_eq!(config.default_duration_minutes, 90);
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = PlannerConfig::from_toml_str("max_exams_per_week = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml() {
        let err = PlannerConfig::from_toml_str("max_exams_per_week = \"two\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::load("/definitely/not/here/planner.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = PlannerConfig::new().with_random_seed(7);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}

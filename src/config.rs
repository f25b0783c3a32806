//! Engine configuration.
//!
//! Load engine configuration from TOML to tune the optimizer and scoring
//! without code changes. Every field has a default, so an empty file is a
//! valid configuration.
//!
//! ```
//! use u_timetable::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [ga]
//!     population_size = 80
//!     max_generations = 200
//!     selection = { tournament = 3 }
//!
//!     [weights]
//!     class_gap_penalty = 6.0
//! "#).unwrap();
//!
//! assert_eq!(config.ga.population_size, 80);
//! assert_eq!(config.weights.class_gap_penalty, 6.0);
//! assert_eq!(config.weights.conflict_penalty, 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::fitness::FitnessWeights;
use crate::ga::GaConfig;

/// Optimizer and scoring configuration for a generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// GA parameters.
    pub ga: GaConfig,
    /// Fitness weights.
    pub weights: FitnessWeights,
}

impl EngineConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.ga.validate()?;
        Ok(config)
    }

    /// Sets the GA parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimetableError;
    use crate::ga::Selection;

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            [ga]
            elitism_count = 4
            selection = "roulette"
            seed = 7
            validate_swaps = true
            "#,
        )
        .unwrap();
        assert_eq!(config.ga.elitism_count, 4);
        assert_eq!(config.ga.selection, Selection::Roulette);
        assert_eq!(config.ga.seed, Some(7));
        assert!(config.ga.validate_swaps);
        assert_eq!(config.ga.population_size, 50);
        assert_eq!(config.weights, FitnessWeights::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_toml_str("[ga]\npopulation_size = 1\n").unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("[ga\n").unwrap_err();
        assert!(matches!(err, TimetableError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/timetable.toml").unwrap_err();
        assert!(matches!(err, TimetableError::ConfigIo(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = EngineConfig::default().with_ga(GaConfig::default().with_seed(3));
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}

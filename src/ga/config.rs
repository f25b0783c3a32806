//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! It is an immutable value passed into each run. [`GaOverrides`] carries
//! the optional per-request overrides sent by the API layer.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::TimetableError;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.selection, Selection::Tournament(5));
/// assert_eq!(config.elitism_count, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_tournament_size(3)
///     .with_mutation_rate(0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of schedules in the population.
    pub population_size: usize,

    /// Generations to run. The run is bounded by this count.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied the child is a clone of parent1.
    pub crossover_rate: f64,

    /// Probability of mutating a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of top schedules copied unchanged into the next generation.
    pub elitism_count: usize,

    /// Stop after this many generations without a new best. 0 disables.
    pub stagnation_limit: usize,

    /// Whether to evaluate a generation in parallel (needs the `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Optional wall-clock budget in milliseconds, checked at each
    /// generation boundary.
    pub time_limit_ms: Option<u64>,

    /// Undo swap mutations that introduce a conflict.
    ///
    /// Off by default: blind swaps add exploration and selection weeds
    /// out the bad offspring.
    pub validate_swaps: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            selection: Selection::default(),
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            elitism_count: 2,
            stagnation_limit: 0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
            validate_swaps: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism count.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables swap validation.
    pub fn with_validate_swaps(mut self, validate: bool) -> Self {
        self.validate_swaps = validate;
        self
    }

    /// Applies per-request overrides; unset fields keep their value.
    pub fn with_overrides(mut self, o: &GaOverrides) -> Self {
        if let Some(n) = o.population_size {
            self.population_size = n;
        }
        if let Some(n) = o.max_generations {
            self.max_generations = n;
        }
        if let Some(k) = o.tournament_size {
            self.selection = Selection::Tournament(k);
        }
        if let Some(r) = o.crossover_rate {
            self = self.with_crossover_rate(r);
        }
        if let Some(r) = o.mutation_rate {
            self = self.with_mutation_rate(r);
        }
        if let Some(n) = o.elitism_count {
            self.elitism_count = n;
        }
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TimetableError> {
        let invalid = |msg: &str| Err(TimetableError::InvalidConfig(msg.into()));
        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.elitism_count >= self.population_size {
            return invalid("elitism_count must be smaller than population_size");
        }
        if self.selection == Selection::Tournament(0) {
            return invalid("tournament size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return invalid("crossover_rate and mutation_rate must lie in [0, 1]");
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}

/// Optional GA parameter overrides supplied with a generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaOverrides {
    /// Population size.
    pub population_size: Option<usize>,
    /// Generation budget.
    pub max_generations: Option<usize>,
    /// Tournament size.
    pub tournament_size: Option<usize>,
    /// Crossover probability.
    pub crossover_rate: Option<f64>,
    /// Mutation probability.
    pub mutation_rate: Option<f64>,
    /// Elites carried per generation.
    pub elitism_count: Option<usize>,
}

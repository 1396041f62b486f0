//! Run configuration.
//!
//! [`EvolveConfig`] holds every parameter of the evolutionary loop. It is
//! validated once, before seeding; a run never fails mid-loop on a bad
//! parameter.

use crate::selection::Selection;

/// Parameters of one evolutionary run.
///
/// # Defaults
///
/// ```
/// use evoroute::EvolveConfig;
///
/// let config = EvolveConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoroute::{EvolveConfig, Selection};
///
/// let config = EvolveConfig::default()
///     .with_population_size(50)
///     .with_elite_count(5)
///     .with_mutation_rate(0.1)
///     .with_selection(Selection::Tournament(5))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolveConfig {
    /// Number of tours in the population. Fixed for the whole run.
    pub population_size: usize,

    /// Number of top tours carried unchanged into the next generation.
    ///
    /// `0` replaces the entire population each generation.
    pub elite_count: usize,

    /// Per-position swap probability applied to every offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Number of generations to run.
    pub generations: usize,

    /// Whether to build each generation's offspring on the rayon pool.
    ///
    /// Parents are always drawn sequentially; a seeded run is deterministic
    /// within each mode.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elite_count: 20,
            mutation_rate: 0.1,
            selection: Selection::default(),
            generations: 100,
            parallel: false,
            seed: None,
        }
    }
}

impl EvolveConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites preserved per generation.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the per-position mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Convenience for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Enables or disables parallel offspring construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Out-of-range values are rejected here rather than clamped, so a
    /// mistyped rate surfaces as an error instead of silently changing the
    /// search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.elite_count > self.population_size {
            return Err(ConfigError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate {
                rate: self.mutation_rate,
            });
        }
        if let Selection::Tournament(k) = self.selection {
            if k == 0 || k > self.population_size {
                return Err(ConfigError::InvalidTournamentSize {
                    k,
                    population_size: self.population_size,
                });
            }
        }
        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The population cannot recombine with fewer than two individuals.
    #[error("population_size must be at least 2, got {size}")]
    PopulationTooSmall {
        /// The rejected size.
        size: usize,
    },

    /// A run must execute at least one generation.
    #[error("generations must be at least 1")]
    ZeroGenerations,

    /// More elites than individuals cannot be preserved.
    #[error("elite_count {elite_count} exceeds population_size {population_size}")]
    TooManyElites {
        /// The rejected elite count.
        elite_count: usize,
        /// The configured population size.
        population_size: usize,
    },

    /// The mutation rate is a probability.
    #[error("mutation_rate must be within [0, 1], got {rate}")]
    InvalidMutationRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Tournament size must satisfy `1 <= k <= population_size`.
    #[error("tournament size {k} must be between 1 and population_size {population_size}")]
    InvalidTournamentSize {
        /// The rejected tournament size.
        k: usize,
        /// The configured population size.
        population_size: usize,
    },
}

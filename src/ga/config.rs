//! GA configuration.
//!
//! [`GaConfig`] holds every run parameter of the evolutionary loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How elite individuals are carried into the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Elitism {
    /// Carry the first `elite_count` members in population order,
    /// regardless of their fitness.
    #[default]
    Positional,

    /// Carry the `elite_count` fittest members. Ties keep population order.
    Ranked,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::{Elitism, GaConfig};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 300);
/// assert_eq!(config.elite_count, 10);
/// assert_eq!(config.elitism, Elitism::Positional);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{Elitism, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_generations(50)
///     .with_elitism(Elitism::Ranked)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run. There is no early stop.
    pub generations: usize,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of recombining a parent pair (0.0–1.0).
    ///
    /// When the draw fails both parents pass through unchanged.
    pub crossover_rate: f64,

    /// Number of individuals carried over unchanged each generation.
    pub elite_count: usize,

    /// Which individuals count as elites.
    pub elitism: Elitism,

    /// Number of draws per tournament.
    pub tournament_size: usize,

    /// Score offspring in parallel (requires the `parallel` feature).
    pub parallel: bool,

    /// Random seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 300,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elite_count: 10,
            elitism: Elitism::default(),
            tournament_size: 5,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate, clamped to `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite carryover count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the elitism policy.
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables parallel scoring.
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
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::EliteTooLarge {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournament);
        }
        Ok(())
    }
}

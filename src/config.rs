//! Run configuration
//!
//! This module provides `GAConfig`, the immutable parameter set of one run,
//! together with its validation and JSON persistence.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fitness::traits::Objective;
use crate::genome::chromosome::{Chromosome, MAX_CHROMOSOME_LENGTH};

/// Parent selection scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionType {
    /// Best of `tournament_size` uniform draws
    #[default]
    Tournament,
    /// Fitness-proportionate selection
    RouletteWheel,
    /// Uniform draw from the top ranks
    Elitism,
}

/// Recombination scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossoverType {
    /// One cut point
    #[default]
    SinglePoint,
    /// Swap one closed segment
    TwoPoint,
    /// Per-bit fair coin
    Uniform,
}

/// Configuration for the genetic algorithm
///
/// Missing fields in a serialized document take their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GAConfig {
    /// Number of individuals per generation
    pub population_size: usize,
    /// Bits per chromosome (at most 64)
    pub chromosome_length: usize,
    /// Generation budget
    pub max_generations: usize,
    /// Probability that a selected pair is recombined
    pub crossover_rate: f64,
    /// Per-bit flip probability
    pub mutation_rate: f64,
    /// Fraction of the population copied unchanged into the next generation
    pub elitism_rate: f64,
    /// Optimization direction
    pub is_maximization: bool,
    /// Parent selection scheme
    pub selection_type: SelectionType,
    /// Recombination scheme
    pub crossover_type: CrossoverType,
    /// Draws per tournament
    pub tournament_size: usize,
    /// Lower bound of the decoded domain
    pub min_value: f64,
    /// Upper bound of the decoded domain
    pub max_value: f64,
    /// Diversity below which the run is considered converged
    pub convergence_threshold: f64,
    /// Seed for a reproducible run; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GAConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            chromosome_length: 20,
            max_generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.01,
            elitism_rate: 0.1,
            is_maximization: true,
            selection_type: SelectionType::Tournament,
            crossover_type: CrossoverType::SinglePoint,
            tournament_size: 3,
            min_value: -10.0,
            max_value: 10.0,
            convergence_threshold: 0.01,
            seed: None,
        }
    }
}

impl GAConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the chromosome length
    pub fn with_chromosome_length(mut self, length: usize) -> Self {
        self.chromosome_length = length;
        self
    }

    /// Set the generation budget
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Set the crossover rate
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the mutation rate
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the elitism rate
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    /// Set the optimization direction
    pub fn with_maximization(mut self, is_maximization: bool) -> Self {
        self.is_maximization = is_maximization;
        self
    }

    /// Set the selection scheme
    pub fn with_selection(mut self, selection_type: SelectionType) -> Self {
        self.selection_type = selection_type;
        self
    }

    /// Set the crossover scheme
    pub fn with_crossover(mut self, crossover_type: CrossoverType) -> Self {
        self.crossover_type = crossover_type;
        self
    }

    /// Set the tournament size
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the decoded domain
    pub fn with_domain(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Set the convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "population_size",
            });
        }
        if self.chromosome_length == 0 {
            return Err(ConfigError::NonPositive {
                field: "chromosome_length",
            });
        }
        if self.chromosome_length > MAX_CHROMOSOME_LENGTH {
            return Err(ConfigError::ChromosomeTooLong {
                length: self.chromosome_length,
                max: MAX_CHROMOSOME_LENGTH,
            });
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NonPositive {
                field: "max_generations",
            });
        }

        for (field, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("elitism_rate", self.elitism_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidRate { field, value });
            }
        }

        if !self.min_value.is_finite()
            || !self.max_value.is_finite()
            || self.min_value >= self.max_value
            || !(self.max_value - self.min_value).is_finite()
        {
            return Err(ConfigError::InvalidDomain {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.convergence_threshold));
        }
        Ok(())
    }

    /// Number of individuals copied unchanged each generation
    ///
    /// At least one whenever `elitism_rate` is positive.
    pub fn elite_count(&self) -> usize {
        if self.elitism_rate <= 0.0 || self.population_size == 0 {
            return 0;
        }
        let count = (self.population_size as f64 * self.elitism_rate).floor() as usize;
        count.clamp(1, self.population_size)
    }

    /// Optimization direction
    pub fn objective(&self) -> Objective {
        Objective::from_maximization(self.is_maximization)
    }

    /// Decoding step between adjacent chromosome values
    pub fn resolution(&self) -> Option<f64> {
        Chromosome::resolution(self.chromosome_length, self.min_value, self.max_value)
    }

    /// Parse a configuration from JSON
    ///
    /// The result is not validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Serialize the configuration to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}

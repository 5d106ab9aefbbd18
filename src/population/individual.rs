//! Individual wrapper type
//!
//! This module provides the Individual type that wraps a chromosome with its
//! cached fitness.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, StateError};
use crate::fitness::traits::Objective;
use crate::genome::chromosome::Chromosome;

/// A candidate solution in the population
///
/// The fitness cache is cleared whenever the chromosome is handed out
/// mutably, so a stale value can never be read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: Option<f64>,
    fitness_percentage: f64,
}

impl Individual {
    /// Create a new unevaluated individual
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: None,
            fitness_percentage: 0.0,
        }
    }

    /// Create an unevaluated individual with a random chromosome
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self::new(Chromosome::random(length, rng))
    }

    /// Create a new individual with a known fitness
    pub fn with_fitness(chromosome: Chromosome, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness: Some(fitness),
            fitness_percentage: 0.0,
        }
    }

    /// Get a reference to the chromosome
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Get a mutable reference to the chromosome, invalidating the fitness
    pub fn chromosome_mut(&mut self) -> &mut Chromosome {
        self.invalidate_fitness();
        &mut self.chromosome
    }

    /// Replace the chromosome, invalidating the fitness
    pub fn set_chromosome(&mut self, chromosome: Chromosome) {
        self.chromosome = chromosome;
        self.invalidate_fitness();
    }

    /// Take the chromosome out of this individual
    pub fn into_chromosome(self) -> Chromosome {
        self.chromosome
    }

    /// Get the raw fitness
    pub fn fitness(&self) -> Result<f64, StateError> {
        self.fitness.ok_or(StateError::FitnessNotEvaluated)
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Set the raw fitness
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Clear the cached fitness and reset the percentage
    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
        self.fitness_percentage = 0.0;
    }

    /// Normalized fitness in [0, 100]
    pub fn fitness_percentage(&self) -> f64 {
        self.fitness_percentage
    }

    /// Set the normalized fitness, clamped to [0, 100]
    pub fn set_fitness_percentage(&mut self, percentage: f64) {
        self.fitness_percentage = percentage.clamp(0.0, 100.0);
    }

    /// Decode the chromosome onto `[min_value, max_value]`
    pub fn decode(&self, min_value: f64, max_value: f64) -> Result<f64, GenomeError> {
        self.chromosome.decode(min_value, max_value)
    }

    /// Check if this individual is strictly better than another
    ///
    /// An evaluated individual beats an unevaluated one.
    pub fn is_better_than(&self, other: &Self, objective: Objective) -> bool {
        match (self.fitness, other.fitness) {
            (Some(f1), Some(f2)) => objective.is_better(f1, f2),
            (Some(_), None) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.fitness {
            Some(fitness) => write!(
                f,
                "{} (fitness: {:.6}, {:.1}%)",
                self.chromosome, fitness, self.fitness_percentage
            ),
            None => write!(f, "{} (unevaluated)", self.chromosome),
        }
    }
}

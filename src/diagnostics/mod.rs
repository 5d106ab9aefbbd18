//! Diagnostics and statistics
//!
//! This module provides per-generation snapshots and the run history.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EvoResult;
use crate::fitness::traits::Objective;
use crate::population::population::Population;
use crate::termination::TerminationReason;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Best raw fitness in this generation
    pub best_fitness: f64,
    /// Mean raw fitness
    pub average_fitness: f64,
    /// Worst raw fitness in this generation
    pub worst_fitness: f64,
    /// Decoded `x` of the best individual
    pub best_x: f64,
    /// Mean pairwise normalized Hamming distance
    pub diversity: f64,
    /// Fitness percentage of the best individual
    pub best_fitness_percentage: f64,
    /// Mean fitness percentage
    pub average_fitness_percentage: f64,
}

impl GenerationStats {
    /// Compute statistics from an evaluated population
    pub fn from_population(
        population: &Population,
        generation: usize,
        min_value: f64,
        max_value: f64,
        objective: Objective,
    ) -> EvoResult<Self> {
        let best = population.best(objective)?;
        let worst = population.worst(objective)?;

        Ok(Self {
            generation,
            best_fitness: best.fitness()?,
            average_fitness: population.mean_fitness()?,
            worst_fitness: worst.fitness()?,
            best_x: best.decode(min_value, max_value)?,
            diversity: population.diversity(),
            best_fitness_percentage: best.fitness_percentage(),
            average_fitness_percentage: population.mean_fitness_percentage()?,
        })
    }
}

impl std::fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gen {:>4} | best {:.6} ({:.1}%) at x = {:.6} | avg {:.6} | worst {:.6} | diversity {:.4}",
            self.generation,
            self.best_fitness,
            self.best_fitness_percentage,
            self.best_x,
            self.average_fitness,
            self.worst_fitness,
            self.diversity
        )
    }
}

/// Statistics collector for an entire evolution run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per generation, generation 0 first
    pub generations: Vec<GenerationStats>,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
    /// Reason for termination
    pub termination_reason: Option<TerminationReason>,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the most recent statistics
    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Get the best fitness across all generations
    pub fn best_fitness(&self, objective: Objective) -> Option<f64> {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .min_by(|a, b| objective.compare(*a, *b))
    }

    /// Get the history of best fitness values
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Get the history of mean fitness values
    pub fn average_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.average_fitness).collect()
    }

    /// Get the history of diversity values
    pub fn diversity_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.diversity).collect()
    }

    /// Set the termination reason
    pub fn set_termination_reason(&mut self, reason: TerminationReason) {
        self.termination_reason = Some(reason);
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// Discard the recorded history
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Get a summary of the evolution run
    pub fn summary(&self) -> String {
        let (final_best, best_x) = self
            .last()
            .map(|g| (g.best_fitness, g.best_x))
            .unwrap_or((f64::NAN, f64::NAN));

        format!(
            "Evolution Summary:\n\
             - Generations: {}\n\
             - Final best: {:.6}\n\
             - Best x: {:.6}\n\
             - Runtime: {:.2}ms\n\
             - Termination: {}",
            self.num_generations(),
            final_best,
            best_x,
            self.total_runtime_ms,
            self.termination_reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        )
    }
}

pub mod prelude {
    pub use super::{EvolutionStats, GenerationStats};
}

//! Selection operators
//!
//! This module provides tournament, roulette-wheel and elitist-pool selection.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::StateError;
use crate::fitness::traits::Objective;
use crate::operators::traits::SelectionOperator;
use crate::population::population::Population;

/// Tournament size used when the configured one does not fit the population
pub const FALLBACK_TOURNAMENT_SIZE: usize = 3;

/// Tournament selection operator
///
/// Draws `tournament_size` contestants uniformly with replacement and keeps
/// the strictly best; ties go to the earlier draw.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    /// Tournament size (number of draws)
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary() -> Self {
        Self::new(2)
    }

    /// Tournament size actually used for a population of `population_size`
    ///
    /// A size of zero or one larger than the population falls back to
    /// `min(3, population_size)`.
    pub fn effective_size(&self, population_size: usize) -> usize {
        if self.tournament_size == 0 || self.tournament_size > population_size {
            FALLBACK_TOURNAMENT_SIZE.min(population_size)
        } else {
            self.tournament_size
        }
    }
}

impl SelectionOperator for TournamentSelection {
    fn select_index<R: Rng + ?Sized>(
        &self,
        population: &Population,
        objective: Objective,
        rng: &mut R,
    ) -> Result<usize, StateError> {
        let n = population.len();
        if n == 0 {
            return Err(StateError::EmptyPopulation);
        }

        let mut best = rng.gen_range(0..n);
        let mut best_fitness = population[best].fitness()?;
        for _ in 1..self.effective_size(n) {
            let contender = rng.gen_range(0..n);
            let fitness = population[contender].fitness()?;
            if objective.is_better(fitness, best_fitness) {
                best = contender;
                best_fitness = fitness;
            }
        }
        Ok(best)
    }
}

/// Roulette wheel selection (fitness proportionate)
///
/// Fitness is shifted by `max(0, -min) + 1` so every weight is positive. When
/// minimizing, each weight is the distance below the largest shifted value.
#[derive(Clone, Debug, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    /// Create a new roulette wheel selection
    pub fn new() -> Self {
        Self
    }

    /// Selection weights for the given raw fitness values
    pub fn weights(fitness: &[f64], objective: Objective) -> Vec<f64> {
        let min_fitness = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let offset = (-min_fitness).max(0.0) + 1.0;

        match objective {
            Objective::Maximize => fitness.iter().map(|f| f + offset).collect(),
            Objective::Minimize => {
                let max_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let max_adjusted = max_fitness + offset;
                fitness.iter().map(|f| max_adjusted - (f + offset)).collect()
            }
        }
    }
}

impl SelectionOperator for RouletteWheelSelection {
    fn select_index<R: Rng + ?Sized>(
        &self,
        population: &Population,
        objective: Objective,
        rng: &mut R,
    ) -> Result<usize, StateError> {
        if population.is_empty() {
            return Err(StateError::EmptyPopulation);
        }

        let weights = Self::weights(&population.fitness_values()?, objective);
        let total: f64 = weights.iter().sum();
        let point = if total > 0.0 && total.is_finite() {
            Uniform::new(0.0, total).sample(rng)
        } else {
            0.0
        };

        let mut cumulative = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if cumulative >= point {
                return Ok(index);
            }
        }
        Ok(weights.len() - 1)
    }
}

/// Elitist pool selection
///
/// Draws uniformly from the best `2 × elite_count + 1` ranks, capped at the
/// population size.
#[derive(Clone, Debug)]
pub struct ElitistPoolSelection {
    /// Number of elites carried over each generation
    pub elite_count: usize,
}

impl ElitistPoolSelection {
    /// Create a new elitist pool selection
    pub fn new(elite_count: usize) -> Self {
        Self { elite_count }
    }

    /// Highest rank (inclusive) that can be drawn from `population_size`
    pub fn pool_limit(&self, population_size: usize) -> usize {
        (2 * self.elite_count).min(population_size.saturating_sub(1))
    }
}

impl SelectionOperator for ElitistPoolSelection {
    fn select_index<R: Rng + ?Sized>(
        &self,
        population: &Population,
        objective: Objective,
        rng: &mut R,
    ) -> Result<usize, StateError> {
        if population.is_empty() {
            return Err(StateError::EmptyPopulation);
        }

        let rank = rng.gen_range(0..=self.pool_limit(population.len()));
        // A best-first population is its own ranking
        if population.is_ranked(objective)? {
            return Ok(rank);
        }
        let ranked = population.ranked_indices(objective)?;
        Ok(ranked[rank])
    }
}

//! Population type
//!
//! This module provides the Population container type.

use rand::Rng;

use crate::error::{EvoResult, StateError};
use crate::fitness::traits::{fitness_percentage, Evaluator, Objective};
use crate::population::individual::Individual;

/// An ordered collection of individuals
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Create a population of unevaluated random individuals
    pub fn random<R: Rng + ?Sized>(size: usize, chromosome_length: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(chromosome_length, rng))
            .collect();
        Self { individuals }
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Get the underlying slice of individuals
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Take the individuals out of this population
    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Check if all individuals have been evaluated
    pub fn all_evaluated(&self) -> bool {
        self.individuals.iter().all(Individual::is_evaluated)
    }

    /// Clear every cached fitness
    pub fn invalidate_fitness(&mut self) {
        for individual in &mut self.individuals {
            individual.invalidate_fitness();
        }
    }

    /// Raw fitness of every individual, in order
    pub fn fitness_values(&self) -> Result<Vec<f64>, StateError> {
        self.individuals.iter().map(Individual::fitness).collect()
    }

    /// Indices ordered best first; ties keep their original order
    pub fn ranked_indices(&self, objective: Objective) -> Result<Vec<usize>, StateError> {
        let fitness = self.fitness_values()?;
        let mut indices: Vec<usize> = (0..fitness.len()).collect();
        indices.sort_by(|&a, &b| objective.compare(fitness[a], fitness[b]));
        Ok(indices)
    }

    /// Check whether the population is already ordered best first
    pub fn is_ranked(&self, objective: Objective) -> Result<bool, StateError> {
        let fitness = self.fitness_values()?;
        Ok(fitness
            .windows(2)
            .all(|pair| !objective.is_better(pair[1], pair[0])))
    }

    /// Sort the population best first
    ///
    /// The sort is stable, and nothing moves if any individual is unevaluated.
    pub fn sort_by_fitness(&mut self, objective: Objective) -> Result<(), StateError> {
        if !self.all_evaluated() {
            return Err(StateError::FitnessNotEvaluated);
        }
        self.individuals.sort_by(|a, b| {
            // Both are evaluated at this point
            let fa = a.fitness().unwrap_or(f64::NAN);
            let fb = b.fitness().unwrap_or(f64::NAN);
            objective.compare(fa, fb)
        });
        Ok(())
    }

    /// Get the best individual; the first one wins a tie
    pub fn best(&self, objective: Objective) -> Result<&Individual, StateError> {
        self.extreme(|candidate, current| objective.is_better(candidate, current))
    }

    /// Get the worst individual; the first one wins a tie
    pub fn worst(&self, objective: Objective) -> Result<&Individual, StateError> {
        self.extreme(|candidate, current| objective.is_better(current, candidate))
    }

    fn extreme(&self, replaces: impl Fn(f64, f64) -> bool) -> Result<&Individual, StateError> {
        let mut iter = self.individuals.iter();
        let mut chosen = iter.next().ok_or(StateError::EmptyPopulation)?;
        let mut chosen_fitness = chosen.fitness()?;
        for individual in iter {
            let fitness = individual.fitness()?;
            if replaces(fitness, chosen_fitness) {
                chosen = individual;
                chosen_fitness = fitness;
            }
        }
        Ok(chosen)
    }

    /// Mean raw fitness
    pub fn mean_fitness(&self) -> Result<f64, StateError> {
        if self.is_empty() {
            return Err(StateError::EmptyPopulation);
        }
        let values = self.fitness_values()?;
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Mean fitness percentage
    pub fn mean_fitness_percentage(&self) -> Result<f64, StateError> {
        if self.is_empty() {
            return Err(StateError::EmptyPopulation);
        }
        Ok(self
            .individuals
            .iter()
            .map(Individual::fitness_percentage)
            .sum::<f64>()
            / self.len() as f64)
    }

    /// Mean pairwise normalized Hamming distance, in [0, 1]
    ///
    /// Zero for fewer than two individuals. Cost grows with the square of the
    /// population size.
    pub fn diversity(&self) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }

        let mut total_distance = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                total_distance += self.individuals[i]
                    .chromosome()
                    .normalized_distance(self.individuals[j].chromosome());
            }
        }

        let pairs = n * (n - 1) / 2;
        total_distance / pairs as f64
    }

    /// Evaluate the population in two passes
    ///
    /// The first pass fills every empty fitness cache from the decoded `x`.
    /// The second pass recomputes every fitness percentage against the
    /// population's current best and worst.
    pub fn evaluate(
        &mut self,
        evaluator: &dyn Evaluator,
        min_value: f64,
        max_value: f64,
        objective: Objective,
    ) -> EvoResult<()> {
        for individual in &mut self.individuals {
            if !individual.is_evaluated() {
                let x = individual.decode(min_value, max_value)?;
                individual.set_fitness(evaluator.evaluate(x));
            }
        }

        if self.is_empty() {
            return Ok(());
        }

        let best = self.best(objective)?.fitness()?;
        let worst = self.worst(objective)?.fitness()?;
        let optimum = evaluator.optimal_value();
        for individual in &mut self.individuals {
            let value = individual.fitness()?;
            individual.set_fitness_percentage(fitness_percentage(
                value, best, worst, optimum, objective,
            ));
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::{FnEvaluator, Linear, Rastrigin};
    use crate::genome::chromosome::Chromosome;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_population() -> Population {
        [10.0, 20.0, 30.0, 40.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual::with_fitness(Chromosome::from_u64(i as u64, 4), f))
            .collect()
    }

    #[test]
    fn test_population_random() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = Population::random(10, 8, &mut rng);

        assert_eq!(pop.len(), 10);
        assert!(pop.iter().all(|i| i.chromosome().len() == 8));
        assert!(!pop.all_evaluated());
    }

    #[test]
    fn test_population_best_worst() {
        let pop = create_test_population();

        assert_eq!(pop.best(Objective::Maximize).unwrap().fitness(), Ok(50.0));
        assert_eq!(pop.worst(Objective::Maximize).unwrap().fitness(), Ok(10.0));
        assert_eq!(pop.best(Objective::Minimize).unwrap().fitness(), Ok(10.0));
        assert_eq!(pop.worst(Objective::Minimize).unwrap().fitness(), Ok(50.0));
    }

    #[test]
    fn test_best_tie_keeps_first() {
        let pop: Population = vec![
            Individual::with_fitness("00".parse().unwrap(), 5.0),
            Individual::with_fitness("11".parse().unwrap(), 5.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(pop.best(Objective::Maximize).unwrap().chromosome().to_string(), "00");
        assert_eq!(pop.worst(Objective::Maximize).unwrap().chromosome().to_string(), "00");
    }

    #[test]
    fn test_best_on_empty_or_unevaluated() {
        let empty = Population::new();
        assert_eq!(
            empty.best(Objective::Maximize).unwrap_err(),
            StateError::EmptyPopulation
        );

        let mut pop = create_test_population();
        pop.push(Individual::new(Chromosome::zeros(4)));
        assert_eq!(
            pop.best(Objective::Maximize).unwrap_err(),
            StateError::FitnessNotEvaluated
        );
        assert_eq!(
            pop.mean_fitness().unwrap_err(),
            StateError::FitnessNotEvaluated
        );
    }

    #[test]
    fn test_population_sort_by_fitness() {
        let mut pop = create_test_population();
        pop.sort_by_fitness(Objective::Maximize).unwrap();
        let fitnesses = pop.fitness_values().unwrap();
        assert_eq!(fitnesses, vec![50.0, 40.0, 30.0, 20.0, 10.0]);

        pop.sort_by_fitness(Objective::Minimize).unwrap();
        let fitnesses = pop.fitness_values().unwrap();
        assert_eq!(fitnesses, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_sort_rejects_unevaluated() {
        let mut pop = create_test_population();
        pop.push(Individual::new(Chromosome::zeros(4)));
        let before = pop.clone();
        assert!(pop.sort_by_fitness(Objective::Maximize).is_err());
        assert_eq!(pop, before);
    }

    #[test]
    fn test_ranked_indices_do_not_move_individuals() {
        let pop = create_test_population();
        assert_eq!(
            pop.ranked_indices(Objective::Maximize).unwrap(),
            vec![4, 3, 2, 1, 0]
        );
        assert_eq!(pop[0].fitness(), Ok(10.0));
    }

    #[test]
    fn test_is_ranked() {
        let mut pop = create_test_population();
        assert!(!pop.is_ranked(Objective::Maximize).unwrap());
        assert!(pop.is_ranked(Objective::Minimize).unwrap());

        pop.sort_by_fitness(Objective::Maximize).unwrap();
        assert!(pop.is_ranked(Objective::Maximize).unwrap());
        assert_eq!(
            pop.ranked_indices(Objective::Maximize).unwrap(),
            vec![0, 1, 2, 3, 4]
        );

        pop.invalidate_fitness();
        assert_eq!(
            pop.is_ranked(Objective::Maximize),
            Err(StateError::FitnessNotEvaluated)
        );
    }

    #[test]
    fn test_population_mean_fitness() {
        let pop = create_test_population();
        assert_eq!(pop.mean_fitness(), Ok(30.0));
        assert_eq!(
            Population::new().mean_fitness(),
            Err(StateError::EmptyPopulation)
        );
    }

    #[test]
    fn test_diversity_identical_is_zero() {
        let pop: Population = (0..6)
            .map(|_| Individual::new("101100".parse().unwrap()))
            .collect();
        assert_eq!(pop.diversity(), 0.0);
    }

    #[test]
    fn test_diversity_complements() {
        let pop: Population = vec![
            Individual::new(Chromosome::zeros(8)),
            Individual::new(Chromosome::ones(8)),
        ]
        .into_iter()
        .collect();
        assert_eq!(pop.diversity(), 1.0);
    }

    #[test]
    fn test_diversity_mixed() {
        // Distances: 0000-0011 = 0.5, 0000-1111 = 1.0, 0011-1111 = 0.5
        let pop: Population = ["0000", "0011", "1111"]
            .iter()
            .map(|s| Individual::new(s.parse().unwrap()))
            .collect();
        assert_relative_eq!(pop.diversity(), 2.0 / 3.0);
    }

    #[test]
    fn test_diversity_small_population() {
        assert_eq!(Population::new().diversity(), 0.0);
        let single: Population = std::iter::once(Individual::new(Chromosome::ones(3))).collect();
        assert_eq!(single.diversity(), 0.0);
    }

    #[test]
    fn test_evaluate_fills_cache_and_percentages() {
        // Linear f(x) = x over [0, 15] with 4 bits decodes integers exactly
        let mut pop: Population = ["0000", "0101", "1111"]
            .iter()
            .map(|s| Individual::new(s.parse().unwrap()))
            .collect();
        let evaluator = Linear::default();
        pop.evaluate(&evaluator, 0.0, 15.0, Objective::Maximize)
            .unwrap();

        let values = pop.fitness_values().unwrap();
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[1], 5.0, epsilon = 1e-12);
        assert_relative_eq!(values[2], 15.0, epsilon = 1e-12);
        assert_eq!(pop[0].fitness_percentage(), 0.0);
        assert_relative_eq!(pop[1].fitness_percentage(), 100.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(pop[2].fitness_percentage(), 100.0);
    }

    #[test]
    fn test_evaluate_keeps_cached_fitness() {
        let mut pop = create_test_population();
        let evaluator = FnEvaluator::new("zero", true, |_| 0.0);
        pop.evaluate(&evaluator, 0.0, 1.0, Objective::Maximize)
            .unwrap();
        assert_eq!(pop[4].fitness(), Ok(50.0));
        assert_eq!(pop[4].fitness_percentage(), 100.0);
    }

    #[test]
    fn test_evaluate_flat_population_is_fifty_percent() {
        let mut pop: Population = (0..4).map(|_| Individual::new(Chromosome::zeros(5))).collect();
        let evaluator = FnEvaluator::new("flat", true, |_| 3.0);
        pop.evaluate(&evaluator, -1.0, 1.0, Objective::Maximize)
            .unwrap();
        assert!(pop.iter().all(|i| i.fitness_percentage() == 50.0));
    }

    #[test]
    fn test_evaluate_uses_known_optimum() {
        // x = 0 is reachable only by the midpoint of an odd range; use [-1, 1]
        // with "0000" -> -1 and "1111" -> 1, both Rastrigin value 1
        let mut pop: Population = ["0000", "1111"]
            .iter()
            .map(|s| Individual::new(s.parse().unwrap()))
            .collect();
        let evaluator = Rastrigin::default();
        pop.evaluate(&evaluator, -1.0, 1.0, Objective::Minimize)
            .unwrap();

        // Worst equals best, but the optimum 0 gives a usable range of 1
        assert_relative_eq!(pop[0].fitness().unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(pop[0].fitness_percentage(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalidate_fitness() {
        let mut pop = create_test_population();
        pop.invalidate_fitness();
        assert!(pop.iter().all(|i| !i.is_evaluated()));
    }
}

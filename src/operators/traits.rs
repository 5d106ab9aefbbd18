//! Operator traits
//!
//! This module defines the core operator traits for the genetic algorithm.

use rand::Rng;

use crate::error::{OperatorError, StateError};
use crate::fitness::traits::Objective;
use crate::genome::chromosome::Chromosome;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Selection operator trait
///
/// Picks a parent from an evaluated population without modifying it.
pub trait SelectionOperator: Send + Sync {
    /// Select a single individual from the population
    ///
    /// Returns the index of the selected individual.
    fn select_index<R: Rng + ?Sized>(
        &self,
        population: &Population,
        objective: Objective,
        rng: &mut R,
    ) -> Result<usize, StateError>;

    /// Select a copy of a single individual from the population
    fn select<R: Rng + ?Sized>(
        &self,
        population: &Population,
        objective: Objective,
        rng: &mut R,
    ) -> Result<Individual, StateError> {
        let index = self.select_index(population, objective, rng)?;
        Ok(population[index].clone())
    }
}

/// Crossover operator trait
///
/// Combines two equal-length parents into two offspring.
pub trait CrossoverOperator: Send + Sync {
    /// Apply crossover to two parents and produce two offspring
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome), OperatorError>;
}

/// Mutation operator trait
///
/// Applies random changes to a chromosome in place.
pub trait MutationOperator: Send + Sync {
    /// Apply mutation to a chromosome
    fn mutate<R: Rng + ?Sized>(&self, chromosome: &mut Chromosome, rng: &mut R);

    /// Mutate an individual, always invalidating its cached fitness
    fn mutate_individual<R: Rng + ?Sized>(&self, individual: &mut Individual, rng: &mut R) {
        self.mutate(individual.chromosome_mut(), rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FirstSelection;

    impl SelectionOperator for FirstSelection {
        fn select_index<R: Rng + ?Sized>(
            &self,
            population: &Population,
            _objective: Objective,
            _rng: &mut R,
        ) -> Result<usize, StateError> {
            if population.is_empty() {
                return Err(StateError::EmptyPopulation);
            }
            Ok(0)
        }
    }

    struct NoopMutation;

    impl MutationOperator for NoopMutation {
        fn mutate<R: Rng + ?Sized>(&self, _chromosome: &mut Chromosome, _rng: &mut R) {}
    }

    #[test]
    fn test_select_returns_copy() {
        let mut rng = StdRng::seed_from_u64(0);
        let pop: Population = vec![Individual::with_fitness(Chromosome::ones(3), 2.0)]
            .into_iter()
            .collect();

        let selected = FirstSelection
            .select(&pop, Objective::Maximize, &mut rng)
            .unwrap();
        assert_eq!(&selected, &pop[0]);
    }

    #[test]
    fn test_mutate_individual_invalidates_even_without_change() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ind = Individual::with_fitness(Chromosome::zeros(4), 1.0);
        NoopMutation.mutate_individual(&mut ind, &mut rng);
        assert!(!ind.is_evaluated());
        assert_eq!(ind.chromosome(), &Chromosome::zeros(4));
    }
}

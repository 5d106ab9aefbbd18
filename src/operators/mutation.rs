//! Mutation operators
//!
//! This module provides bit-flip mutation for binary chromosomes.

use rand::Rng;

use crate::genome::chromosome::Chromosome;
use crate::operators::traits::MutationOperator;

/// Bit-flip mutation
///
/// Flips each bit independently with probability `mutation_rate`.
#[derive(Clone, Debug)]
pub struct BitFlipMutation {
    /// Per-bit flip probability
    pub mutation_rate: f64,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl MutationOperator for BitFlipMutation {
    fn mutate<R: Rng + ?Sized>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        for i in 0..chromosome.len() {
            if rng.gen::<f64>() < self.mutation_rate {
                chromosome.flip(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::individual::Individual;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rate_zero_never_flips() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut chromosome = Chromosome::random(64, &mut rng);
        let original = chromosome.clone();
        for _ in 0..100 {
            BitFlipMutation::new(0.0).mutate(&mut chromosome, &mut rng);
        }
        assert_eq!(chromosome, original);
    }

    #[test]
    fn test_rate_one_flips_every_bit() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut chromosome: Chromosome = "1100101".parse().unwrap();
        BitFlipMutation::new(1.0).mutate(&mut chromosome, &mut rng);
        assert_eq!(chromosome.to_string(), "0011010");
    }

    #[test]
    fn test_rate_half_flips_about_half() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut chromosome = Chromosome::zeros(1000);
        BitFlipMutation::new(0.5).mutate(&mut chromosome, &mut rng);

        let flipped = chromosome.count_ones();
        assert!(
            flipped > 400 && flipped < 600,
            "Expected ~500 flips, got {}",
            flipped
        );
    }

    #[test]
    fn test_mutation_invalidates_individual() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut individual = Individual::with_fitness(Chromosome::ones(8), 3.0);
        BitFlipMutation::new(0.0).mutate_individual(&mut individual, &mut rng);
        assert!(!individual.is_evaluated());
        assert_eq!(individual.chromosome(), &Chromosome::ones(8));
    }
}

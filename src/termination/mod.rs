//! Termination criteria
//!
//! This module provides the stopping rules of the generational loop.

use serde::{Deserialize, Serialize};

/// Evolution state for termination checking
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvolutionState {
    /// Current generation number
    pub generation: usize,
    /// Diversity of the current population
    pub diversity: f64,
    /// Best raw fitness of the current population
    pub best_fitness: f64,
}

/// Why a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The generation budget was used up
    MaxGenerations,
    /// Diversity fell below the convergence threshold
    Converged,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxGenerations => write!(f, "Maximum generations reached"),
            Self::Converged => write!(f, "Population converged"),
        }
    }
}

/// Termination criterion trait
pub trait TerminationCriterion: Send + Sync {
    /// Check if evolution should terminate
    fn should_terminate(&self, state: &EvolutionState) -> bool;

    /// Reason reported when this criterion fires
    fn reason(&self) -> TerminationReason;
}

/// Terminate after a maximum number of generations
#[derive(Clone, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxGenerations {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        state.generation >= self.0
    }

    fn reason(&self) -> TerminationReason {
        TerminationReason::MaxGenerations
    }
}

/// Terminate when the population has lost its diversity
///
/// Never fires on generation 0.
#[derive(Clone, Debug)]
pub struct DiversityConvergence {
    /// Diversity below which the population counts as converged
    pub threshold: f64,
}

impl DiversityConvergence {
    /// Create a new diversity convergence criterion
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Check a diversity value against the threshold
    pub fn is_converged(&self, diversity: f64) -> bool {
        diversity < self.threshold
    }
}

impl TerminationCriterion for DiversityConvergence {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        state.generation > 0 && self.is_converged(state.diversity)
    }

    fn reason(&self) -> TerminationReason {
        TerminationReason::Converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(generation: usize, diversity: f64) -> EvolutionState {
        EvolutionState {
            generation,
            diversity,
            best_fitness: 0.0,
        }
    }

    #[test]
    fn test_max_generations() {
        let criterion = MaxGenerations::new(10);
        assert!(!criterion.should_terminate(&state(9, 0.5)));
        assert!(criterion.should_terminate(&state(10, 0.5)));
        assert_eq!(criterion.reason(), TerminationReason::MaxGenerations);
    }

    #[test]
    fn test_diversity_convergence() {
        let criterion = DiversityConvergence::new(0.01);
        assert!(criterion.should_terminate(&state(3, 0.005)));
        assert!(!criterion.should_terminate(&state(3, 0.01)));
        assert!(!criterion.should_terminate(&state(3, 0.2)));
    }

    #[test]
    fn test_convergence_skips_generation_zero() {
        let criterion = DiversityConvergence::new(0.01);
        assert!(!criterion.should_terminate(&state(0, 0.0)));
        assert!(criterion.is_converged(0.0));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            TerminationReason::Converged.to_string(),
            "Population converged"
        );
    }
}

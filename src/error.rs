//! Error types for bitevo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for chromosome operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Chromosome is too long to be decoded through a 64-bit integer
    #[error("Chromosome of length {length} exceeds the decodable maximum of {max} bits")]
    TooLong { length: usize, max: usize },

    /// Invalid character in a textual chromosome
    #[error("Invalid character {character:?} at position {position}, expected '0' or '1'")]
    InvalidCharacter { character: char, position: usize },
}

/// Error type for invalid run configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A size parameter that must be positive was zero
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    /// Chromosome length exceeds the decodable maximum
    #[error("chromosome_length {length} exceeds the maximum of {max} bits")]
    ChromosomeTooLong { length: usize, max: usize },

    /// A probability outside [0, 1]
    #[error("{field} must be within [0, 1], got {value}")]
    InvalidRate { field: &'static str, value: f64 },

    /// Empty, inverted or unrepresentable function domain
    #[error("Domain [{min}, {max}] must be finite with min_value < max_value")]
    InvalidDomain { min: f64, max: f64 },

    /// Convergence threshold is negative or not finite
    #[error("convergence_threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),

    /// No evaluator was supplied to the builder
    #[error("Fitness evaluator must be specified")]
    MissingEvaluator,

    /// Configuration document could not be parsed
    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Error type for reading state that does not exist yet
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    /// Fitness was read before the individual was evaluated
    #[error("Fitness has not been evaluated")]
    FitnessNotEvaluated,

    /// Operation requires at least one individual
    #[error("Empty population")]
    EmptyPopulation,

    /// Operation requires an initialized population
    #[error("Population has not been initialized")]
    NotInitialized,
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover point outside the chromosome
    #[error("Crossover point {point} is out of range for chromosome length {length}")]
    CutPointOutOfRange { point: usize, length: usize },

    /// Two-point crossover points not strictly increasing
    #[error("Crossover points must satisfy first < second, got {first} and {second}")]
    MisorderedPoints { first: usize, second: usize },

    /// Uniform crossover mask has the wrong length
    #[error("Mask length {actual} does not match chromosome length {expected}")]
    MaskLengthMismatch { expected: usize, actual: usize },

    /// Parents have different chromosome lengths
    #[error("Parent lengths do not match: {expected} vs {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Invalid state
    #[error("Invalid state: {0}")]
    State(#[from] StateError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_error_display() {
        let err = GenomeError::TooLong {
            length: 70,
            max: 64,
        };
        assert_eq!(
            err.to_string(),
            "Chromosome of length 70 exceeds the decodable maximum of 64 bits"
        );

        let err = GenomeError::InvalidCharacter {
            character: 'x',
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "Invalid character 'x' at position 2, expected '0' or '1'"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NonPositive {
            field: "population_size",
        };
        assert_eq!(err.to_string(), "population_size must be positive");

        let err = ConfigError::InvalidDomain { min: 1.0, max: 1.0 };
        assert_eq!(
            err.to_string(),
            "Domain [1, 1] must be finite with min_value < max_value"
        );
    }

    #[test]
    fn test_operator_error_display() {
        let err = OperatorError::CutPointOutOfRange {
            point: 8,
            length: 8,
        };
        assert_eq!(
            err.to_string(),
            "Crossover point 8 is out of range for chromosome length 8"
        );

        let err = OperatorError::MaskLengthMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Mask length 3 does not match chromosome length 4"
        );
    }

    #[test]
    fn test_evolution_error_from_variants() {
        let err: EvolutionError = StateError::EmptyPopulation.into();
        assert!(matches!(err, EvolutionError::State(StateError::EmptyPopulation)));
        assert_eq!(err.to_string(), "Invalid state: Empty population");

        let err: EvolutionError = ConfigError::MissingEvaluator.into();
        assert!(matches!(err, EvolutionError::Config(_)));

        let err: EvolutionError = OperatorError::MisorderedPoints {
            first: 3,
            second: 3,
        }
        .into();
        assert!(matches!(err, EvolutionError::Operator(_)));
    }
}

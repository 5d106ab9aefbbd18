//! Fitness traits
//!
//! This module defines the evaluator contract consumed by the engine and the
//! percentage normalization used for progress reporting.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Tolerance under which two fitness values are treated as equal
pub const FITNESS_EPSILON: f64 = 1e-10;

/// Number of sampling steps used by [`Evaluator::theoretical_range`]
const RANGE_SAMPLES: usize = 1000;

/// Optimization direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// Larger raw fitness is better
    Maximize,
    /// Smaller raw fitness is better
    Minimize,
}

impl Objective {
    /// Build from a maximization flag
    pub fn from_maximization(is_maximization: bool) -> Self {
        if is_maximization {
            Self::Maximize
        } else {
            Self::Minimize
        }
    }

    /// Check if this is a maximization objective
    pub fn is_maximization(self) -> bool {
        matches!(self, Self::Maximize)
    }

    /// Check if `a` is strictly better than `b`
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Maximize => a > b,
            Self::Minimize => a < b,
        }
    }

    /// Ordering that places better fitness first
    pub fn compare(self, a: f64, b: f64) -> std::cmp::Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
        match self {
            Self::Maximize => ord.reverse(),
            Self::Minimize => ord,
        }
    }
}

/// A real-valued function of one variable to be optimized
///
/// Implementations are pluggable: the engine only decodes chromosomes to `x`
/// and calls [`Evaluator::evaluate`].
pub trait Evaluator: Debug + Send + Sync {
    /// Evaluate the function at `x`
    fn evaluate(&self, x: f64) -> f64;

    /// Whether the function is to be maximized
    fn is_maximization(&self) -> bool;

    /// Human-readable name of the function
    fn name(&self) -> &str;

    /// Human-readable formula of the function
    fn expression(&self) -> String;

    /// Deep copy into a new box
    fn box_clone(&self) -> Box<dyn Evaluator>;

    /// Theoretical optimum value, if known
    fn optimal_value(&self) -> Option<f64> {
        None
    }

    /// Location of the theoretical optimum, if known
    fn optimal_x(&self) -> Option<f64> {
        None
    }

    /// Optimization direction declared by this evaluator
    fn objective(&self) -> Objective {
        Objective::from_maximization(self.is_maximization())
    }

    /// Sample the domain and return the observed `(best, worst)` values
    fn theoretical_range(&self, min_value: f64, max_value: f64) -> (f64, f64) {
        let step = (max_value - min_value) / RANGE_SAMPLES as f64;
        let (lowest, highest) = (0..=RANGE_SAMPLES)
            .map(|i| self.evaluate(min_value + i as f64 * step))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
                (lo.min(f), hi.max(f))
            });

        if self.is_maximization() {
            (highest, lowest)
        } else {
            (lowest, highest)
        }
    }
}

impl Clone for Box<dyn Evaluator> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Normalize a raw fitness value to a percentage in [0, 100]
///
/// `best` and `worst` are the extremes of the current population. When the
/// optimum is known the scale runs from `worst` to the optimum; otherwise it
/// runs from `worst` to `best`, and a flat population scores 50 everywhere.
pub fn fitness_percentage(
    value: f64,
    best: f64,
    worst: f64,
    optimum: Option<f64>,
    objective: Objective,
) -> f64 {
    if let Some(optimum) = optimum.filter(|o| !o.is_nan()) {
        if (value - optimum).abs() < FITNESS_EPSILON {
            return 100.0;
        }
        let range = match objective {
            Objective::Maximize => optimum - worst,
            Objective::Minimize => worst - optimum,
        };
        if range > FITNESS_EPSILON {
            return scaled(value, worst, range, objective);
        }
    }

    let range = (best - worst).abs();
    if range < FITNESS_EPSILON {
        return 50.0;
    }
    scaled(value, worst, range, objective)
}

fn scaled(value: f64, worst: f64, range: f64, objective: Objective) -> f64 {
    let distance = match objective {
        Objective::Maximize => value - worst,
        Objective::Minimize => worst - value,
    };
    (distance / range * 100.0).clamp(0.0, 100.0)
}

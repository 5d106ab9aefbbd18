//! Reference evaluators
//!
//! This module provides one-dimensional test functions implementing
//! [`Evaluator`], for demonstrations and for exercising the engine.

use std::f64::consts::PI;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fitness::traits::{Evaluator, FITNESS_EPSILON};

/// Quadratic function: f(x) = ax² + bx + c
///
/// The vertex is reported as the optimum whenever `a` is non-zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub maximize: bool,
}

impl Quadratic {
    /// Create a new quadratic function
    pub fn new(a: f64, b: f64, c: f64, maximize: bool) -> Self {
        Self { a, b, c, maximize }
    }
}

impl Evaluator for Quadratic {
    fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Quadratic Function"
    }

    fn expression(&self) -> String {
        format!("f(x) = {}x² + {}x + {}", self.a, self.b, self.c)
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }

    fn optimal_x(&self) -> Option<f64> {
        (self.a.abs() >= FITNESS_EPSILON).then(|| -self.b / (2.0 * self.a))
    }

    fn optimal_value(&self) -> Option<f64> {
        self.optimal_x().map(|x| self.evaluate(x))
    }
}

/// Sinusoidal function: f(x) = A·sin(Bx + C) + D
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sinusoidal {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub offset: f64,
    pub maximize: bool,
}

impl Sinusoidal {
    /// Create a new sinusoidal function
    pub fn new(amplitude: f64, frequency: f64, phase: f64, offset: f64, maximize: bool) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            offset,
            maximize,
        }
    }
}

impl Default for Sinusoidal {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0, true)
    }
}

impl Evaluator for Sinusoidal {
    fn evaluate(&self, x: f64) -> f64 {
        self.amplitude * (self.frequency * x + self.phase).sin() + self.offset
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Sinusoidal Function"
    }

    fn expression(&self) -> String {
        format!(
            "f(x) = {} * sin({} * x + {}) + {}",
            self.amplitude, self.frequency, self.phase, self.offset
        )
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// One-dimensional Rastrigin: f(x) = A + x² - A·cos(2πx)
///
/// Highly multimodal. Global minimum 0 at x = 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rastrigin {
    pub a: f64,
    pub maximize: bool,
}

impl Rastrigin {
    /// Create a new Rastrigin function
    pub fn new(a: f64, maximize: bool) -> Self {
        Self { a, maximize }
    }
}

impl Default for Rastrigin {
    fn default() -> Self {
        Self::new(10.0, false)
    }
}

impl Evaluator for Rastrigin {
    fn evaluate(&self, x: f64) -> f64 {
        self.a + x * x - self.a * (2.0 * PI * x).cos()
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Rastrigin Function"
    }

    fn expression(&self) -> String {
        format!("f(x) = {} + x² - {} * cos(2π * x)", self.a, self.a)
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }

    fn optimal_value(&self) -> Option<f64> {
        Some(0.0)
    }

    fn optimal_x(&self) -> Option<f64> {
        Some(0.0)
    }
}

/// Cubic polynomial: f(x) = ax³ + bx² + cx + d
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub maximize: bool,
}

impl Polynomial {
    /// Create a new cubic polynomial
    pub fn new(a: f64, b: f64, c: f64, d: f64, maximize: bool) -> Self {
        Self {
            a,
            b,
            c,
            d,
            maximize,
        }
    }
}

impl Evaluator for Polynomial {
    fn evaluate(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Polynomial Function"
    }

    fn expression(&self) -> String {
        format!(
            "f(x) = {}x³ + {}x² + {}x + {}",
            self.a, self.b, self.c, self.d
        )
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Exponential function: f(x) = A·e^(Bx) + C
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exponential {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub maximize: bool,
}

impl Exponential {
    /// Create a new exponential function
    pub fn new(a: f64, b: f64, c: f64, maximize: bool) -> Self {
        Self { a, b, c, maximize }
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Self::new(1.0, 0.1, 0.0, true)
    }
}

impl Evaluator for Exponential {
    fn evaluate(&self, x: f64) -> f64 {
        self.a * (self.b * x).exp() + self.c
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Exponential Function"
    }

    fn expression(&self) -> String {
        format!("f(x) = {} * e^({} * x) + {}", self.a, self.b, self.c)
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Linear function: f(x) = ax + b
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Linear {
    pub slope: f64,
    pub intercept: f64,
    pub maximize: bool,
}

impl Linear {
    /// Create a new linear function
    pub fn new(slope: f64, intercept: f64, maximize: bool) -> Self {
        Self {
            slope,
            intercept,
            maximize,
        }
    }
}

impl Default for Linear {
    fn default() -> Self {
        Self::new(1.0, 0.0, true)
    }
}

impl Evaluator for Linear {
    fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Linear Function"
    }

    fn expression(&self) -> String {
        format!("f(x) = {} * x + {}", self.slope, self.intercept)
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Cosine function: f(x) = A·cos(Bx + C) + D
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cosine {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub offset: f64,
    pub maximize: bool,
}

impl Cosine {
    /// Create a new cosine function
    pub fn new(amplitude: f64, frequency: f64, phase: f64, offset: f64, maximize: bool) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            offset,
            maximize,
        }
    }
}

impl Default for Cosine {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0, true)
    }
}

impl Evaluator for Cosine {
    fn evaluate(&self, x: f64) -> f64 {
        self.amplitude * (self.frequency * x + self.phase).cos() + self.offset
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        "Cosine Function"
    }

    fn expression(&self) -> String {
        format!(
            "f(x) = {} * cos({} * x + {}) + {}",
            self.amplitude, self.frequency, self.phase, self.offset
        )
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }
}

/// Evaluator backed by an arbitrary closure
#[derive(Clone)]
pub struct FnEvaluator {
    name: String,
    function: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    maximize: bool,
    optimum: Option<(f64, f64)>,
}

impl FnEvaluator {
    /// Wrap a closure as an evaluator
    pub fn new<F>(name: impl Into<String>, maximize: bool, function: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
            maximize,
            optimum: None,
        }
    }

    /// Declare the known optimum as `(x, f(x))`
    pub fn with_optimum(mut self, x: f64, value: f64) -> Self {
        self.optimum = Some((x, value));
        self
    }
}

impl std::fmt::Debug for FnEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEvaluator")
            .field("name", &self.name)
            .field("maximize", &self.maximize)
            .field("optimum", &self.optimum)
            .finish_non_exhaustive()
    }
}

impl Evaluator for FnEvaluator {
    fn evaluate(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    fn is_maximization(&self) -> bool {
        self.maximize
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn expression(&self) -> String {
        format!("f(x) = {}(x)", self.name)
    }

    fn box_clone(&self) -> Box<dyn Evaluator> {
        Box::new(self.clone())
    }

    fn optimal_value(&self) -> Option<f64> {
        self.optimum.map(|(_, value)| value)
    }

    fn optimal_x(&self) -> Option<f64> {
        self.optimum.map(|(x, _)| x)
    }
}

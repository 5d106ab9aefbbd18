//! Crossover operators
//!
//! This module provides the deterministic crossover primitives and the
//! randomized strategies that draw their parameters.

use rand::seq::index;
use rand::Rng;

use crate::error::OperatorError;
use crate::genome::chromosome::Chromosome;
use crate::operators::traits::CrossoverOperator;

type Offspring = Result<(Chromosome, Chromosome), OperatorError>;

fn check_lengths(parent1: &Chromosome, parent2: &Chromosome) -> Result<usize, OperatorError> {
    if parent1.len() != parent2.len() {
        return Err(OperatorError::LengthMismatch {
            expected: parent1.len(),
            actual: parent2.len(),
        });
    }
    Ok(parent1.len())
}

/// Exchange tails at `point`
///
/// The first child takes bits `[0, point)` from `parent1` and the rest from
/// `parent2`; the second child is the complement.
pub fn single_point(parent1: &Chromosome, parent2: &Chromosome, point: usize) -> Offspring {
    let length = check_lengths(parent1, parent2)?;
    if point >= length {
        return Err(OperatorError::CutPointOutOfRange { point, length });
    }

    let (a, b) = (parent1.bits(), parent2.bits());
    let child1: Vec<bool> = a[..point].iter().chain(&b[point..]).copied().collect();
    let child2: Vec<bool> = b[..point].iter().chain(&a[point..]).copied().collect();
    Ok((Chromosome::new(child1), Chromosome::new(child2)))
}

/// Exchange the closed segment `[first, second]`
pub fn two_point(
    parent1: &Chromosome,
    parent2: &Chromosome,
    first: usize,
    second: usize,
) -> Offspring {
    let length = check_lengths(parent1, parent2)?;
    if first >= second {
        return Err(OperatorError::MisorderedPoints { first, second });
    }
    if second >= length {
        return Err(OperatorError::CutPointOutOfRange {
            point: second,
            length,
        });
    }

    let mut child1 = parent1.bits().to_vec();
    let mut child2 = parent2.bits().to_vec();
    child1[first..=second].swap_with_slice(&mut child2[first..=second]);
    Ok((Chromosome::new(child1), Chromosome::new(child2)))
}

/// Pick each position from `parent1` where `mask` is set, else from `parent2`
pub fn uniform(parent1: &Chromosome, parent2: &Chromosome, mask: &[bool]) -> Offspring {
    let length = check_lengths(parent1, parent2)?;
    if mask.len() != length {
        return Err(OperatorError::MaskLengthMismatch {
            expected: length,
            actual: mask.len(),
        });
    }

    let (child1, child2): (Vec<bool>, Vec<bool>) = mask
        .iter()
        .zip(parent1.bits().iter().zip(parent2.bits()))
        .map(|(&take_first, (&a, &b))| if take_first { (a, b) } else { (b, a) })
        .unzip();
    Ok((Chromosome::new(child1), Chromosome::new(child2)))
}

/// Single-point crossover with the cut drawn from `[1, L-1]`
///
/// Chromosomes shorter than two bits are copied unchanged.
#[derive(Clone, Debug, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    /// Create a new single-point crossover
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for SinglePointCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Offspring {
        let length = check_lengths(parent1, parent2)?;
        if length < 2 {
            return Ok((parent1.clone(), parent2.clone()));
        }
        single_point(parent1, parent2, rng.gen_range(1..length))
    }
}

/// Two-point crossover with two distinct points drawn from `[1, L-1]`
///
/// With two bits there is only one interior point, so this becomes a
/// single-point crossover at 1.
#[derive(Clone, Debug, Default)]
pub struct TwoPointCrossover;

impl TwoPointCrossover {
    /// Create a new two-point crossover
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for TwoPointCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Offspring {
        let length = check_lengths(parent1, parent2)?;
        match length {
            0 | 1 => Ok((parent1.clone(), parent2.clone())),
            2 => single_point(parent1, parent2, 1),
            _ => {
                let points = index::sample(rng, length - 1, 2);
                let (a, b) = (points.index(0) + 1, points.index(1) + 1);
                two_point(parent1, parent2, a.min(b), a.max(b))
            }
        }
    }
}

/// Uniform crossover with a fair random mask
#[derive(Clone, Debug, Default)]
pub struct UniformCrossover;

impl UniformCrossover {
    /// Create a new uniform crossover
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for UniformCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Offspring {
        let length = check_lengths(parent1, parent2)?;
        let mask: Vec<bool> = (0..length).map(|_| rng.gen::<bool>()).collect();
        uniform(parent1, parent2, &mask)
    }
}

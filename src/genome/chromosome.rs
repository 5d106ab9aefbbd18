//! Binary chromosome
//!
//! This module provides the fixed-length bit string that encodes one candidate
//! solution, and its mapping onto a real-valued domain.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// Widest chromosome that can be decoded through a `u64`
pub const MAX_CHROMOSOME_LENGTH: usize = 64;

/// Fixed-length bit sequence, most significant bit first
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Create a new chromosome with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros chromosome of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create an all-ones chromosome of the given length
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Create a chromosome with each bit drawn from a fair coin
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen::<bool>()).collect(),
        }
    }

    /// Create a chromosome from the low `length` bits of `value`, MSB first
    ///
    /// # Panics
    ///
    /// Panics if `length` exceeds [`MAX_CHROMOSOME_LENGTH`].
    pub fn from_u64(value: u64, length: usize) -> Self {
        assert!(
            length <= MAX_CHROMOSOME_LENGTH,
            "Length must be <= 64 for u64 conversion"
        );
        let bits = (0..length)
            .map(|i| (value >> (length - 1 - i)) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Interpret the bits as an unsigned integer, first bit most significant
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits.len() > MAX_CHROMOSOME_LENGTH {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)),
        )
    }

    /// Largest integer representable by a chromosome of this length (`2^L - 1`)
    pub fn max_integer(&self) -> Option<u64> {
        match self.bits.len() {
            0 => Some(0),
            n if n < MAX_CHROMOSOME_LENGTH => Some((1u64 << n) - 1),
            MAX_CHROMOSOME_LENGTH => Some(u64::MAX),
            _ => None,
        }
    }

    /// Map the chromosome linearly onto `[min_value, max_value]`
    ///
    /// All zeros decode to exactly `min_value`, all ones to `max_value`.
    /// An empty chromosome decodes to `min_value`.
    pub fn decode(&self, min_value: f64, max_value: f64) -> Result<f64, GenomeError> {
        let too_long = || GenomeError::TooLong {
            length: self.bits.len(),
            max: MAX_CHROMOSOME_LENGTH,
        };
        let int_value = self.to_u64().ok_or_else(too_long)?;
        let int_max = self.max_integer().ok_or_else(too_long)?;
        if int_max == 0 {
            return Ok(min_value);
        }
        let t = int_value as f64 / int_max as f64;
        let width = max_value - min_value;
        if width.is_finite() {
            Ok(min_value + t * width)
        } else {
            // Width overflows for domains near the f64 limits
            Ok(min_value * (1.0 - t) + max_value * t)
        }
    }

    /// Decoding step between two adjacent integers over the given domain
    pub fn resolution(length: usize, min_value: f64, max_value: f64) -> Option<f64> {
        Self::zeros(length)
            .max_integer()
            .filter(|&m| m > 0)
            .map(|m| (max_value - min_value) / m as f64)
    }

    /// Get the length of the chromosome
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the chromosome is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Set a specific bit
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Borrow the raw bits
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of positions at which two chromosomes differ
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Hamming distance divided by the chromosome length, in [0, 1]
    pub fn normalized_distance(&self, other: &Self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.hamming_distance(other) as f64 / self.bits.len() as f64
    }
}

impl std::ops::Index<usize> for Chromosome {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl<const N: usize> From<[bool; N]> for Chromosome {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl<'a> IntoIterator for &'a Chromosome {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl FromStr for Chromosome {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GenomeError::InvalidCharacter {
                    character,
                    position,
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

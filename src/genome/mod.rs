//! Genome representation
//!
//! This module provides the binary chromosome and its decoding.

pub mod chromosome;

pub mod prelude {
    pub use super::chromosome::*;
}

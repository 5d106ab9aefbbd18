//! # bitevo
//!
//! A binary-encoded genetic algorithm for optimizing real functions of one
//! variable.
//!
//! Candidate solutions are fixed-length bit strings decoded linearly onto a
//! closed interval. The engine breeds generations with elitism, one of three
//! selection schemes, one of three crossover schemes and bit-flip mutation,
//! and stops at a generation budget or when population diversity collapses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitevo::prelude::*;
//!
//! let mut ga = GeneticAlgorithm::builder()
//!     .config(
//!         GAConfig::new()
//!             .with_population_size(60)
//!             .with_max_generations(200)
//!             .with_domain(-5.0, 5.0)
//!             .with_seed(42),
//!     )
//!     .evaluator(Sinusoidal::default())
//!     .build()?;
//!
//! let stats = ga.run()?;
//! println!("best f({:.4}) = {:.4}", stats.best_x, stats.best_fitness);
//! # Ok::<(), bitevo::error::EvolutionError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::config::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::*;
}

//! Binary-coded genetic algorithm.
//!
//! Maximizes a scalar objective over a bounded real interval by evolving a
//! population of fixed-length bit strings:
//!
//! - **Encoding**: maps `[xmin, xmax]` at a required precision onto `L`-bit
//!   strings and back.
//! - **Genetic Algorithm (GA)**: random initialization, tournament
//!   selection, single-point crossover and bit-flip mutation, driven by an
//!   evolution loop that keeps the best solution seen so far.
//!
//! All randomness comes from a caller-supplied or seeded RNG, so runs are
//! reproducible.
//!
//! # Example
//!
//! ```
//! use bitga::ga::{GaConfig, GaRunner};
//!
//! let config = GaConfig::new(1.0, 16.0, 1.0)
//!     .with_population_size(6)
//!     .with_generations(20)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&|x: f64| x.sqrt(), &config).unwrap();
//! let best = result.best.unwrap();
//! println!("{} -> x = {}, f(x) = {}", best.bits, best.value, best.fitness);
//! ```

pub mod encoding;
mod error;
pub mod ga;

pub use error::{GaError, Result};

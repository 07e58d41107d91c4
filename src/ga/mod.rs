//! Binary-coded Genetic Algorithm.
//!
//! Individuals are fixed-length bit strings decoded onto a real interval
//! (see [`crate::encoding`]). The caller supplies only the objective; the
//! engine handles initialization, evaluation, selection, crossover and
//! mutation.
//!
//! # Core Traits
//!
//! - [`Objective`]: The function being maximized (any `Fn(f64) -> f64`)
//!
//! # Key Types
//!
//! - [`BitString`]: A candidate solution
//! - [`GaConfig`]: Algorithm parameters (interval, precision, population, rates)
//! - [`Evolution`]: One run, stepped a generation at a time
//! - [`GaRunner`]: Executes a complete run
//! - [`GaResult`]: Best solution found and its history
//!
//! # Operators
//!
//! - [`random_individual`], [`random_population`]: initial population
//! - [`evaluate`]: decoding and scoring
//! - [`Tournament`]: tournament selection
//! - [`single_point_crossover`], [`bit_flip_mutation`]: variation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod fitness;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use fitness::{evaluate, Evaluation};
pub use operators::{bit_flip_mutation, single_point_crossover};
pub use population::{random_individual, random_population};
pub use runner::{Evolution, GaResult, GaRunner, GenerationStats, Phase};
pub use selection::{tournament_select, Sampling, Tournament};
pub use types::{BestSoFar, BitString, Objective, Population, Solution};

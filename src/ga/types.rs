//! Core types for the binary GA.
//!
//! [`BitString`] is the individual, [`Objective`] is the contract between
//! the engine and the caller's function, and [`BestSoFar`] is the running
//! record the evolution loop keeps across generations.

use super::runner::GenerationStats;
use crate::error::GaError;
use std::fmt;
use std::str::FromStr;

/// A fixed-length bit string, most significant bit first.
///
/// Individuals are never edited in place by the engine: crossover and
/// mutation build new values from old ones.
///
/// # Examples
///
/// ```
/// use bitga::ga::BitString;
///
/// let bits: BitString = "0110".parse().unwrap();
/// assert_eq!(bits.len(), 4);
/// assert_eq!(bits.to_string(), "0110");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Wraps an explicit bit sequence.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// All-zero string of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// All-one string of `len` bits.
    pub fn ones(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the string has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, most significant first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl AsRef<[bool]> for BitString {
    fn as_ref(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BitString {
    type Err = GaError;

    /// Parses a string of `'0'` and `'1'` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GaError::InvalidSymbol { symbol, position }),
            })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// An ordered set of individuals, one generation's worth.
pub type Population = Vec<BitString>;

/// A decoded, evaluated individual.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Decoded point in `[xmin, xmax]`.
    pub value: f64,

    /// Objective value at `value`.
    pub fitness: f64,

    /// The encoding that produced `value`.
    pub bits: BitString,
}

/// Best individual observed so far.
///
/// Starts empty with fitness `-inf` and is replaced only when a strictly
/// greater fitness is offered, so its fitness never decreases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestSoFar {
    solution: Option<Solution>,
}

impl BestSoFar {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitness of the record, `f64::NEG_INFINITY` while empty.
    pub fn fitness(&self) -> f64 {
        self.solution
            .as_ref()
            .map_or(f64::NEG_INFINITY, |s| s.fitness)
    }

    /// The current record, if any individual has been accepted.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Offers a candidate; returns `true` if it replaced the record.
    ///
    /// NaN fitness never replaces the record.
    pub fn offer(&mut self, value: f64, fitness: f64, bits: &BitString) -> bool {
        if fitness > self.fitness() {
            self.solution = Some(Solution {
                value,
                fitness,
                bits: bits.clone(),
            });
            true
        } else {
            false
        }
    }

    /// Consumes the record.
    pub fn into_solution(self) -> Option<Solution> {
        self.solution
    }
}

/// The function being maximized.
///
/// Any `Fn(f64) -> f64` is an objective, so closures and function pointers
/// can be passed directly to [`GaRunner::run`](super::GaRunner::run).
/// Implement the trait by hand to observe per-generation statistics.
///
/// # Implementing
///
/// ```ignore
/// struct Sqrt;
///
/// impl Objective for Sqrt {
///     fn fitness(&self, x: f64) -> f64 { x.sqrt() }
///     fn on_generation(&self, stats: &GenerationStats) {
///         eprintln!("gen {}: {}", stats.generation, stats.best_so_far_fitness);
///     }
/// }
/// ```
pub trait Objective {
    /// Fitness of the decoded point `x`. Larger is better.
    ///
    /// Should be deterministic for the best-so-far record to be meaningful.
    fn fitness(&self, x: f64) -> f64;

    /// Called after each generation has been evaluated and tracked.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn fitness(&self, x: f64) -> f64 {
        self(x)
    }
}

//! Bit-string genetic operators.
//!
//! Both operators take a whole population and return a new one of the same
//! shape; inputs are never modified.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: swap tails of mirrored pairs at one random cut
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: independent Bernoulli flip of every bit
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::types::{BitString, Population};
use crate::error::{GaError, Result};
use rand::Rng;
use tracing::instrument;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover over a whole mating pool.
///
/// The pool is folded onto itself: `pool[0]` is paired with `pool[n-1]`,
/// `pool[1]` with `pool[n-2]`, and so on. Each pair draws a cut point
/// uniformly from `[1, L-1]` and produces two children by exchanging the
/// segments after the cut. Children are emitted pair by pair, so the output
/// has the same size as the pool.
///
/// # Errors
/// - [`GaError::OddPoolSize`] if the pool cannot be split into pairs
/// - [`GaError::InvalidIndividualLength`] if individuals have fewer than 2 bits
/// - [`GaError::LengthMismatch`] if individuals differ in length
///
/// # Complexity
/// O(n·L) time and space
#[instrument(level = "debug", skip_all, fields(pool = pool.len()))]
pub fn single_point_crossover<R: Rng>(pool: &[BitString], rng: &mut R) -> Result<Population> {
    if pool.len() % 2 != 0 {
        return Err(GaError::OddPoolSize { size: pool.len() });
    }
    let Some(first) = pool.first() else {
        return Ok(Vec::new());
    };

    let len = first.len();
    if len < 2 {
        return Err(GaError::InvalidIndividualLength { length: len });
    }
    if let Some(other) = pool.iter().find(|ind| ind.len() != len) {
        return Err(GaError::LengthMismatch {
            expected: len,
            actual: other.len(),
        });
    }

    let half = pool.len() / 2;
    let mut children = Vec::with_capacity(pool.len());
    for (front, back) in pool[..half].iter().zip(pool[half..].iter().rev()) {
        let point = rng.random_range(1..len);
        let (c1, c2) = exchange_tails(front, back, point);
        children.push(c1);
        children.push(c2);
    }
    Ok(children)
}

/// Build both children of one pair cut at `point`.
fn exchange_tails(a: &BitString, b: &BitString, point: usize) -> (BitString, BitString) {
    let (a, b) = (a.bits(), b.bits());
    let c1 = a[..point].iter().chain(&b[point..]).copied().collect();
    let c2 = b[..point].iter().chain(&a[point..]).copied().collect();
    (c1, c2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation: every bit of every individual flips independently with
/// probability `p`.
///
/// `p = 0` returns a copy of the input.
///
/// # Errors
/// [`GaError::InvalidProbability`] if `p` is outside `[0, 1]` or NaN.
///
/// # Complexity
/// O(n·L)
#[instrument(level = "debug", skip_all, fields(population = population.len(), p = p))]
pub fn bit_flip_mutation<R: Rng>(
    population: &[BitString],
    p: f64,
    rng: &mut R,
) -> Result<Population> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GaError::InvalidProbability { probability: p });
    }
    Ok(population
        .iter()
        .map(|ind| {
            ind.bits()
                .iter()
                .map(|&bit| bit ^ rng.random_bool(p))
                .collect()
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================

//! Fitness evaluation.

use super::types::{BitString, Objective};
use crate::encoding::Domain;
use crate::error::Result;

/// Decoded values and fitness of one population, aligned by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Decoded point of each individual.
    pub values: Vec<f64>,

    /// Objective value of each individual. Larger is better.
    pub fitness: Vec<f64>,
}

impl Evaluation {
    /// Number of evaluated individuals.
    pub fn len(&self) -> usize {
        self.fitness.len()
    }

    /// Whether nothing was evaluated.
    pub fn is_empty(&self) -> bool {
        self.fitness.is_empty()
    }

    /// Index of the fittest individual; the first one wins ties.
    ///
    /// NaN fitness is never chosen over a number.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &f) in self.fitness.iter().enumerate() {
            match best {
                Some(b) if !(f > self.fitness[b]) => {}
                _ if f.is_nan() => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Arithmetic mean of the fitness pool, NaN when empty.
    pub fn mean_fitness(&self) -> f64 {
        if self.fitness.is_empty() {
            return f64::NAN;
        }
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }
}

/// Decodes every individual and applies `objective`.
///
/// Pure: the best-so-far record is the caller's business.
///
/// # Errors
/// Propagates [`LengthMismatch`](crate::GaError::LengthMismatch) from decoding.
pub fn evaluate<O: Objective + ?Sized>(
    objective: &O,
    domain: &Domain,
    population: &[BitString],
) -> Result<Evaluation> {
    let mut values = Vec::with_capacity(population.len());
    let mut fitness = Vec::with_capacity(population.len());
    for individual in population {
        let x = domain.decode(individual)?;
        values.push(x);
        fitness.push(objective.fitness(x));
    }
    Ok(Evaluation { values, fitness })
}

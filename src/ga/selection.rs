//! Tournament selection.
//!
//! Each slot of the new mating pool is filled by drawing a small random
//! sub-sample of the population and copying its fittest member. Larger
//! tournaments mean stronger selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{BitString, Population};
use crate::error::{GaError, Result};
use rand::seq::index;
use rand::Rng;
use tracing::instrument;

/// How tournament candidates are drawn from the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sampling {
    /// Indices are drawn independently, so an individual may meet itself.
    ///
    /// This is the classic scheme and the default.
    #[default]
    WithReplacement,

    /// Indices within one tournament are distinct.
    ///
    /// A tournament as large as the population always contains its best
    /// individual.
    WithoutReplacement,
}

/// Tournament selection for maximization.
///
/// # Examples
///
/// ```
/// use bitga::ga::{Sampling, Tournament};
///
/// // Binary tournament (light pressure, the default)
/// let sel = Tournament::default();
/// assert_eq!(sel.size, 2);
///
/// // Four distinct competitors per slot
/// let sel = Tournament::new(4).with_sampling(Sampling::WithoutReplacement);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tournament {
    /// Competitors per tournament.
    ///
    /// - 2: light pressure (good for diversity)
    /// - 3-5: moderate pressure
    /// - more: strong pressure (risk of premature convergence)
    pub size: usize,

    /// Candidate sampling scheme.
    pub sampling: Sampling,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Tournament {
    /// Tournament of `size` competitors sampled with replacement.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            sampling: Sampling::WithReplacement,
        }
    }

    /// Sets the sampling scheme.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Checks that tournaments can be drawn from `population` individuals.
    pub fn validate(&self, population: usize) -> Result<()> {
        let too_large = self.sampling == Sampling::WithoutReplacement && self.size > population;
        if self.size == 0 || too_large {
            return Err(GaError::InvalidTournamentSize {
                size: self.size,
                population,
            });
        }
        Ok(())
    }

    /// Builds a new mating pool of the same size as `population`.
    ///
    /// For every slot, [`size`](Self::size) indices are drawn and the
    /// individual with the largest fitness is copied. Among equal maxima the
    /// first one drawn wins; NaN fitness loses to any number.
    ///
    /// # Errors
    /// - [`GaError::InvalidTournamentSize`] if the size is 0, or exceeds the
    ///   population when sampling without replacement
    /// - [`GaError::SizeMismatch`] if `fitness` is not aligned with `population`
    #[instrument(level = "debug", skip_all, fields(population = population.len(), size = self.size))]
    pub fn select<R: Rng>(
        &self,
        population: &[BitString],
        fitness: &[f64],
        rng: &mut R,
    ) -> Result<Population> {
        if population.len() != fitness.len() {
            return Err(GaError::SizeMismatch {
                population: population.len(),
                fitness: fitness.len(),
            });
        }
        if population.is_empty() && self.size > 0 {
            return Ok(Vec::new());
        }
        self.validate(population.len())?;

        Ok((0..population.len())
            .map(|_| population[self.pick(fitness, rng)].clone())
            .collect())
    }

    /// Runs a single tournament over a non-empty fitness pool and returns
    /// the winner's index.
    fn pick<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        let n = fitness.len();
        match self.sampling {
            Sampling::WithReplacement => {
                let mut best = rng.random_range(0..n);
                for _ in 1..self.size {
                    let idx = rng.random_range(0..n);
                    if beats(fitness[idx], fitness[best]) {
                        best = idx;
                    }
                }
                best
            }
            Sampling::WithoutReplacement => {
                let drawn = index::sample(rng, n, self.size);
                let mut candidates = drawn.iter();
                let mut best = candidates.next().unwrap_or(0);
                for idx in candidates {
                    if beats(fitness[idx], fitness[best]) {
                        best = idx;
                    }
                }
                best
            }
        }
    }
}

fn beats(challenger: f64, incumbent: f64) -> bool {
    challenger > incumbent || (incumbent.is_nan() && !challenger.is_nan())
}

/// Tournament selection of `size` competitors drawn with replacement.
///
/// Shorthand for `Tournament::new(size).select(..)`.
pub fn tournament_select<R: Rng>(
    population: &[BitString],
    fitness: &[f64],
    size: usize,
    rng: &mut R,
) -> Result<Population> {
    Tournament::new(size).select(population, fitness, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_population(n: usize) -> Vec<BitString> {
        (0..n)
            .map(|i| (0..8).rev().map(|b| (i >> b) & 1 == 1).collect())
            .collect()
    }

    fn index_of(pop: &[BitString], ind: &BitString) -> usize {
        pop.iter().position(|p| p == ind).unwrap()
    }

    #[test]
    fn test_preserves_size_and_length() {
        let pop = make_population(10);
        let fitness: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut rng = StdRng::seed_from_u64(42);

        let next = tournament_select(&pop, &fitness, 3, &mut rng).unwrap();
        assert_eq!(next.len(), 10);
        assert!(next.iter().all(|ind| ind.len() == 8));
        assert!(next.iter().all(|ind| pop.contains(ind)));
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(4);
        let fitness = [10.0, 5.0, 1.0, 8.0];
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..2500 {
            for ind in Tournament::new(4).select(&pop, &fitness, &mut rng).unwrap() {
                counts[index_of(&pop, &ind)] += 1;
            }
        }
        // P(best drawn at least once in 4 draws) = 1 - (3/4)^4 ≈ 0.68
        let best_count = counts[0];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/10000"
        );
    }

    #[test]
    fn test_full_tournament_without_replacement_picks_best() {
        let pop = make_population(6);
        let fitness = [0.3, 2.0, 9.5, -1.0, 9.0, 4.0];
        let mut rng = StdRng::seed_from_u64(3);

        let sel = Tournament::new(6).with_sampling(Sampling::WithoutReplacement);
        for _ in 0..20 {
            let next = sel.select(&pop, &fitness, &mut rng).unwrap();
            assert!(next.iter().all(|ind| *ind == pop[2]));
        }
    }

    #[test]
    fn test_size_one_is_uniform() {
        let pop = make_population(4);
        let fitness = [10.0, 5.0, 1.0, 8.0];
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..2500 {
            for ind in Tournament::new(1).select(&pop, &fitness, &mut rng).unwrap() {
                counts[index_of(&pop, &ind)] += 1;
            }
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_ties_go_to_first_drawn() {
        let pop = make_population(5);
        let fitness = [1.0, 7.0, 7.0, 7.0, 0.0];
        let mut rng = StdRng::seed_from_u64(11);
        let mut replay = rng.clone();

        let next = tournament_select(&pop, &fitness, 3, &mut rng).unwrap();

        for ind in &next {
            let drawn: Vec<usize> = (0..3).map(|_| replay.random_range(0..5)).collect();
            let max = drawn.iter().map(|&i| fitness[i]).fold(f64::MIN, f64::max);
            let expected = *drawn.iter().find(|&&i| fitness[i] == max).unwrap();
            assert_eq!(index_of(&pop, ind), expected, "drawn {drawn:?}");
        }
    }

    #[test]
    fn test_nan_loses() {
        assert!(beats(1.0, f64::NAN));
        assert!(!beats(f64::NAN, 1.0));
        assert!(!beats(f64::NAN, f64::NAN));
        assert!(!beats(1.0, 1.0));
    }

    #[test]
    fn test_size_mismatch() {
        let pop = make_population(4);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            tournament_select(&pop, &[1.0, 2.0], 2, &mut rng),
            Err(GaError::SizeMismatch {
                population: 4,
                fitness: 2
            })
        );
    }

    #[test]
    fn test_invalid_tournament_size() {
        let pop = make_population(4);
        let fitness = [1.0; 4];
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            tournament_select(&pop, &fitness, 0, &mut rng),
            Err(GaError::InvalidTournamentSize { size: 0, .. })
        ));

        let sel = Tournament::new(5).with_sampling(Sampling::WithoutReplacement);
        assert!(matches!(
            sel.select(&pop, &fitness, &mut rng),
            Err(GaError::InvalidTournamentSize { size: 5, population: 4 })
        ));

        // With replacement a tournament may exceed the population.
        assert!(tournament_select(&pop, &fitness, 9, &mut rng).is_ok());
    }

    #[test]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(tournament_select(&[], &[], 2, &mut rng).unwrap().is_empty());
    }
}

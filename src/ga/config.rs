//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of a run: the search interval, the
//! precision that fixes the bit width, and the evolutionary settings.

use super::selection::{Sampling, Tournament};
use crate::encoding::Domain;
use crate::error::{GaError, Result};

/// Configuration for the binary GA.
///
/// The interval and precision are required; everything else has a default.
///
/// # Defaults
///
/// ```
/// use bitga::ga::{GaConfig, Tournament};
///
/// let config = GaConfig::new(1.0, 16.0, 1.0);
/// assert_eq!(config.population_size, 6);
/// assert_eq!(config.generations, 20);
/// assert_eq!(config.selection, Tournament::new(2));
/// assert_eq!(config.mutation_rate, 0.01);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use bitga::ga::GaConfig;
///
/// let config = GaConfig::new(-5.0, 5.0, 1e-4)
///     .with_population_size(50)
///     .with_generations(200)
///     .with_tournament_size(3)
///     .with_mutation_rate(0.02)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Lower bound of the search interval.
    pub xmin: f64,

    /// Upper bound of the search interval. Must exceed `xmin`.
    pub xmax: f64,

    /// Required decoding precision; fixes the bit width.
    pub error: f64,

    /// Number of individuals. Must be positive and even.
    pub population_size: usize,

    /// Number of generations to evaluate. Zero evaluates nothing.
    pub generations: usize,

    /// Parent selection scheme.
    pub selection: Tournament,

    /// Per-bit flip probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl GaConfig {
    /// Configuration for `[xmin, xmax]` at precision `error`, with defaults
    /// for everything else.
    pub fn new(xmin: f64, xmax: f64, error: f64) -> Self {
        Self {
            xmin,
            xmax,
            error,
            population_size: 6,
            generations: 20,
            selection: Tournament::default(),
            mutation_rate: 0.01,
            seed: None,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the selection scheme.
    pub fn with_selection(mut self, selection: Tournament) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the tournament size, keeping the sampling scheme.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.selection.size = k;
        self
    }

    /// Sets the tournament sampling scheme.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.selection.sampling = sampling;
        self
    }

    /// Sets the per-bit mutation probability.
    ///
    /// Out-of-range values are reported by [`validate`](Self::validate),
    /// not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The validated search domain.
    pub fn domain(&self) -> Result<Domain> {
        Domain::new(self.xmin, self.xmax, self.error)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// - [`GaError::InvalidDomain`], [`GaError::InvalidPrecision`],
    ///   [`GaError::InvalidLength`] from the interval
    /// - [`GaError::InvalidIndividualLength`] if the interval needs fewer
    ///   than 2 bits (crossover could not cut it)
    /// - [`GaError::InvalidPopulationSize`] for an empty population
    /// - [`GaError::OddPoolSize`] for an odd population
    /// - [`GaError::InvalidTournamentSize`] from the selection scheme
    /// - [`GaError::InvalidProbability`] for a mutation rate outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        let domain = self.domain()?;
        if domain.bits() < 2 {
            return Err(GaError::InvalidIndividualLength {
                length: domain.bits(),
            });
        }
        if self.population_size == 0 {
            return Err(GaError::InvalidPopulationSize {
                size: self.population_size,
            });
        }
        if self.population_size % 2 != 0 {
            return Err(GaError::OddPoolSize {
                size: self.population_size,
            });
        }
        self.selection.validate(self.population_size)?;
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidProbability {
                probability: self.mutation_rate,
            });
        }
        Ok(())
    }
}

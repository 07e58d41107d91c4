//! GA evolutionary loop execution.
//!
//! [`Evolution`] is the explicit state machine of one run:
//!
//! ```text
//! Initializing → Evaluating → TrackingBest → Selecting → Recombining → Mutating
//!                    ↑                                                     │
//!                    └─────────────────────────────────────────────────────┘
//!                                      (after the last generation: Terminating)
//! ```
//!
//! [`GaRunner`] wires a seeded RNG to it and drives it to completion.

use super::config::GaConfig;
use super::fitness::evaluate;
use super::operators::{bit_flip_mutation, single_point_crossover};
use super::population::random_population;
use super::selection::Tournament;
use super::types::{BestSoFar, BitString, Objective, Population, Solution};
use crate::encoding::Domain;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

/// Where an [`Evolution`] is in its generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial population generated, nothing evaluated yet.
    Initializing,
    /// Decoding and scoring the current population.
    Evaluating,
    /// Offering every individual to the best-so-far record.
    TrackingBest,
    /// Building the mating pool.
    Selecting,
    /// Crossing the mating pool over.
    Recombining,
    /// Mutating the children into the next population.
    Mutating,
    /// All generations evaluated.
    Terminating,
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index; generation 0 is the random population.
    pub generation: usize,

    /// Best fitness within this generation (NaN if every fitness was NaN).
    pub best_fitness: f64,

    /// Mean fitness of this generation.
    pub mean_fitness: f64,

    /// Best fitness seen in this and all earlier generations.
    pub best_so_far_fitness: f64,
}

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The fittest individual observed during the whole run.
    ///
    /// `None` when no generation was evaluated or no fitness ever exceeded
    /// negative infinity.
    pub best: Option<Solution>,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Best-so-far fitness after each generation. Never decreases.
    pub fitness_history: Vec<f64>,
}

impl GaResult {
    /// Fitness of [`best`](Self::best), `f64::NEG_INFINITY` if there is none.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(f64::NEG_INFINITY, |s| s.fitness)
    }
}

/// A single GA run, advanced one generation at a time.
///
/// Owns the current population, the best-so-far record, and the random
/// source. Each [`step`](Self::step) evaluates the current population,
/// updates the record, and (unless it was the last generation) replaces the
/// population with its selected, crossed-over, and mutated offspring.
///
/// # Usage
///
/// ```
/// use bitga::ga::{Evolution, GaConfig, Phase};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let config = GaConfig::new(1.0, 16.0, 1.0).with_generations(3);
/// let objective = |x: f64| x.sqrt();
/// let mut evolution = Evolution::new(&config, &objective, StdRng::seed_from_u64(7)).unwrap();
///
/// while let Some(stats) = evolution.step().unwrap() {
///     assert!(stats.best_so_far_fitness >= stats.best_fitness);
/// }
/// assert_eq!(evolution.phase(), Phase::Terminating);
/// assert_eq!(evolution.generation(), 3);
/// ```
pub struct Evolution<'a, O: ?Sized, R> {
    objective: &'a O,
    domain: Domain,
    selection: Tournament,
    mutation_rate: f64,
    generations: usize,
    rng: R,
    population: Population,
    best: BestSoFar,
    generation: usize,
    phase: Phase,
    fitness_history: Vec<f64>,
}

impl<'a, O, R> Evolution<'a, O, R>
where
    O: Objective + ?Sized,
    R: Rng,
{
    /// Validates `config` and draws the initial population from `rng`.
    pub fn new(config: &GaConfig, objective: &'a O, mut rng: R) -> Result<Self> {
        config.validate()?;
        let domain = config.domain()?;
        let population = random_population(domain.bits(), config.population_size, &mut rng)?;

        Ok(Self {
            objective,
            domain,
            selection: config.selection,
            mutation_rate: config.mutation_rate,
            generations: config.generations,
            rng,
            population,
            best: BestSoFar::new(),
            generation: 0,
            phase: if config.generations == 0 {
                Phase::Terminating
            } else {
                Phase::Initializing
            },
            fitness_history: Vec::with_capacity(config.generations),
        })
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of generations evaluated so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The population the next [`step`](Self::step) will evaluate.
    pub fn population(&self) -> &[BitString] {
        &self.population
    }

    /// The best-so-far record.
    pub fn best(&self) -> &BestSoFar {
        &self.best
    }

    /// The search domain.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Whether every generation has been evaluated.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Terminating
    }

    /// Runs one generation.
    ///
    /// Returns `Ok(None)` once the run has terminated. The last generation
    /// is evaluated and tracked but not reproduced.
    pub fn step(&mut self) -> Result<Option<GenerationStats>> {
        if self.is_finished() {
            return Ok(None);
        }

        self.phase = Phase::Evaluating;
        let evaluation = evaluate(self.objective, &self.domain, &self.population)?;

        self.phase = Phase::TrackingBest;
        let individuals = evaluation.values.iter().zip(&evaluation.fitness);
        for ((&value, &fitness), bits) in individuals.zip(&self.population) {
            if self.best.offer(value, fitness, bits) {
                trace!(generation = self.generation, value, fitness, bits = %bits, "new best");
            }
        }

        let stats = GenerationStats {
            generation: self.generation,
            best_fitness: evaluation
                .best_index()
                .map_or(f64::NAN, |i| evaluation.fitness[i]),
            mean_fitness: evaluation.mean_fitness(),
            best_so_far_fitness: self.best.fitness(),
        };
        debug!(
            generation = stats.generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            best_so_far = stats.best_so_far_fitness,
            "generation evaluated"
        );
        self.fitness_history.push(stats.best_so_far_fitness);
        self.objective.on_generation(&stats);
        self.generation += 1;

        if self.generation >= self.generations {
            self.phase = Phase::Terminating;
            return Ok(Some(stats));
        }

        self.phase = Phase::Selecting;
        let pool = self
            .selection
            .select(&self.population, &evaluation.fitness, &mut self.rng)?;

        self.phase = Phase::Recombining;
        let children = single_point_crossover(&pool, &mut self.rng)?;

        self.phase = Phase::Mutating;
        self.population = bit_flip_mutation(&children, self.mutation_rate, &mut self.rng)?;

        self.phase = Phase::Evaluating;
        Ok(Some(stats))
    }

    /// Steps until termination and returns the result.
    pub fn run(mut self) -> Result<GaResult> {
        while self.step()?.is_some() {}
        Ok(self.finish())
    }

    /// Ends the run, returning what has been observed so far.
    pub fn finish(self) -> GaResult {
        GaResult {
            best: self.best.into_solution(),
            generations: self.generation,
            fitness_history: self.fitness_history,
        }
    }
}

/// Executes a complete GA run.
///
/// # Usage
///
/// ```
/// use bitga::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::new(1.0, 16.0, 1.0).with_seed(42);
/// let result = GaRunner::run(&f64::sqrt, &config).unwrap();
/// let best = result.best.unwrap();
/// assert!(best.value >= 1.0 && best.value <= 16.0);
/// assert_eq!(best.bits.len(), 4);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a [`StdRng`] seeded from `config.seed`, or from a
    /// random seed when none is set.
    ///
    /// # Errors
    /// Any [`GaError`](crate::GaError) from [`GaConfig::validate`].
    pub fn run<O: Objective + ?Sized>(objective: &O, config: &GaConfig) -> Result<GaResult> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::run_with_rng(objective, config, StdRng::seed_from_u64(seed))
    }

    /// Runs the GA drawing all randomness from `rng`.
    pub fn run_with_rng<O: Objective + ?Sized, R: Rng>(
        objective: &O,
        config: &GaConfig,
        rng: R,
    ) -> Result<GaResult> {
        let evolution = Evolution::new(config, objective, rng)?;
        info!(
            bits = evolution.domain().bits(),
            population = config.population_size,
            generations = config.generations,
            "starting GA run"
        );

        let result = evolution.run()?;
        match &result.best {
            Some(best) => info!(
                value = best.value,
                fitness = best.fitness,
                bits = %best.bits,
                generations = result.generations,
                "GA run finished"
            ),
            None => info!(generations = result.generations, "GA run finished without a solution"),
        }
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaError;
    use crate::ga::Sampling;
    use std::cell::RefCell;

    fn reference_config() -> GaConfig {
        GaConfig::new(1.0, 16.0, 1.0)
            .with_population_size(6)
            .with_generations(20)
            .with_seed(42)
    }

    // ---- Reference scenario: maximize sqrt(x) on [1, 16] ----

    #[test]
    fn test_sqrt_reference_run() {
        let config = reference_config();
        let objective = f64::sqrt;

        let initial = Evolution::new(&config, &objective, StdRng::seed_from_u64(42))
            .unwrap()
            .population()
            .to_vec();
        let domain = config.domain().unwrap();
        let initial_best = initial
            .iter()
            .map(|ind| domain.decode(ind).unwrap().sqrt())
            .fold(f64::NEG_INFINITY, f64::max);

        let result = GaRunner::run(&objective, &config).unwrap();
        let best = result.best.clone().unwrap();

        assert_eq!(result.generations, 20);
        assert_eq!(result.fitness_history.len(), 20);
        assert!(best.fitness >= initial_best);
        assert_eq!(best.bits.len(), 4);
        assert_eq!(domain.decode(&best.bits).unwrap(), best.value);
        assert_eq!(best.fitness, best.value.sqrt());
        assert!((1.0..=16.0).contains(&best.value));
    }

    #[test]
    fn test_best_so_far_is_monotone() {
        for seed in 0..20 {
            let config = GaConfig::new(-4.0, 4.0, 1e-3)
                .with_population_size(10)
                .with_generations(30)
                .with_mutation_rate(0.1)
                .with_seed(seed);
            let result = GaRunner::run(&|x: f64| (3.0 * x).sin() - 0.1 * x * x, &config).unwrap();

            for window in result.fitness_history.windows(2) {
                assert!(
                    window[1] >= window[0],
                    "best-so-far decreased: {} -> {}",
                    window[0],
                    window[1]
                );
            }
            assert_eq!(result.best_fitness(), *result.fitness_history.last().unwrap());
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = reference_config().with_generations(15);
        let a = GaRunner::run(&f64::sqrt, &config).unwrap();
        let b = GaRunner::run(&f64::sqrt, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_finds_interior_maximum() {
        let config = GaConfig::new(0.0, 10.0, 1e-3)
            .with_population_size(30)
            .with_generations(60)
            .with_seed(42);
        let result = GaRunner::run(&|x: f64| -(x - 3.0).powi(2), &config).unwrap();
        let best = result.best.unwrap();
        assert!(
            (best.value - 3.0).abs() < 0.5,
            "expected x near 3.0, got {}",
            best.value
        );
    }

    #[test]
    fn test_full_tournament_without_replacement() {
        let config = GaConfig::new(0.0, 1.0, 1e-3)
            .with_population_size(8)
            .with_generations(10)
            .with_tournament_size(8)
            .with_sampling(Sampling::WithoutReplacement)
            .with_mutation_rate(0.0)
            .with_seed(5);
        let objective = |x: f64| x;
        let mut evolution = Evolution::new(&config, &objective, StdRng::seed_from_u64(5)).unwrap();
        evolution.step().unwrap();

        // Every slot copied the same winner and crossover of identical
        // parents is the identity.
        let next = evolution.population();
        assert!(next.iter().all(|ind| *ind == next[0]));
        assert_eq!(next[0], evolution.best().solution().unwrap().bits);
    }

    // ---- State machine ----

    #[test]
    fn test_phases() {
        let config = reference_config().with_generations(2);
        let objective = f64::sqrt;
        let mut evolution = Evolution::new(&config, &objective, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(evolution.phase(), Phase::Initializing);

        let first = evolution.step().unwrap().unwrap();
        assert_eq!(first.generation, 0);
        assert_eq!(evolution.phase(), Phase::Evaluating);
        assert_eq!(evolution.population().len(), 6);

        let second = evolution.step().unwrap().unwrap();
        assert_eq!(second.generation, 1);
        assert!(evolution.is_finished());
        assert!(evolution.step().unwrap().is_none());
        assert_eq!(evolution.generation(), 2);
    }

    #[test]
    fn test_last_generation_is_not_reproduced() {
        let config = reference_config().with_generations(1);
        let objective = f64::sqrt;
        let mut evolution = Evolution::new(&config, &objective, StdRng::seed_from_u64(9)).unwrap();
        let before = evolution.population().to_vec();
        evolution.step().unwrap();
        assert_eq!(evolution.population(), before.as_slice());
    }

    #[test]
    fn test_zero_generations() {
        let config = reference_config().with_generations(0);
        let result = GaRunner::run(&f64::sqrt, &config).unwrap();
        assert!(result.best.is_none());
        assert_eq!(result.generations, 0);
        assert!(result.fitness_history.is_empty());
        assert_eq!(result.best_fitness(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_objective_has_no_best() {
        let result = GaRunner::run(&|_: f64| f64::NAN, &reference_config()).unwrap();
        assert!(result.best.is_none());
        assert_eq!(result.generations, 20);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = reference_config().with_population_size(5);
        assert_eq!(
            GaRunner::run(&f64::sqrt, &config),
            Err(GaError::OddPoolSize { size: 5 })
        );

        let config = GaConfig::new(3.0, 3.0, 0.1);
        assert!(matches!(
            GaRunner::run(&f64::sqrt, &config),
            Err(GaError::InvalidDomain { .. })
        ));
    }

    // ---- Objective hook ----

    struct Recording {
        seen: RefCell<Vec<GenerationStats>>,
    }

    impl Objective for Recording {
        fn fitness(&self, x: f64) -> f64 {
            x
        }

        fn on_generation(&self, stats: &GenerationStats) {
            self.seen.borrow_mut().push(stats.clone());
        }
    }

    #[test]
    fn test_on_generation_hook() {
        let objective = Recording {
            seen: RefCell::new(Vec::new()),
        };
        let result = GaRunner::run(&objective, &reference_config()).unwrap();

        let seen = objective.seen.borrow();
        assert_eq!(seen.len(), 20);
        for (i, stats) in seen.iter().enumerate() {
            assert_eq!(stats.generation, i);
            assert_eq!(stats.best_so_far_fitness, result.fitness_history[i]);
            assert!(stats.best_fitness <= stats.best_so_far_fitness);
            assert!(stats.mean_fitness <= stats.best_fitness + 1e-9);
        }
    }

    #[test]
    fn test_run_emits_tracing_events() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
        let result = GaRunner::run(&f64::sqrt, &reference_config().with_generations(3)).unwrap();
        assert_eq!(result.generations, 3);
    }
}

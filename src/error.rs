//! Error taxonomy for the binary GA.
//!
//! Every variant is a precondition violation on in-memory computation.
//! Errors are returned at the point of the violated precondition and are
//! never retried or swallowed inside the crate.

/// Errors raised by encoding, the genetic operators, and the runner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// The search interval is empty or not a number (`xmax <= xmin`).
    #[error("invalid domain: xmax ({xmax}) must be greater than xmin ({xmin})")]
    InvalidDomain { xmin: f64, xmax: f64 },

    /// The requested precision is not strictly positive.
    #[error("invalid precision: error ({error}) must be greater than 0")]
    InvalidPrecision { error: f64 },

    /// A bit-string length outside the representable range.
    #[error("invalid bit length {length}: at most {max} bits are supported")]
    InvalidLength { length: f64, max: usize },

    /// A bit string whose length differs from the expected width.
    #[error("length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Individuals too short to be split by crossover.
    #[error("invalid individual length {length}: crossover needs at least 2 bits")]
    InvalidIndividualLength { length: usize },

    /// A character other than `'0'` or `'1'` in a textual bit string.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Population and fitness pool are not aligned.
    #[error("size mismatch: population has {population} individuals, fitness pool has {fitness}")]
    SizeMismatch { population: usize, fitness: usize },

    /// Pairwise crossover needs an even number of individuals.
    #[error("odd pool size {size}: pairwise crossover needs an even pool")]
    OddPoolSize { size: usize },

    /// A probability outside `[0, 1]`.
    #[error("invalid probability {probability}: must lie in [0, 1]")]
    InvalidProbability { probability: f64 },

    /// A tournament that cannot be drawn from the population.
    #[error("invalid tournament size {size} for a population of {population}")]
    InvalidTournamentSize { size: usize, population: usize },

    /// An empty population.
    #[error("invalid population size {size}: must be positive")]
    InvalidPopulationSize { size: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;

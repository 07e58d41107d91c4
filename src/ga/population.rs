//! Random initial populations.

use super::types::{BitString, Population};
use crate::encoding::MAX_BITS;
use crate::error::{GaError, Result};
use rand::Rng;

/// Generates `len` independent fair bits.
///
/// # Errors
/// [`GaError::InvalidLength`] if `len` exceeds [`MAX_BITS`].
pub fn random_individual<R: Rng>(len: usize, rng: &mut R) -> Result<BitString> {
    if len > MAX_BITS {
        return Err(GaError::InvalidLength {
            length: len as f64,
            max: MAX_BITS,
        });
    }
    Ok((0..len).map(|_| rng.random_bool(0.5)).collect())
}

/// Generates `size` independent random individuals of `len` bits.
pub fn random_population<R: Rng>(len: usize, size: usize, rng: &mut R) -> Result<Population> {
    (0..size).map(|_| random_individual(len, rng)).collect()
}

//! Real-interval ↔ bit-string encoding.
//!
//! A point of `[xmin, xmax]` is represented by an `L`-bit unsigned integer
//! `v`, most significant bit first, mapped linearly onto the interval:
//!
//! ```text
//! x = xmin + v · (xmax − xmin) / (2^L − 1)
//! ```
//!
//! `L` is the smallest width whose step size does not exceed the requested
//! precision: `L = ⌈log2((xmax − xmin) / error)⌉`.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3 (multiparameter mapped fixed-point coding)

use crate::error::{GaError, Result};
use crate::ga::BitString;

/// Largest supported width: `2^L − 1` is still a finite `f64`.
pub const MAX_BITS: usize = 1023;

/// Number of bits needed to resolve `[xmin, xmax]` to within `error`.
///
/// Returns `0` when the interval is no wider than `error`; such a domain
/// has a single representable point (see [`decode`]).
///
/// # Errors
/// - [`GaError::InvalidDomain`] unless `xmin` and `xmax` are finite and
///   `xmax > xmin`
/// - [`GaError::InvalidPrecision`] unless `error > 0`
/// - [`GaError::InvalidLength`] if more than [`MAX_BITS`] bits are needed
///
/// # Examples
///
/// ```
/// use bitga::encoding::bit_length;
///
/// assert_eq!(bit_length(1.0, 16.0, 1.0).unwrap(), 4);
/// assert_eq!(bit_length(0.0, 1.0, 0.001).unwrap(), 10);
/// ```
pub fn bit_length(xmin: f64, xmax: f64, error: f64) -> Result<usize> {
    check_domain(xmin, xmax)?;
    if !(error > 0.0) {
        return Err(GaError::InvalidPrecision { error });
    }

    let ratio = (xmax - xmin) / error;
    if ratio <= 1.0 {
        return Ok(0);
    }

    let length = ratio.log2().ceil();
    if !length.is_finite() || length > MAX_BITS as f64 {
        return Err(GaError::InvalidLength {
            length,
            max: MAX_BITS,
        });
    }
    Ok(length as usize)
}

/// Decodes `bits` into a point of `[xmin, xmax]`.
///
/// The all-zero string maps to `xmin`, the all-one string to `xmax`, and the
/// mapping is non-decreasing in the integer value of the string. A
/// zero-width string (`len == 0`) decodes to `xmin`.
///
/// # Errors
/// - [`GaError::LengthMismatch`] if `bits.len() != len`
/// - [`GaError::InvalidLength`] if `len` exceeds [`MAX_BITS`]
pub fn decode(xmin: f64, xmax: f64, len: usize, bits: &[bool]) -> Result<f64> {
    if bits.len() != len {
        return Err(GaError::LengthMismatch {
            expected: len,
            actual: bits.len(),
        });
    }
    if len > MAX_BITS {
        return Err(GaError::InvalidLength {
            length: len as f64,
            max: MAX_BITS,
        });
    }
    if len == 0 {
        return Ok(xmin);
    }

    let value = bits
        .iter()
        .fold(0.0_f64, |acc, &bit| acc * 2.0 + if bit { 1.0 } else { 0.0 });
    let levels = 2.0_f64.powi(len as i32) - 1.0;

    let t = value / levels;
    if t >= 1.0 {
        return Ok(xmax);
    }
    // xmin + (xmax - xmin) can round past xmax.
    Ok((xmin + (xmax - xmin) * t).min(xmax))
}

/// Decodes a textual bit string such as `"0110"`.
///
/// # Errors
/// - [`GaError::LengthMismatch`] if the string does not have `len` characters
/// - [`GaError::InvalidSymbol`] for any character other than `'0'` / `'1'`
///
/// # Examples
///
/// ```
/// use bitga::encoding::decode_str;
///
/// assert_eq!(decode_str(1.0, 16.0, 4, "0000").unwrap(), 1.0);
/// assert_eq!(decode_str(1.0, 16.0, 4, "1111").unwrap(), 16.0);
/// ```
pub fn decode_str(xmin: f64, xmax: f64, len: usize, text: &str) -> Result<f64> {
    let actual = text.chars().count();
    if actual != len {
        return Err(GaError::LengthMismatch {
            expected: len,
            actual,
        });
    }
    let bits: BitString = text.parse()?;
    decode(xmin, xmax, len, bits.bits())
}

fn check_domain(xmin: f64, xmax: f64) -> Result<()> {
    if xmin.is_finite() && xmax.is_finite() && xmax > xmin {
        Ok(())
    } else {
        Err(GaError::InvalidDomain { xmin, xmax })
    }
}

/// A validated search interval together with its bit width.
///
/// # Examples
///
/// ```
/// use bitga::encoding::Domain;
/// use bitga::ga::BitString;
///
/// let domain = Domain::new(1.0, 16.0, 1.0).unwrap();
/// assert_eq!(domain.bits(), 4);
/// assert_eq!(domain.decode(&BitString::ones(4)).unwrap(), 16.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    xmin: f64,
    xmax: f64,
    error: f64,
    bits: usize,
}

impl Domain {
    /// Validates the interval and derives its bit width.
    pub fn new(xmin: f64, xmax: f64, error: f64) -> Result<Self> {
        let bits = bit_length(xmin, xmax, error)?;
        Ok(Self {
            xmin,
            xmax,
            error,
            bits,
        })
    }

    /// Lower bound.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Upper bound.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Requested precision.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Bit width `L` of every individual in this domain.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Distance between adjacent decoded points, `0.0` when `L == 0`.
    ///
    /// Never larger than [`error`](Self::error).
    pub fn resolution(&self) -> f64 {
        if self.bits == 0 {
            0.0
        } else {
            (self.xmax - self.xmin) / (2.0_f64.powi(self.bits as i32) - 1.0)
        }
    }

    /// Decodes an individual of this domain.
    pub fn decode(&self, bits: &BitString) -> Result<f64> {
        decode(self.xmin, self.xmax, self.bits, bits.bits())
    }
}

//! Precision parameter of the estimator.
//!
//! Precision `p` defines the number of hash bits used as a register index, so the
//! estimator holds `m = 2^p` one-byte registers. Valid precisions are in `[4..16]`:
//! - `p = 4`:  16 registers,    expected error 1.04 / sqrt(2^4)  = 26.00%
//! - `p = 10`: 1024 registers,  expected error 1.04 / sqrt(2^10) = 3.25%
//! - `p = 12`: 4096 registers,  expected error 1.04 / sqrt(2^12) = 1.62%
//! - `p = 14`: 16384 registers, expected error 1.04 / sqrt(2^14) = 0.81%
//! - `p = 16`: 65536 registers, expected error 1.04 / sqrt(2^16) = 0.41%
use std::collections::TryReserveError;
use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Errors returned when an estimator cannot be constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Precision is outside of the supported `[4..16]` range.
    #[error("precision {precision} is out of range [{}..{}]", Precision::MIN, Precision::MAX)]
    PrecisionOutOfRange { precision: u8 },
    /// Register array could not be allocated.
    #[error("failed to allocate {registers} registers")]
    Allocation {
        registers: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Validated number of hash bits used for register indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u8);

impl Precision {
    /// Smallest supported precision
    pub const MIN: u8 = 4;
    /// Largest supported precision
    pub const MAX: u8 = 16;
    /// Precision used by `Default`
    pub const DEFAULT: Precision = Precision(12);

    /// Creates a new precision, failing when `p` is outside of `[MIN..MAX]`.
    #[inline]
    pub fn new(p: u8) -> Result<Self, ConfigError> {
        if (Self::MIN..=Self::MAX).contains(&p) {
            Ok(Self(p))
        } else {
            Err(ConfigError::PrecisionOutOfRange { precision: p })
        }
    }

    /// Number of hash bits used for register indices
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Number of registers `m = 2^p`
    #[inline]
    pub const fn registers(self) -> usize {
        1 << self.0
    }

    /// Width of the hash window remaining after the index bits are removed.
    #[inline]
    pub fn rank_bits(self) -> u32 {
        128 - u32::from(self.0)
    }

    /// Largest rank a register may hold: `rank_bits + 1`.
    #[inline]
    pub fn max_rank(self) -> u8 {
        // fits: rank_bits is at most 124
        (self.rank_bits() + 1) as u8
    }

    /// Expected relative standard error of estimates, `1.04 / sqrt(m)`.
    #[inline]
    pub fn standard_error(self) -> f64 {
        1.04 / (self.registers() as f64).sqrt()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Precision {
    type Error = ConfigError;

    fn try_from(p: u8) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl From<Precision> for u8 {
    fn from(p: Precision) -> Self {
        p.0
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

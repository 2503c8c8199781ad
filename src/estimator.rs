//! Cardinality estimator allows to estimate number of distinct elements
//! in the stream or dataset and is defined by its precision parameter `P`:
//! - `P`: precision in [4..16] range, which defines number of hash bits
//!   used for HyperLogLog register indices (`M = 2^P` registers).
//!
//! # Data-structure design rationale
//!
//! ## Bounded memory footprint
//! Memory is allocated once at construction and never grows:
//! `M` one-byte registers plus the fixed-size estimator struct.
//! - P = 4:  16 bytes of registers
//! - P = 10: 1 KiB of registers
//! - P = 12: 4 KiB of registers
//! - P = 16: 64 KiB of registers
//!
//! ## Byte-oriented input
//! Estimator consumes raw byte slices. Callers convert their values to bytes
//! (e.g. `u32::to_le_bytes`), and the estimator never interprets them beyond
//! their content and length.
//!
//! ## Reproducibility
//! Hashing uses 128-bit SipHash-1-3 with a fixed all-zero key, so identical input
//! sequences produce identical registers and estimates across runs.
//!
//! ## Accuracy
//! - For small cardinality (raw estimate <= 2.5 * M with empty registers left)
//!   linear counting over empty registers is used.
//! - Otherwise the raw HyperLogLog harmonic-mean estimate is returned.
//!   - Expected error:
//!     P = 10: 1.04 / sqrt(2^10) = 3.25%
//!     P = 12: 1.04 / sqrt(2^12) = 1.62%
//!     P = 14: 1.04 / sqrt(2^14) = 0.81%
//!     P = 16: 1.04 / sqrt(2^16) = 0.41%

use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use tracing::debug;

use crate::hash::{hash_bytes, index_and_rank};
use crate::hyperloglog::HyperLogLog;
use crate::precision::{ConfigError, Precision};

/// HyperLogLog cardinality estimator over byte slices.
#[derive(PartialEq)]
pub struct CardinalityEstimator {
    hll: HyperLogLog,
}

impl CardinalityEstimator {
    /// Creates new instance of `CardinalityEstimator` with `precision` in [4..16] range.
    #[inline]
    pub fn new(precision: u8) -> Result<Self, ConfigError> {
        Self::with_precision(Precision::new(precision)?)
    }

    /// Creates new instance of `CardinalityEstimator` with validated `precision`.
    pub fn with_precision(precision: Precision) -> Result<Self, ConfigError> {
        let hll = HyperLogLog::new(precision)?;
        debug!(
            precision = precision.bits(),
            registers = precision.registers(),
            "created cardinality estimator"
        );
        Ok(Self { hll })
    }

    /// Insert raw bytes of a value into `CardinalityEstimator`
    #[inline]
    pub fn insert(&mut self, bytes: &[u8]) {
        self.insert_hash(hash_bytes(bytes));
    }

    /// Insert hash into `CardinalityEstimator`
    ///
    /// `hash` must be produced by [`hash_bytes`](crate::hash::hash_bytes), otherwise
    /// estimates of values inserted through [`insert`](Self::insert) become meaningless.
    #[inline]
    pub fn insert_hash(&mut self, hash: u128) {
        let (idx, rank) = index_and_rank(hash, self.hll.precision());
        self.hll.update_rank(idx, rank);
    }

    /// Return cardinality estimate
    #[inline]
    pub fn estimate(&self) -> f64 {
        self.hll.estimate()
    }

    /// Return precision of `CardinalityEstimator`
    #[inline]
    pub fn precision(&self) -> Precision {
        self.hll.precision()
    }

    /// Return HyperLogLog registers
    #[inline]
    pub fn registers(&self) -> &[u8] {
        self.hll.registers()
    }

    /// Return number of registers set to 0
    #[inline]
    pub fn zero_registers(&self) -> usize {
        self.hll.zeros()
    }

    /// Copy `CardinalityEstimator` into a newly allocated register array
    pub fn try_clone(&self) -> Result<Self, ConfigError> {
        Ok(Self {
            hll: self.hll.try_clone()?,
        })
    }

    /// Reset `CardinalityEstimator` to its empty state
    pub fn clear(&mut self) {
        self.hll.clear();
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.hll.registers().len()
    }
}

impl Debug for CardinalityEstimator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, registers: {}, estimate: {:.0} }}",
            self.precision(),
            self.registers().len(),
            self.estimate()
        )
    }
}

//! ## HyperLogLog registers
//! Holds `M = 2^P` one-byte registers, each storing the maximum rank observed for
//! hashes mapped to that register. Registers are only ever increased.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! Estimation uses the raw harmonic-mean formula `alpha * M^2 / sum(2^-register)`,
//! replaced by linear counting `M * ln(M / zeros)` while the raw estimate is at most
//! `2.5 * M` and at least one register is still zero. No large range correction is applied.
//!
//! Number of zero registers is maintained on every update, so the small range branch
//! never scans the registers a second time.

use crate::precision::{ConfigError, Precision};

#[derive(PartialEq)]
pub(crate) struct HyperLogLog {
    precision: Precision,
    registers: Vec<u8>,
    /// Number of registers still set to 0
    zeros: usize,
}

impl HyperLogLog {
    /// Allocate `M` zeroed registers, reporting allocation failure instead of aborting.
    pub(crate) fn new(precision: Precision) -> Result<Self, ConfigError> {
        let m = precision.registers();
        let mut registers = alloc_registers(m)?;
        registers.resize(m, 0);

        Ok(Self {
            precision,
            registers,
            zeros: m,
        })
    }

    /// Copy registers into a newly allocated `HyperLogLog`.
    pub(crate) fn try_clone(&self) -> Result<Self, ConfigError> {
        let mut registers = alloc_registers(self.registers.len())?;
        registers.extend_from_slice(&self.registers);

        Ok(Self {
            precision: self.precision,
            registers,
            zeros: self.zeros,
        })
    }

    #[inline]
    pub(crate) fn precision(&self) -> Precision {
        self.precision
    }

    #[inline]
    pub(crate) fn registers(&self) -> &[u8] {
        &self.registers
    }

    #[inline]
    pub(crate) fn zeros(&self) -> usize {
        self.zeros
    }

    /// Set register `idx` to `new_rank` if it is greater than the stored rank.
    #[inline]
    pub(crate) fn update_rank(&mut self, idx: usize, new_rank: u8) {
        debug_assert!(new_rank <= self.precision.max_rank());
        let old_rank = self.registers[idx];
        if new_rank > old_rank {
            self.registers[idx] = new_rank;
            self.zeros -= usize::from(old_rank == 0);
        }
    }

    /// Reset all registers to zero, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.registers.fill(0);
        self.zeros = self.registers.len();
    }

    /// Return harmonic-mean estimate without small range correction
    #[inline]
    pub(crate) fn raw_estimate(&self) -> f64 {
        let m = self.registers.len() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| 2f64.powi(-i32::from(r)))
            .sum();
        alpha(self.registers.len()) * m * m / sum
    }

    /// Return cardinality estimate
    #[inline]
    pub(crate) fn estimate(&self) -> f64 {
        let m = self.registers.len() as f64;
        let estimate = self.raw_estimate();
        if estimate <= 2.5 * m && self.zeros > 0 {
            linear_counting(m, self.zeros as f64)
        } else {
            estimate
        }
    }
}

/// Reserve exactly `m` bytes of register storage
fn alloc_registers(m: usize) -> Result<Vec<u8>, ConfigError> {
    let mut registers = Vec::new();
    registers
        .try_reserve_exact(m)
        .map_err(|source| ConfigError::Allocation {
            registers: m,
            source,
        })?;
    Ok(registers)
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Linear counting estimate for `m` registers of which `zeros` are empty
#[inline]
fn linear_counting(m: f64, zeros: f64) -> f64 {
    m * (m / zeros).ln()
}

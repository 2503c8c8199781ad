//! `sip-hyperloglog` is a Rust crate designed to estimate the number of distinct elements in a stream
//! of byte strings using memory bounded by its precision parameter.
//!
//! This library uses HyperLogLog over a fixed-key 128-bit SipHash with linear counting correction
//! for small cardinalities.
//!
//! ```
//! use sip_hyperloglog::CardinalityEstimator;
//!
//! let mut estimator = CardinalityEstimator::new(12)?;
//! for i in 0u32..1000 {
//!     estimator.insert(&i.to_le_bytes());
//! }
//! assert!((estimator.estimate() - 1000.0).abs() < 100.0);
//! # Ok::<(), sip_hyperloglog::ConfigError>(())
//! ```
pub mod estimator;
pub mod hash;
mod hyperloglog;
pub mod precision;

pub use estimator::CardinalityEstimator;
pub use precision::{ConfigError, Precision};

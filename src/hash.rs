//! Hash mapping from raw bytes to HyperLogLog register index and rank.
//!
//! Every value is hashed with 128-bit SipHash-1-3 under a fixed key, then split:
//! - low `P` bits      - register index in `[0..M)`
//! - high `128 - P` bits - rank window, whose leftmost set bit defines the rank
//!
//! Rank is the 1-based position of the leftmost set bit inside the window, so a
//! uniformly distributed hash gets rank `k` with probability `2^-k`.
use std::hash::Hasher;

use siphasher::sip128::{Hasher128, SipHasher13};

use crate::precision::Precision;

/// SipHash key halves. The key is all zeros and never changes at runtime, which keeps
/// register state reproducible for identical input sequences across runs and processes.
pub const HASH_KEYS: (u64, u64) = (0, 0);

/// Hash `bytes` into a uniformly distributed 128-bit value.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u128 {
    let mut hasher = SipHasher13::new_with_keys(HASH_KEYS.0, HASH_KEYS.1);
    hasher.write(bytes);
    hasher.finish128().as_u128()
}

/// Split `hash` into register index (low `P` bits) and the remaining `128 - P` bits.
#[inline]
pub(crate) fn split(hash: u128, precision: Precision) -> (usize, u128) {
    let p = u32::from(precision.bits());
    let idx = (hash & ((1u128 << p) - 1)) as usize;
    (idx, hash >> p)
}

/// Rank of `remaining` counted inside its `rank_bits`-wide window.
///
/// `remaining` is expected to fit in `rank_bits` bits (as produced by [`split`]), so the
/// top `128 - rank_bits` bits of the `u128` are zero and are excluded from the count.
/// An all-zero window returns `rank_bits + 1`.
#[inline]
pub(crate) fn rho(remaining: u128, rank_bits: u32) -> u8 {
    debug_assert!(rank_bits < 128 && remaining >> rank_bits == 0);
    if remaining == 0 {
        return (rank_bits + 1) as u8;
    }
    let window_leading_zeros = remaining.leading_zeros() - (128 - rank_bits);
    (window_leading_zeros + 1) as u8
}

/// Return register index and rank for `hash` under `precision`.
#[inline]
pub(crate) fn index_and_rank(hash: u128, precision: Precision) -> (usize, u8) {
    let (idx, remaining) = split(hash, precision);
    (idx, rho(remaining, precision.rank_bits()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    // p = 4 gives a 124-bit window occupying bits 0..=123
    #[test_case(1 << 123, 124 => 1; "top window bit")]
    #[test_case(1 << 122, 124 => 2; "second window bit")]
    #[test_case((1 << 123) | 1, 124 => 1; "low bits ignored")]
    #[test_case(1, 124 => 124; "lowest window bit")]
    #[test_case(0, 124 => 125; "empty window")]
    // p = 10 gives a 118-bit window, not aligned to a byte boundary
    #[test_case(1 << 117, 118 => 1; "unaligned top window bit")]
    #[test_case(1 << 100, 118 => 18; "unaligned middle window bit")]
    #[test_case(1, 118 => 118; "unaligned lowest window bit")]
    #[test_case(0, 118 => 119; "unaligned empty window")]
    // p = 16 gives a 112-bit window
    #[test_case(1 << 111, 112 => 1; "p16 top window bit")]
    #[test_case(0, 112 => 113; "p16 empty window")]
    fn test_rho(remaining: u128, rank_bits: u32) -> u8 {
        rho(remaining, rank_bits)
    }

    #[test]
    fn test_split() {
        let p = Precision::new(8).unwrap();
        let hash = (0xABCD_u128 << 8) | 0x7F;
        assert_eq!(split(hash, p), (0x7F, 0xABCD));

        let (idx, remaining) = split(u128::MAX, p);
        assert_eq!(idx, 255);
        assert_eq!(remaining, u128::MAX >> 8);
        assert_eq!(rho(remaining, p.rank_bits()), 1);
    }

    #[test_case(4)]
    #[test_case(7)]
    #[test_case(12)]
    #[test_case(16)]
    fn test_index_and_rank_bounds(p: u8) {
        let precision = Precision::new(p).unwrap();
        for i in 0u32..10_000 {
            let (idx, rank) = index_and_rank(hash_bytes(&i.to_le_bytes()), precision);
            assert!(idx < precision.registers());
            assert!((1..=precision.max_rank()).contains(&rank));
        }
        assert_eq!(index_and_rank(0, precision), (0, precision.max_rank()));
    }

    #[test]
    fn test_hash_bytes() {
        assert_eq!(hash_bytes(b"test item 1"), hash_bytes(b"test item 1"));
        assert_ne!(hash_bytes(b"test item 1"), hash_bytes(b"test item 2"));
        assert_ne!(hash_bytes(&1u32.to_le_bytes()), hash_bytes(&1u64.to_le_bytes()));
        assert_ne!(hash_bytes(&[]), hash_bytes(&[0]));
    }

    #[test]
    fn test_hash_index_distribution() {
        // sequential integers must spread over all 16 registers
        let precision = Precision::new(4).unwrap();
        let mut seen = [0usize; 16];
        for i in 0u32..1600 {
            let (idx, _) = index_and_rank(hash_bytes(&i.to_le_bytes()), precision);
            seen[idx] += 1;
        }
        assert!(seen.iter().all(|&n| n > 50 && n < 150), "{seen:?}");
    }
}

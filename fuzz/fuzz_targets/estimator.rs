#![no_main]

use libfuzzer_sys::fuzz_target;
use sip_hyperloglog::{CardinalityEstimator, Precision};
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // derive both precision and chunk size from the input itself
    let seed = wyhash(data, 0);
    let precision = Precision::MIN + (seed % u64::from(Precision::MAX - Precision::MIN + 1)) as u8;
    let chunk_size = 1 + (seed >> 8) as usize % 8;

    let mut estimator = CardinalityEstimator::new(precision).unwrap();
    let max_rank = estimator.precision().max_rank();
    for chunk in data.chunks(chunk_size) {
        estimator.insert(chunk);
        let estimate = estimator.estimate();
        assert!(estimate.is_finite() && estimate > 0.0);
    }
    assert!(estimator.registers().iter().all(|&r| r <= max_rank));

    let registers = estimator.registers().to_vec();
    for chunk in data.chunks(chunk_size) {
        estimator.insert(chunk);
    }
    assert_eq!(estimator.registers(), registers.as_slice());
});

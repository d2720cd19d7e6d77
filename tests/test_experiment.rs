//! Tests for the error-injection experiment
//!
//! Covers reproducibility by seed, independence from the thread count and the
//! expected shape of the success-rate curve.

use rscoder::experiment::{run_experiment, ExperimentConfig};
use rscoder::reporters::SilentExperimentReporter;
use rscoder::{GaloisField, ReedSolomonCoder};
use std::sync::Arc;

fn coder(k: usize, e: usize) -> ReedSolomonCoder {
    ReedSolomonCoder::new(Arc::new(GaloisField::gf256()), k, e).unwrap()
}

#[test]
fn test_same_seed_same_results_regardless_of_threads() {
    let c = coder(16, 6);
    let encoded = c.encode(&(0..160u8).collect::<Vec<_>>()).unwrap();
    let reporter = SilentExperimentReporter::new();

    let sequential = ExperimentConfig::new(6, 8)
        .with_seed(42)
        .with_threads(1, false);
    let parallel = ExperimentConfig::new(6, 8).with_seed(42).with_threads(4, true);

    let a = run_experiment(&c, &encoded, &sequential, &reporter).unwrap();
    let b = run_experiment(&c, &encoded, &parallel, &reporter).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.seed, 42);
}

#[test]
fn test_success_rate_curve_shape() {
    let c = coder(16, 4);
    let encoded = c.encode(&[0x5Au8; 320]).unwrap();
    let config = ExperimentConfig::new(12, 6).with_seed(2024);

    let results = run_experiment(&c, &encoded, &config, &SilentExperimentReporter::new()).unwrap();
    let rates = results.success_rates();
    assert_eq!(rates.len(), 12);

    // e = 4 always corrects one and two corrupted bytes
    assert_eq!(rates[0], 1.0);
    assert_eq!(rates[1], 1.0);
    for rate in &rates {
        assert!((0.0..=1.0).contains(rate));
    }
    // Twelve flips in a 20-byte block almost never leave two or fewer bad bytes
    assert!(rates[11] < 0.5);
}

#[test]
fn test_short_final_block_is_counted() {
    let c = coder(11, 4);
    let mut encoded = c.encode(&[1u8; 30]).unwrap();
    encoded.truncate(encoded.len() - 3);

    let config = ExperimentConfig::new(1, 3).with_seed(5);
    let results = run_experiment(&c, &encoded, &config, &SilentExperimentReporter::new()).unwrap();
    assert_eq!(results.blocks, 3);
    assert_eq!(results.levels.len(), 1);
    assert_eq!(results.trials, 3);
}

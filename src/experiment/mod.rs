//! Monte-Carlo decode experiment
//!
//! Estimates how likely a block survives the channel as a function of the
//! number of bit errors injected per block:
//! 1. For each error count `1..=max`, corrupt a copy of the encoded buffer
//! 2. Decode it and count the blocks reported as failed
//! 3. Average the failed fraction over the trials; success = 1 - average
//!
//! Every trial draws from its own RNG seeded from the base seed and the trial
//! number, so results depend only on the seed, not on the thread count.

mod config;
mod injection;

pub use config::{ExperimentConfig, DEFAULT_MAX_ERRORS_PER_BLOCK, DEFAULT_TRIALS};
pub use injection::inject_bit_errors;

use crate::reed_solomon::ReedSolomonCoder;
use crate::reporters::ExperimentReporter;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Encoded buffer is empty")]
    EmptyInput,

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Success rate measured for one error count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorLevelResult {
    pub errors_per_block: usize,
    /// Fraction of blocks decoded without a failure
    pub success_rate: f64,
    /// Fraction of blocks decoded without a failure but with wrong data
    pub miscorrection_rate: f64,
}

/// Results of a whole experiment
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResults {
    pub blocks: usize,
    pub trials: usize,
    pub seed: u64,
    pub levels: Vec<ErrorLevelResult>,
}

impl ExperimentResults {
    /// Success rates in error-count order
    pub fn success_rates(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.success_rate).collect()
    }
}

/// Outcome of one trial: failed and mis-corrected block counts
#[derive(Debug, Clone, Copy, Default)]
struct TrialOutcome {
    failed: usize,
    miscorrected: usize,
}

/// Run the experiment on an encoded buffer
pub fn run_experiment<R: ExperimentReporter>(
    coder: &ReedSolomonCoder,
    encoded: &[u8],
    config: &ExperimentConfig,
    reporter: &R,
) -> Result<ExperimentResults, ExperimentError> {
    if encoded.is_empty() {
        return Err(ExperimentError::EmptyInput);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let codeword_length = coder.codeword_length();
    let blocks = encoded.len().div_ceil(codeword_length);
    let threads = config.effective_threads();
    debug!(
        "Experiment over {} blocks with seed {} on {} threads",
        blocks, seed, threads
    );

    // Reference decode of the uncorrupted buffer
    let baseline = coder.decode_report(encoded);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    reporter.report_experiment_start(blocks, config.max_errors_per_block, config.trials);

    let mut levels = Vec::with_capacity(config.max_errors_per_block);
    for errors_per_block in 1..=config.max_errors_per_block {
        let run_trial = |trial: usize| {
            let trial_index = (errors_per_block - 1) * config.trials + trial;
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial_index as u64));
            let mut noisy = encoded.to_vec();
            inject_bit_errors(&mut rng, &mut noisy, codeword_length, errors_per_block);

            let report = coder.decode_report(&noisy);
            let miscorrected = report
                .blocks
                .iter()
                .zip(baseline.blocks.iter())
                .filter(|(decoded, clean)| !decoded.is_failed() && decoded.data != clean.data)
                .count();
            TrialOutcome {
                failed: report.failed_count(),
                miscorrected,
            }
        };

        let outcomes: Vec<TrialOutcome> = if config.parallel {
            pool.install(|| (0..config.trials).into_par_iter().map(run_trial).collect())
        } else {
            (0..config.trials).map(run_trial).collect()
        };

        let level = summarize(errors_per_block, blocks, &outcomes);
        reporter.report_error_level(&level);
        reporter.report_progress(
            "Error levels completed",
            errors_per_block as f64 / config.max_errors_per_block as f64,
        );
        levels.push(level);
    }

    let results = ExperimentResults {
        blocks,
        trials: config.trials,
        seed,
        levels,
    };
    reporter.report_experiment_results(&results);
    reporter.report_complete("Experiment complete");
    Ok(results)
}

fn summarize(errors_per_block: usize, blocks: usize, outcomes: &[TrialOutcome]) -> ErrorLevelResult {
    if outcomes.is_empty() {
        return ErrorLevelResult {
            errors_per_block,
            success_rate: 1.0,
            miscorrection_rate: 0.0,
        };
    }

    let trials = outcomes.len() as f64;
    let failed: f64 = outcomes
        .iter()
        .map(|o| o.failed as f64 / blocks as f64)
        .sum();
    let miscorrected: f64 = outcomes
        .iter()
        .map(|o| o.miscorrected as f64 / blocks as f64)
        .sum();

    ErrorLevelResult {
        errors_per_block,
        success_rate: 1.0 - failed / trials,
        miscorrection_rate: miscorrected / trials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reed_solomon::GaloisField;
    use crate::reporters::SilentExperimentReporter;
    use std::sync::Arc;

    fn coder() -> ReedSolomonCoder {
        ReedSolomonCoder::new(Arc::new(GaloisField::gf256()), 16, 8).unwrap()
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = run_experiment(
            &coder(),
            &[],
            &ExperimentConfig::default(),
            &SilentExperimentReporter::new(),
        );
        assert!(matches!(result, Err(ExperimentError::EmptyInput)));
    }

    #[test]
    fn test_within_bound_always_succeeds() {
        let c = coder();
        let encoded = c.encode(&[0x42; 64]).unwrap();
        let config = ExperimentConfig::new(4, 5).with_seed(11);
        let results =
            run_experiment(&c, &encoded, &config, &SilentExperimentReporter::new()).unwrap();

        assert_eq!(results.blocks, 4);
        assert_eq!(results.levels.len(), 4);
        for level in &results.levels {
            assert_eq!(level.success_rate, 1.0);
            assert_eq!(level.miscorrection_rate, 0.0);
        }
    }

    #[test]
    fn test_summarize_averages_trials() {
        let outcomes = [
            TrialOutcome {
                failed: 2,
                miscorrected: 0,
            },
            TrialOutcome {
                failed: 0,
                miscorrected: 1,
            },
        ];
        let level = summarize(3, 4, &outcomes);
        assert_eq!(level.errors_per_block, 3);
        assert!((level.success_rate - 0.75).abs() < 1e-12);
        assert!((level.miscorrection_rate - 0.125).abs() < 1e-12);
    }
}

//! Console reporter for experiments
//!
//! Prints one line per error count while the experiment runs, then a
//! summary table with a bar per success rate.

use super::{ExperimentReporter, Reporter};
use crate::experiment::{ErrorLevelResult, ExperimentResults};

/// Width of the success-rate bar in the summary table
const BAR_WIDTH: usize = 40;

/// Console implementation for experiments
#[derive(Default)]
pub struct ConsoleExperimentReporter;

impl ConsoleExperimentReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleExperimentReporter {
    fn report_progress(&self, message: &str, progress: f64) {
        println!("{} ({:.1}%)", message, progress * 100.0);
    }

    fn report_complete(&self, message: &str) {
        println!("{}", message);
    }
}

impl ExperimentReporter for ConsoleExperimentReporter {
    fn report_experiment_start(&self, blocks: usize, max_errors_per_block: usize, trials: usize) {
        println!(
            "Injecting 1..={} bit errors per block into {} blocks, {} trials each",
            max_errors_per_block, blocks, trials
        );
    }

    fn report_error_level(&self, result: &ErrorLevelResult) {
        println!(
            "  {:>3} errors/block: {:.4}",
            result.errors_per_block, result.success_rate
        );
    }

    fn report_experiment_results(&self, results: &ExperimentResults) {
        println!("\nDecode success probability:");
        for level in &results.levels {
            let filled = (level.success_rate * BAR_WIDTH as f64).round() as usize;
            println!(
                "  {:>3} | {:<width$} | {:.4}",
                level.errors_per_block,
                "#".repeat(filled.min(BAR_WIDTH)),
                level.success_rate,
                width = BAR_WIDTH
            );
        }
    }
}

//! Progress and output reporting for codec experiments
//!
//! This module provides traits and implementations for reporting progress and
//! results of the error-injection experiment. It keeps the experiment loop
//! decoupled from output formatting.

mod console;
mod silent;

pub use console::ConsoleExperimentReporter;
pub use silent::SilentExperimentReporter;

use crate::experiment::{ErrorLevelResult, ExperimentResults};

/// Base trait for all reporters
pub trait Reporter: Send + Sync {
    /// Report general progress with a message and completion fraction
    fn report_progress(&self, message: &str, progress: f64);

    /// Report successful completion of an operation
    fn report_complete(&self, message: &str);
}

/// Trait for reporting experiment progress and results
pub trait ExperimentReporter: Reporter {
    /// Report the experiment setup
    fn report_experiment_start(&self, blocks: usize, max_errors_per_block: usize, trials: usize);

    /// Report the measured success rate for one error count
    fn report_error_level(&self, result: &ErrorLevelResult);

    /// Report the final table of success rates
    fn report_experiment_results(&self, results: &ExperimentResults);
}

//! Silent reporter for experiments
//!
//! Provides a no-output implementation for tests or quiet operation.

use super::{ExperimentReporter, Reporter};
use crate::experiment::{ErrorLevelResult, ExperimentResults};

/// Silent implementation for experiments
#[derive(Default)]
pub struct SilentExperimentReporter;

impl SilentExperimentReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for SilentExperimentReporter {
    fn report_progress(&self, _message: &str, _progress: f64) {}
    fn report_complete(&self, _message: &str) {}
}

impl ExperimentReporter for SilentExperimentReporter {
    fn report_experiment_start(&self, _blocks: usize, _max_errors: usize, _trials: usize) {}
    fn report_error_level(&self, _result: &ErrorLevelResult) {}
    fn report_experiment_results(&self, _results: &ExperimentResults) {}
}

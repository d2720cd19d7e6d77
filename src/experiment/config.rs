//! Configuration for error-injection experiments

/// Error counts tried by default: 1..=12 bit errors per block
pub const DEFAULT_MAX_ERRORS_PER_BLOCK: usize = 12;

/// Trials per error count by default
pub const DEFAULT_TRIALS: usize = 10;

/// Configuration for the Monte-Carlo decode experiment
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Highest number of injected bit errors per block
    pub max_errors_per_block: usize,
    /// Independent trials per error count
    pub trials: usize,
    /// Base seed; `None` draws a fresh one
    pub seed: Option<u64>,
    /// Number of threads for trials (0 = auto-detect)
    pub threads: usize,
    /// Whether to run trials in parallel (false = single-threaded)
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_errors_per_block: DEFAULT_MAX_ERRORS_PER_BLOCK,
            trials: DEFAULT_TRIALS,
            seed: None,
            threads: 0, // Auto-detect CPU cores
            parallel: true,
        }
    }
}

impl ExperimentConfig {
    pub fn new(max_errors_per_block: usize, trials: usize) -> Self {
        Self {
            max_errors_per_block,
            trials,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize, parallel: bool) -> Self {
        self.threads = threads;
        self.parallel = parallel;
        self
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let max_errors_per_block = matches
            .get_one::<usize>("max_errors")
            .copied()
            .unwrap_or(DEFAULT_MAX_ERRORS_PER_BLOCK);
        let trials = matches
            .get_one::<usize>("trials")
            .copied()
            .unwrap_or(DEFAULT_TRIALS);
        let seed = matches.get_one::<u64>("seed").copied();
        let threads = matches.get_one::<usize>("threads").copied().unwrap_or(0);
        let parallel = !matches.get_flag("no-parallel");

        Self {
            max_errors_per_block,
            trials,
            seed,
            threads,
            parallel,
        }
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1, // Sequential mode always uses single thread
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            (true, n) => n,
        }
    }
}

//! Simulator and engine configuration
//!
//! Thread counts are plain configuration values handed to the backend when
//! it is built. Nothing here touches process-global state.

use qsplit_state::DEFAULT_PARALLEL_THRESHOLD;

/// Upper bound accepted for any thread-count setting
pub const MAX_THREADS: usize = 1024;

/// Configuration for the state-vector simulator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Threads in the simulator's kernel pool
    ///
    /// `0` uses every available core, `1` runs all kernels on the
    /// calling thread.
    ///
    /// Default: 0
    pub num_threads: usize,

    /// Minimum number of qubits before kernels fan out over the pool
    ///
    /// Default: 14
    pub parallel_threshold: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Kernels run on the calling thread only
    ///
    /// Used by pool workers so that N workers never spawn N × M threads.
    pub fn single_threaded() -> Self {
        Self {
            num_threads: 1,
            parallel_threshold: usize::MAX,
        }
    }

    /// Kernel pool spans every core
    pub fn all_cores() -> Self {
        Self {
            num_threads: 0,
            ..Default::default()
        }
    }

    /// Set the kernel thread count
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set the parallel threshold in qubits
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Thread count with `0` resolved to the number of cores
    pub fn resolved_threads(&self) -> usize {
        resolve_threads(self.num_threads)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.num_threads > MAX_THREADS {
            return Err(format!(
                "num_threads must be at most {}, got {}",
                MAX_THREADS, self.num_threads
            ));
        }
        Ok(())
    }
}

/// Configuration for the expectation engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Evaluate terms on the worker pool instead of one by one
    ///
    /// Default: false
    pub is_parallel: bool,

    /// Size of the worker pool, `0` for one worker per core
    ///
    /// Default: 0
    pub worker_threads: usize,

    /// Kernel threads used by the serial strategy, `0` for all cores
    ///
    /// Default: 0
    pub kernel_threads: usize,

    /// Largest tolerated imaginary part of a term expectation
    ///
    /// Larger residues are logged; the real part is used regardless.
    ///
    /// Default: 1e-9
    pub residue_tolerance: f64,

    /// Record [`ComputationStatistics`](crate::ComputationStatistics) for each run
    ///
    /// Default: true
    pub collect_statistics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            is_parallel: false,
            worker_threads: 0,
            kernel_threads: 0,
            residue_tolerance: 1e-9,
            collect_statistics: true,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Serial strategy, kernels on every core
    pub fn serial() -> Self {
        Self::default()
    }

    /// Parallel strategy, one worker per core
    pub fn parallel() -> Self {
        Self {
            is_parallel: true,
            ..Default::default()
        }
    }

    /// Select the strategy
    pub fn with_parallel(mut self, is_parallel: bool) -> Self {
        self.is_parallel = is_parallel;
        self
    }

    /// Set the worker pool size
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Set the serial strategy's kernel thread count
    pub fn with_kernel_threads(mut self, threads: usize) -> Self {
        self.kernel_threads = threads;
        self
    }

    /// Set the imaginary-residue tolerance
    pub fn with_residue_tolerance(mut self, tolerance: f64) -> Self {
        self.residue_tolerance = tolerance;
        self
    }

    /// Enable or disable statistics collection
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.collect_statistics = enabled;
        self
    }

    /// Backend configuration for the serial strategy
    pub fn serial_simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig::all_cores().with_threads(self.kernel_threads)
    }

    /// Backend configuration for each pool worker
    pub fn worker_simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig::single_threaded()
    }

    /// Worker count with `0` resolved to the number of cores
    pub fn resolved_worker_threads(&self) -> usize {
        resolve_threads(self.worker_threads)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("worker_threads", self.worker_threads),
            ("kernel_threads", self.kernel_threads),
        ] {
            if value > MAX_THREADS {
                return Err(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_THREADS, value
                ));
            }
        }

        if !self.residue_tolerance.is_finite() || self.residue_tolerance < 0.0 {
            return Err(format!(
                "residue_tolerance must be a non-negative number, got {}",
                self.residue_tolerance
            ));
        }

        Ok(())
    }
}

fn resolve_threads(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get().max(1)
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_simulator_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.num_threads, 0);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.resolved_threads(), num_cpus::get().max(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_single_threaded_preset() {
        let config = SimulatorConfig::single_threaded();
        assert_eq!(config.resolved_threads(), 1);
        assert_eq!(config.parallel_threshold, usize::MAX);
    }

    #[test]
    fn test_simulator_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_threads(3)
            .with_parallel_threshold(10);
        assert_eq!(config.resolved_threads(), 3);
        assert_eq!(config.parallel_threshold, 10);

        let invalid = SimulatorConfig::new().with_threads(MAX_THREADS + 1);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_default_engine_config() {
        let config = EngineConfig::default();
        assert!(!config.is_parallel);
        assert_eq!(config.residue_tolerance, 1e-9);
        assert!(config.collect_statistics);
        assert!(config.validate().is_ok());
        assert!(EngineConfig::parallel().is_parallel);
    }

    #[test]
    fn test_engine_backend_configs() {
        let config = EngineConfig::serial().with_kernel_threads(2);
        assert_eq!(config.serial_simulator_config().resolved_threads(), 2);
        assert_eq!(config.worker_simulator_config().resolved_threads(), 1);

        let config = EngineConfig::parallel().with_worker_threads(5);
        assert_eq!(config.resolved_worker_threads(), 5);
    }

    #[test]
    fn test_engine_validate() {
        let invalid = EngineConfig::default().with_residue_tolerance(-1.0);
        assert!(invalid.validate().is_err());

        let invalid = EngineConfig::default().with_residue_tolerance(f64::NAN);
        assert!(invalid.validate().is_err());

        let invalid = EngineConfig::default().with_worker_threads(MAX_THREADS + 1);
        assert!(invalid.validate().unwrap_err().contains("worker_threads"));
    }
}

//! Per-computation statistics

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// How a computation was aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Terms evaluated one after another, kernels on all cores
    Serial,
    /// Terms spread over the worker pool, kernels single-threaded
    Parallel,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Serial => write!(f, "serial"),
            Strategy::Parallel => write!(f, "parallel"),
        }
    }
}

/// Summary of the most recent expectation computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationStatistics {
    /// Aggregation strategy used
    pub strategy: Strategy,
    /// Number of terms evaluated
    pub num_terms: usize,
    /// Threads that evaluated terms (1 for serial)
    pub num_workers: usize,
    /// Widest subgraph circuit, in qubits
    pub max_term_qubits: usize,
    /// Sum of all contributions
    pub total: f64,
    /// Wall-clock time of the computation
    pub elapsed: Duration,
}

impl ComputationStatistics {
    /// Mean wall-clock time per term
    pub fn time_per_term(&self) -> Duration {
        match u32::try_from(self.num_terms) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.elapsed / n,
        }
    }

    /// Terms evaluated per second
    pub fn terms_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.num_terms as f64 / secs
        }
    }
}

impl fmt::Display for ComputationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Computation Statistics:")?;
        writeln!(f, "  Strategy: {} ({} workers)", self.strategy, self.num_workers)?;
        writeln!(f, "  Terms: {} (max width {} qubits)", self.num_terms, self.max_term_qubits)?;
        writeln!(f, "  Total: {:.10}", self.total)?;
        writeln!(
            f,
            "  Time: {:?} ({:.0} terms/sec)",
            self.elapsed,
            self.terms_per_second()
        )
    }
}

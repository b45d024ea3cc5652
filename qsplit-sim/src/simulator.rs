//! State-vector simulator backend

use num_complex::Complex64;
use qsplit_core::{Circuit, GateOp, GateStructure};
use qsplit_state::{DenseState, PauliString};
use rayon::ThreadPool;
use std::sync::Arc;

use crate::{
    config::SimulatorConfig,
    error::{Result, SimulatorError},
};

/// Dense state-vector simulator
///
/// Owns its kernel pool. With more than one configured thread, every kernel
/// on a state of at least `parallel_threshold` qubits runs inside that pool;
/// with one thread there is no pool and everything stays on the caller's
/// thread.
///
/// # Example
///
/// ```
/// use qsplit_core::{Circuit, QubitId};
/// use qsplit_gates::standard::Hadamard;
/// use qsplit_sim::{Simulator, SimulatorConfig};
/// use qsplit_state::PauliString;
/// use std::sync::Arc;
///
/// let simulator = Simulator::new(SimulatorConfig::single_threaded()).unwrap();
///
/// let mut circuit = Circuit::new(1);
/// circuit.add_gate(Arc::new(Hadamard), &[QubitId::new(0)]).unwrap();
///
/// let z = PauliString::single_z(1, 0).unwrap();
/// let value = simulator.expectation(&circuit, &z).unwrap();
/// assert!(value.re.abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    kernel_pool: Option<Arc<ThreadPool>>,
}

impl Simulator {
    /// Create a simulator, building its kernel pool if it has more than one thread
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool cannot be built.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;

        let threads = config.resolved_threads();
        let kernel_pool = if threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("qsplit-kernel-{i}"))
                .build()?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Self {
            config,
            kernel_pool,
        })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Threads available to kernels
    pub fn num_threads(&self) -> usize {
        self.kernel_pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    /// Simulate `circuit` from |0...0⟩ and return the final state
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be allocated or an operation has
    /// no kernel.
    pub fn run(&self, circuit: &Circuit) -> Result<DenseState> {
        self.in_pool(|| self.evolve(circuit))
    }

    /// Simulate `circuit` and return `⟨ψ|P|ψ⟩` for the final state
    ///
    /// # Errors
    ///
    /// Returns an error if simulation fails or the observable's width differs
    /// from the circuit's.
    pub fn expectation(&self, circuit: &Circuit, observable: &PauliString) -> Result<Complex64> {
        self.in_pool(|| {
            let state = self.evolve(circuit)?;
            Ok(observable.expectation(&state)?)
        })
    }

    fn in_pool<T: Send>(&self, op: impl FnOnce() -> Result<T> + Send) -> Result<T> {
        match &self.kernel_pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn evolve(&self, circuit: &Circuit) -> Result<DenseState> {
        let threshold = if self.kernel_pool.is_some() {
            self.config.parallel_threshold
        } else {
            usize::MAX
        };
        let mut state = DenseState::new(circuit.num_qubits())?.with_parallel_threshold(threshold);

        for op in circuit.operations() {
            apply_operation(&mut state, op)?;
        }
        Ok(state)
    }
}

fn apply_operation(state: &mut DenseState, op: &GateOp) -> Result<()> {
    let gate = op.gate();
    let qubits = op.qubits();

    match (gate.structure(), qubits) {
        (GateStructure::ControlledX, [control, target]) => {
            state.apply_cnot(control.index(), target.index())?;
        },
        (GateStructure::Diagonal, [qubit]) => {
            let m = single_qubit_matrix(op)?;
            state.apply_diagonal_gate([m[0][0], m[1][1]], qubit.index())?;
        },
        (GateStructure::Dense, [qubit]) => {
            let m = single_qubit_matrix(op)?;
            state.apply_single_qubit_gate(&m, qubit.index())?;
        },
        _ => return Err(unsupported(op)),
    }
    Ok(())
}

fn single_qubit_matrix(op: &GateOp) -> Result<[[Complex64; 2]; 2]> {
    match op.gate().matrix().as_deref() {
        Some(&[a, b, c, d]) => Ok([[a, b], [c, d]]),
        _ => Err(unsupported(op)),
    }
}

fn unsupported(op: &GateOp) -> SimulatorError {
    SimulatorError::UnsupportedGate {
        gate: op.gate().name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsplit_core::{Gate, QubitId};
    use qsplit_gates::standard::{CNot, Hadamard, RotationX, RotationZ};

    #[derive(Debug)]
    struct Opaque;

    impl Gate for Opaque {
        fn name(&self) -> &str {
            "OPAQUE"
        }

        fn num_qubits(&self) -> usize {
            1
        }
    }

    fn q(i: usize) -> QubitId {
        QubitId::new(i)
    }

    #[test]
    fn test_single_threaded_has_no_pool() {
        let sim = Simulator::new(SimulatorConfig::single_threaded()).unwrap();
        assert_eq!(sim.num_threads(), 1);

        let sim = Simulator::new(SimulatorConfig::new().with_threads(2)).unwrap();
        assert_eq!(sim.num_threads(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulatorConfig::new().with_threads(crate::config::MAX_THREADS + 1);
        assert!(matches!(
            Simulator::new(config),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bell_circuit() {
        let sim = Simulator::new(SimulatorConfig::single_threaded()).unwrap();
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Arc::new(Hadamard), &[q(0)]).unwrap();
        circuit.add_gate(Arc::new(CNot), &[q(0), q(1)]).unwrap();

        let state = sim.run(&circuit).unwrap();
        assert_relative_eq!(state.probability(0b00).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(state.probability(0b11).unwrap(), 0.5, epsilon = 1e-12);

        let zz = PauliString::zz(2, 0, 1).unwrap();
        let value = sim.expectation(&circuit, &zz).unwrap();
        assert_relative_eq!(value.re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rz_rx_single_qubit() {
        // H, RZ(a), RX(b) on |0⟩ gives ⟨Z⟩ = sin(a)·sin(b)
        let (a, b) = (0.7, 1.3);
        let sim = Simulator::new(SimulatorConfig::single_threaded()).unwrap();
        let mut circuit = Circuit::new(1);
        circuit.add_gate(Arc::new(Hadamard), &[q(0)]).unwrap();
        circuit.add_gate(Arc::new(RotationZ::new(a)), &[q(0)]).unwrap();
        circuit.add_gate(Arc::new(RotationX::new(b)), &[q(0)]).unwrap();

        let z = PauliString::single_z(1, 0).unwrap();
        let value = sim.expectation(&circuit, &z).unwrap();
        assert_relative_eq!(value.re, a.sin() * b.sin(), epsilon = 1e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pooled_kernels_match_single_threaded() {
        let mut circuit = Circuit::new(6);
        for i in 0..6 {
            circuit.add_gate(Arc::new(Hadamard), &[q(i)]).unwrap();
        }
        for i in 0..5 {
            circuit.add_gate(Arc::new(CNot), &[q(i), q(i + 1)]).unwrap();
            circuit
                .add_gate(Arc::new(RotationZ::new(0.3 * i as f64)), &[q(i + 1)])
                .unwrap();
            circuit.add_gate(Arc::new(CNot), &[q(i), q(i + 1)]).unwrap();
        }
        for i in 0..6 {
            circuit.add_gate(Arc::new(RotationX::new(0.9)), &[q(i)]).unwrap();
        }

        let single = Simulator::new(SimulatorConfig::single_threaded()).unwrap();
        let pooled = Simulator::new(
            SimulatorConfig::new()
                .with_threads(4)
                .with_parallel_threshold(1),
        )
        .unwrap();

        let zz = PauliString::zz(6, 2, 3).unwrap();
        let a = single.expectation(&circuit, &zz).unwrap();
        let b = pooled.expectation(&circuit, &zz).unwrap();
        assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
    }

    #[test]
    fn test_gate_without_matrix_is_unsupported() {
        let sim = Simulator::new(SimulatorConfig::single_threaded()).unwrap();
        let mut circuit = Circuit::new(1);
        circuit.add_gate(Arc::new(Opaque), &[q(0)]).unwrap();

        assert_eq!(
            sim.run(&circuit).unwrap_err(),
            SimulatorError::UnsupportedGate {
                gate: "OPAQUE".to_string()
            }
        );
    }
}

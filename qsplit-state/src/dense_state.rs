//! Dense state vector with gate application
//!
//! Amplitudes are stored little-endian: qubit `k` is bit `k` of the basis
//! index. Kernels switch to their rayon form once the state has at least
//! `parallel_threshold` qubits.

use crate::error::{Result, StateError};
use crate::kernels;
use num_complex::Complex64;
use std::fmt;

/// Largest state this crate will allocate (16 GiB of amplitudes)
pub const MAX_QUBITS: usize = 30;

/// Default qubit count at which kernels go parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 14;

/// Dense quantum state of `n` qubits backed by `2^n` amplitudes
///
/// # Example
///
/// ```
/// use qsplit_state::DenseState;
/// use num_complex::Complex64;
///
/// let mut state = DenseState::new(2).unwrap();
///
/// let s = std::f64::consts::FRAC_1_SQRT_2;
/// let hadamard = [
///     [Complex64::new(s, 0.0), Complex64::new(s, 0.0)],
///     [Complex64::new(s, 0.0), Complex64::new(-s, 0.0)],
/// ];
/// state.apply_single_qubit_gate(&hadamard, 0).unwrap();
/// state.apply_cnot(0, 1).unwrap();
///
/// assert_eq!(state.num_qubits(), 2);
/// assert!(state.is_normalized(1e-10));
/// assert!((state.amplitudes()[3].re - s).abs() < 1e-12);
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseState {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
    parallel_threshold: usize,
}

impl DenseState {
    /// Create a new dense state initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` exceeds [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        check_size(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Create a dense state from amplitude data
    ///
    /// The amplitudes are taken as given, without normalization.
    ///
    /// # Errors
    /// Returns error if `amplitudes.len() != 2^num_qubits`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        check_size(num_qubits)?;
        let expected = 1usize << num_qubits;
        if amplitudes.len() != expected {
            return Err(StateError::DimensionMismatch {
                expected,
                actual: amplitudes.len(),
            });
        }
        Ok(Self {
            amplitudes: amplitudes.to_vec(),
            num_qubits,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Set the qubit count at which kernels run on rayon
    ///
    /// `usize::MAX` keeps every kernel sequential.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Whether kernels on this state take the parallel path
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.num_qubits >= self.parallel_threshold
    }

    /// Compute the norm of the state
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Check if |norm - 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Probability of measuring basis state `index`
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.amplitudes.get(index).map(|a| a.norm_sqr())
    }

    /// Inner product ⟨self|other⟩
    ///
    /// # Errors
    /// Returns error if the states have different sizes
    pub fn inner_product(&self, other: &DenseState) -> Result<Complex64> {
        if self.num_qubits != other.num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits,
                actual: other.num_qubits,
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Apply a single-qubit gate given as a 2×2 row-major matrix
    ///
    /// # Errors
    /// Returns error if qubit index is invalid
    pub fn apply_single_qubit_gate(
        &mut self,
        matrix: &[[Complex64; 2]; 2],
        qubit: usize,
    ) -> Result<()> {
        self.check_qubit(qubit)?;
        let parallel = self.is_parallel();
        kernels::apply_single_qubit(&mut self.amplitudes, matrix, qubit, parallel);
        Ok(())
    }

    /// Apply a diagonal single-qubit gate `[[a, 0], [0, b]]` given as `[a, b]`
    ///
    /// # Errors
    /// Returns error if qubit index is invalid
    pub fn apply_diagonal_gate(&mut self, diagonal: [Complex64; 2], qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let parallel = self.is_parallel();
        kernels::apply_diagonal(&mut self.amplitudes, diagonal, qubit, parallel);
        Ok(())
    }

    /// Apply a CNOT gate
    ///
    /// # Errors
    /// Returns error if qubit indices are invalid or equal
    pub fn apply_cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(StateError::RepeatedQubit { index: control });
        }
        let parallel = self.is_parallel();
        kernels::apply_cnot(&mut self.amplitudes, control, target, parallel);
        Ok(())
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }
}

fn check_size(num_qubits: usize) -> Result<()> {
    if num_qubits > MAX_QUBITS {
        return Err(StateError::TooManyQubits {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

impl fmt::Debug for DenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseState")
            .field("num_qubits", &self.num_qubits)
            .field("norm", &self.norm())
            .finish()
    }
}

impl fmt::Display for DenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseState({} qubits)", self.num_qubits)?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() > 1e-12 {
                writeln!(
                    f,
                    "  |{:0width$b}⟩: {:.6} {:+.6}i",
                    i,
                    amp.re,
                    amp.im,
                    width = self.num_qubits.max(1)
                )?;
            }
        }
        Ok(())
    }
}

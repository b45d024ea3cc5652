//! Dense state vectors for qsplit
//!
//! This crate holds the numerical side of term evaluation:
//!
//! - [`DenseState`]: a `2^n` amplitude vector with gate application
//! - [`kernels`]: sequential and rayon-parallel amplitude updates
//! - [`PauliString`]: Pauli observables and their expectation values
//!
//! # Example
//!
//! ```
//! use qsplit_state::{DenseState, PauliString};
//! use num_complex::Complex64;
//!
//! let s = std::f64::consts::FRAC_1_SQRT_2;
//! let hadamard = [
//!     [Complex64::new(s, 0.0), Complex64::new(s, 0.0)],
//!     [Complex64::new(s, 0.0), Complex64::new(-s, 0.0)],
//! ];
//!
//! let mut state = DenseState::new(1).unwrap();
//! state.apply_single_qubit_gate(&hadamard, 0).unwrap();
//!
//! let z = PauliString::single_z(1, 0).unwrap();
//! assert!(z.expectation_value(&state).unwrap().abs() < 1e-12);
//! ```

pub mod dense_state;
pub mod error;
pub mod kernels;
pub mod observable;

pub use dense_state::{DenseState, DEFAULT_PARALLEL_THRESHOLD, MAX_QUBITS};
pub use error::{Result, StateError};
pub use observable::{Pauli, PauliString};

//! Gate library for qsplit
//!
//! Provides the gates a QAOA term circuit is assembled from: Hadamard,
//! Pauli-Z, CNOT and the X/Z rotations. Fixed gates expose `const`
//! matrices, rotations compute theirs from the stored angle.
//!
//! # Example
//!
//! ```
//! use qsplit_gates::standard::{CNot, Hadamard, RotationX};
//! use qsplit_gates::matrices;
//! use std::f64::consts::PI;
//!
//! let h_matrix = Hadamard::matrix();
//! let cnot_matrix = CNot::matrix();
//! assert_eq!(h_matrix[0][0].re, std::f64::consts::FRAC_1_SQRT_2);
//! assert_eq!(cnot_matrix[2][3].re, 1.0);
//!
//! let rx = RotationX::new(PI / 2.0);
//! let m = rx.matrix();
//! assert!((m[0][1].im + (PI / 4.0).sin()).abs() < 1e-12);
//!
//! let z = &matrices::PAULI_Z;
//! assert_eq!(z[1][1].re, -1.0);
//! ```

pub mod matrices;
pub mod standard;

pub use standard::*;

//! Standard gates needed by QAOA term circuits

use crate::matrices;
use num_complex::Complex64;
use qsplit_core::gate::{Gate, GateStructure};

/// Implements the inherent `matrix()` accessor for fixed gates
macro_rules! impl_matrix_method {
    ($gate_type:ty, $matrix:expr, $size:expr) => {
        impl $gate_type {
            /// Returns the constant gate matrix
            #[inline]
            pub const fn matrix() -> &'static [[Complex64; $size]; $size] {
                $matrix
            }
        }
    };
}

/// Hadamard gate
///
/// Creates superposition: H|0⟩ = (|0⟩ + |1⟩)/√2
#[derive(Debug, Clone, Copy)]
pub struct Hadamard;

impl Gate for Hadamard {
    fn name(&self) -> &str {
        "H"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(Self::matrix()))
    }
}

impl_matrix_method!(Hadamard, &matrices::HADAMARD, 2);

/// Pauli-Z gate
///
/// Phase flip: Z|0⟩ = |0⟩, Z|1⟩ = -|1⟩
#[derive(Debug, Clone, Copy)]
pub struct PauliZ;

impl Gate for PauliZ {
    fn name(&self) -> &str {
        "Z"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn structure(&self) -> GateStructure {
        GateStructure::Diagonal
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(Self::matrix()))
    }
}

impl_matrix_method!(PauliZ, &matrices::PAULI_Z, 2);

/// CNOT gate (Controlled-NOT)
///
/// Flips the target (second operand) when the control (first operand) is |1⟩.
#[derive(Debug, Clone, Copy)]
pub struct CNot;

impl Gate for CNot {
    fn name(&self) -> &str {
        "CNOT"
    }

    fn num_qubits(&self) -> usize {
        2
    }

    fn is_hermitian(&self) -> bool {
        true
    }

    fn structure(&self) -> GateStructure {
        GateStructure::ControlledX
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(Self::matrix()))
    }
}

impl_matrix_method!(CNot, &matrices::CNOT, 4);

/// Rotation-X gate, `exp(-iθX/2)`
#[derive(Debug, Clone, Copy)]
pub struct RotationX {
    theta: f64,
}

impl RotationX {
    /// Creates a new RX gate with the given angle
    pub const fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Returns the rotation angle
    pub const fn angle(&self) -> f64 {
        self.theta
    }

    /// Computes the RX matrix for this angle
    #[inline]
    pub fn matrix(&self) -> [[Complex64; 2]; 2] {
        matrices::rotation_x(self.theta)
    }
}

impl Gate for RotationX {
    fn name(&self) -> &str {
        "RX"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn description(&self) -> String {
        format!("RX({:.4})", self.theta)
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(&RotationX::matrix(self)))
    }
}

/// Rotation-Z gate, `exp(-iθZ/2)`
#[derive(Debug, Clone, Copy)]
pub struct RotationZ {
    theta: f64,
}

impl RotationZ {
    /// Creates a new RZ gate with the given angle
    pub const fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Returns the rotation angle
    pub const fn angle(&self) -> f64 {
        self.theta
    }

    /// Computes the RZ matrix for this angle
    #[inline]
    pub fn matrix(&self) -> [[Complex64; 2]; 2] {
        matrices::rotation_z(self.theta)
    }

    /// The two diagonal entries `[e^(-iθ/2), e^(iθ/2)]`
    #[inline]
    pub fn diagonal_elements(&self) -> [Complex64; 2] {
        matrices::rotation_z_diagonal(self.theta)
    }
}

impl Gate for RotationZ {
    fn name(&self) -> &str {
        "RZ"
    }

    fn num_qubits(&self) -> usize {
        1
    }

    fn structure(&self) -> GateStructure {
        GateStructure::Diagonal
    }

    fn description(&self) -> String {
        format!("RZ({:.4})", self.theta)
    }

    fn matrix(&self) -> Option<Vec<Complex64>> {
        Some(matrices::flatten(&RotationZ::matrix(self)))
    }
}

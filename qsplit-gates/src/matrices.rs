//! Gate matrices used by the QAOA term circuits
//!
//! Fixed gates are `const` tables. Rotations follow the convention
//! `R_P(θ) = exp(-i·θ·P/2)`.

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-Z gate matrix
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Identity gate matrix
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// CNOT gate matrix, control on the first (most significant) operand
/// CNOT = [[1, 0, 0, 0],
///         [0, 1, 0, 0],
///         [0, 0, 0, 1],
///         [0, 0, 1, 0]]
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

/// Rotation-X matrix
/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_x(theta: f64) -> [[Complex64; 2]; 2] {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos_val, 0.0), Complex64::new(0.0, -sin_val)],
        [Complex64::new(0.0, -sin_val), Complex64::new(cos_val, 0.0)],
    ]
}

/// Rotation-Z matrix
/// RZ(θ) = [[e^(-iθ/2),  0       ],
///          [0,          e^(iθ/2)]]
#[inline]
pub fn rotation_z(theta: f64) -> [[Complex64; 2]; 2] {
    let [d0, d1] = rotation_z_diagonal(theta);
    [[d0, ZERO], [ZERO, d1]]
}

/// Diagonal entries of RZ(θ)
#[inline]
pub fn rotation_z_diagonal(theta: f64) -> [Complex64; 2] {
    let half_theta = theta / 2.0;
    [
        Complex64::from_polar(1.0, -half_theta),
        Complex64::from_polar(1.0, half_theta),
    ]
}

/// Product of two 2x2 matrices
pub fn mul_2x2(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) -> [[Complex64; 2]; 2] {
    let mut out = [[ZERO; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

/// Flatten a square matrix into row-major order
pub fn flatten<const N: usize>(matrix: &[[Complex64; N]; N]) -> Vec<Complex64> {
    matrix.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn assert_matrix_eq(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(a[i][j].re, b[i][j].re, epsilon = 1e-12);
                assert_relative_eq!(a[i][j].im, b[i][j].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_hadamard_self_inverse() {
        assert_matrix_eq(&mul_2x2(&HADAMARD, &HADAMARD), &IDENTITY);
    }

    #[test]
    fn test_hadamard_conjugates_z_to_x() {
        let hzh = mul_2x2(&HADAMARD, &mul_2x2(&PAULI_Z, &HADAMARD));
        let pauli_x = [[ZERO, ONE], [ONE, ZERO]];
        assert_matrix_eq(&hzh, &pauli_x);
    }

    #[test]
    fn test_rotation_z_at_pi_is_z_up_to_phase() {
        // RZ(π) = -i·Z
        let rz = rotation_z(PI);
        let minus_i = Complex64::new(0.0, -1.0);
        let expected = [
            [minus_i * PAULI_Z[0][0], ZERO],
            [ZERO, minus_i * PAULI_Z[1][1]],
        ];
        assert_matrix_eq(&rz, &expected);
    }

    #[test]
    fn test_rotation_x_composes_additively() {
        let composed = mul_2x2(&rotation_x(0.3), &rotation_x(0.9));
        assert_matrix_eq(&composed, &rotation_x(1.2));
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        assert_matrix_eq(&rotation_x(0.0), &IDENTITY);
        assert_matrix_eq(&rotation_z(0.0), &IDENTITY);
    }

    #[test]
    fn test_flatten_cnot() {
        let flat = flatten(&CNOT);
        assert_eq!(flat.len(), 16);
        assert_eq!(flat[11], ONE);
        assert_eq!(flat[14], ONE);
        assert_eq!(flat[10], ZERO);
    }
}

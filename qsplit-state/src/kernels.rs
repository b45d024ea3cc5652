//! Amplitude-update kernels
//!
//! Every kernel has a sequential and a rayon-parallel form. The parallel form
//! runs on whatever rayon pool is current, so callers control the thread
//! count with `ThreadPool::install`. Amplitudes are indexed little-endian:
//! qubit `k` is bit `k` of the basis index.

use num_complex::Complex64;
use rayon::prelude::*;

/// Apply a 2x2 matrix to `qubit`
pub fn apply_single_qubit(
    state: &mut [Complex64],
    matrix: &[[Complex64; 2]; 2],
    qubit: usize,
    parallel: bool,
) {
    let stride = 1usize << qubit;
    let [[m00, m01], [m10, m11]] = *matrix;

    let update = |chunk: &mut [Complex64]| {
        let (low, high) = chunk.split_at_mut(stride);
        for (a, b) in low.iter_mut().zip(high.iter_mut()) {
            let (x, y) = (*a, *b);
            *a = m00 * x + m01 * y;
            *b = m10 * x + m11 * y;
        }
    };

    if parallel {
        state.par_chunks_mut(stride * 2).for_each(update);
    } else {
        state.chunks_mut(stride * 2).for_each(update);
    }
}

/// Apply `diag(d0, d1)` to `qubit`
pub fn apply_diagonal(state: &mut [Complex64], diagonal: [Complex64; 2], qubit: usize, parallel: bool) {
    let mask = 1usize << qubit;
    let update = |(i, amp): (usize, &mut Complex64)| {
        *amp *= if i & mask == 0 { diagonal[0] } else { diagonal[1] };
    };

    if parallel {
        state.par_iter_mut().enumerate().for_each(update);
    } else {
        state.iter_mut().enumerate().for_each(update);
    }
}

/// Apply CNOT with the given control and target
///
/// Each chunk of `2 * 2^target` amplitudes holds both halves of every
/// target pair, so chunks can be processed independently.
pub fn apply_cnot(state: &mut [Complex64], control: usize, target: usize, parallel: bool) {
    let stride = 1usize << target;
    let control_mask = 1usize << control;

    let update = |(chunk_index, chunk): (usize, &mut [Complex64])| {
        let base = chunk_index * stride * 2;
        let (low, high) = chunk.split_at_mut(stride);
        for (offset, (a, b)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
            if (base + offset) & control_mask != 0 {
                std::mem::swap(a, b);
            }
        }
    };

    if parallel {
        state.par_chunks_mut(stride * 2).enumerate().for_each(update);
    } else {
        state.chunks_mut(stride * 2).enumerate().for_each(update);
    }
}

/// `Σ_i |a_i|² · (-1)^popcount(i & z_mask)`
pub fn z_string_expectation(state: &[Complex64], z_mask: usize, parallel: bool) -> f64 {
    let term = |(i, amp): (usize, &Complex64)| {
        let p = amp.norm_sqr();
        if (i & z_mask).count_ones() % 2 == 0 {
            p
        } else {
            -p
        }
    };

    if parallel {
        state.par_iter().enumerate().map(term).sum()
    } else {
        state.iter().enumerate().map(term).sum()
    }
}

/// `⟨ψ|P|ψ⟩` for a general Pauli string given as bit masks
///
/// `P|i⟩ = i^{n_y} · (-1)^popcount(i & (y_mask | z_mask)) · |i ⊕ flip_mask⟩`
/// where `flip_mask = x_mask | y_mask`.
pub fn pauli_expectation(
    state: &[Complex64],
    flip_mask: usize,
    y_mask: usize,
    z_mask: usize,
    parallel: bool,
) -> Complex64 {
    let global_phase = match y_mask.count_ones() % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    };
    let sign_mask = y_mask | z_mask;

    let term = |(i, amp): (usize, &Complex64)| {
        let partner = state[i ^ flip_mask].conj() * amp;
        if (i & sign_mask).count_ones() % 2 == 0 {
            partner
        } else {
            -partner
        }
    };

    let sum: Complex64 = if parallel {
        state.par_iter().enumerate().map(term).sum()
    } else {
        state.iter().enumerate().map(term).sum()
    };
    global_phase * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn basis(num_qubits: usize, index: usize) -> Vec<Complex64> {
        let mut state = vec![c(0.0, 0.0); 1 << num_qubits];
        state[index] = c(1.0, 0.0);
        state
    }

    #[test]
    fn test_single_qubit_targets_correct_bit() {
        let x = [[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]];
        for parallel in [false, true] {
            let mut state = basis(3, 0);
            apply_single_qubit(&mut state, &x, 1, parallel);
            assert_eq!(state[0b010], c(1.0, 0.0));
            assert_eq!(state[0], c(0.0, 0.0));
        }
    }

    #[test]
    fn test_cnot_truth_table() {
        for parallel in [false, true] {
            for (input, output) in [(0b00, 0b00), (0b01, 0b11), (0b10, 0b10), (0b11, 0b01)] {
                let mut state = basis(2, input);
                apply_cnot(&mut state, 0, 1, parallel);
                assert_eq!(state[output], c(1.0, 0.0), "input {input:02b}");
            }
        }
    }

    #[test]
    fn test_cnot_control_above_target() {
        // control = qubit 2, target = qubit 0
        let mut state = basis(3, 0b100);
        apply_cnot(&mut state, 2, 0, false);
        assert_eq!(state[0b101], c(1.0, 0.0));

        let mut state = basis(3, 0b001);
        apply_cnot(&mut state, 2, 0, true);
        assert_eq!(state[0b001], c(1.0, 0.0));
    }

    #[test]
    fn test_diagonal_phases() {
        let mut state = vec![c(0.5, 0.0); 4];
        apply_diagonal(&mut state, [c(1.0, 0.0), c(0.0, 1.0)], 0, false);
        assert_eq!(state[0], c(0.5, 0.0));
        assert_eq!(state[1], c(0.0, 0.5));
        assert_eq!(state[2], c(0.5, 0.0));
        assert_eq!(state[3], c(0.0, 0.5));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 6;
        let initial: Vec<Complex64> = (0..1 << n)
            .map(|i| c((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
            .collect();
        let m = [[c(0.6, 0.0), c(0.0, 0.8)], [c(0.0, 0.8), c(0.6, 0.0)]];

        let run = |parallel: bool| {
            let mut state = initial.clone();
            apply_single_qubit(&mut state, &m, 3, parallel);
            apply_cnot(&mut state, 4, 1, parallel);
            apply_diagonal(&mut state, [c(0.0, 1.0), c(1.0, 0.0)], 5, parallel);
            state
        };
        let seq = run(false);
        let par = run(true);

        for (a, b) in seq.iter().zip(par.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
        assert_relative_eq!(
            z_string_expectation(&seq, 0b101, false),
            z_string_expectation(&par, 0b101, true),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_z_expectation_on_basis_states() {
        assert_eq!(z_string_expectation(&basis(2, 0b00), 0b01, false), 1.0);
        assert_eq!(z_string_expectation(&basis(2, 0b01), 0b01, false), -1.0);
        assert_eq!(z_string_expectation(&basis(2, 0b01), 0b11, false), -1.0);
        assert_eq!(z_string_expectation(&basis(2, 0b11), 0b11, false), 1.0);
    }

    #[test]
    fn test_pauli_expectation_y_on_plus_i_state() {
        // (|0⟩ + i|1⟩)/√2 is the +1 eigenstate of Y
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let state = vec![c(s, 0.0), c(0.0, s)];
        let value = pauli_expectation(&state, 0b1, 0b1, 0, false);
        assert_relative_eq!(value.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);
    }
}

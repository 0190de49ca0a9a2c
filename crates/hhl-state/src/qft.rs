//! Quantum Fourier transform as a sequence of primitive gates.
//!
//! For a little-endian register with value `x = Σ reg[k]·2^k` and
//! `n = reg.len()`, the forward transform with swaps is
//!
//!   |x⟩ → 2^{-n/2} Σ_y e^{2πi·xy/2^n} |y⟩
//!
//! Without the final swaps the output register is bit-reversed.

use std::f64::consts::PI;

use crate::gate::Gate;
use crate::register::QubitId;

/// Controlled phase angle between register bits `k < i`.
fn rk(i: usize, k: usize) -> f64 {
    2.0 * PI / f64::from(1u32 << (i - k + 1))
}

fn bit_reversal(qubits: &[QubitId]) -> impl Iterator<Item = Gate> + '_ {
    let n = qubits.len();
    (0..n / 2).map(move |i| Gate::Swap(qubits[i], qubits[n - 1 - i]))
}

/// Primitive gates of the forward QFT.
pub fn qft_gates(qubits: &[QubitId], swap: bool) -> Vec<Gate> {
    let n = qubits.len();
    let mut gates = Vec::with_capacity(n * (n + 1) / 2 + n / 2);

    // Most significant bit first.
    for i in (0..n).rev() {
        gates.push(Gate::H(qubits[i]));
        for k in (0..i).rev() {
            gates.push(Gate::CPhase {
                control: qubits[k],
                target: qubits[i],
                theta: rk(i, k),
            });
        }
    }
    if swap {
        gates.extend(bit_reversal(qubits));
    }
    gates
}

/// Primitive gates of the inverse QFT: the forward sequence reversed, with
/// every phase negated.
pub fn inverse_qft_gates(qubits: &[QubitId], swap: bool) -> Vec<Gate> {
    let n = qubits.len();
    let mut gates = Vec::with_capacity(n * (n + 1) / 2 + n / 2);

    if swap {
        gates.extend(bit_reversal(qubits));
    }
    for i in 0..n {
        for k in 0..i {
            gates.push(Gate::CPhase {
                control: qubits[k],
                target: qubits[i],
                theta: -rk(i, k),
            });
        }
        gates.push(Gate::H(qubits[i]));
    }
    gates
}

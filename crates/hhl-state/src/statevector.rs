//! Statevector simulation engine.

use num_complex::Complex64;
use tracing::trace;

use crate::error::{StateError, StateResult};
use crate::gate::Gate;
use crate::qft::{inverse_qft_gates, qft_gates};
use crate::register::QubitId;
use crate::unitary::Unitary2x2;

/// Forced outcomes with less probability mass than this are rejected.
pub const MIN_OUTCOME_PROBABILITY: f64 = 1e-12;

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

/// Apply `gate` to a copy of `state`, leaving the input untouched.
pub fn transition(state: &Statevector, gate: &Gate) -> StateResult<Statevector> {
    let mut next = state.clone();
    next.apply(gate)?;
    Ok(next)
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index % size] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Build a state from raw amplitudes; the length must be a power of two.
    ///
    /// The amplitudes are taken as given (not renormalized).
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> StateResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(StateError::DimensionMismatch(format!(
                "statevector length {len} is not a power of two"
            )));
        }
        Ok(Self {
            amplitudes,
            num_qubits: len.trailing_zeros() as usize,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// All amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Euclidean norm of the state.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }

    /// Apply a gate to the statevector.
    pub fn apply(&mut self, gate: &Gate) -> StateResult<()> {
        self.check_operands(gate)?;
        trace!(gate = gate.name(), qubits = ?gate.qubits(), "apply");

        match gate {
            Gate::H(q) => self.apply_1q(*q, &Unitary2x2::h()),
            Gate::X(q) => self.apply_x(*q),
            Gate::Ry { qubit, theta } => self.apply_1q(*qubit, &Unitary2x2::ry(*theta)),
            Gate::Phase { qubit, theta } => self.apply_phase(*qubit, *theta),
            Gate::Swap(a, b) => self.apply_swap(*a, *b),
            Gate::CPhase {
                control,
                target,
                theta,
            } => self.apply_cp(*control, *target, *theta),
            Gate::CRy {
                control,
                target,
                theta,
            } => self.apply_controlled(*control, *target, &Unitary2x2::ry(*theta)),
            Gate::ControlledUnitary {
                control,
                target,
                matrix,
            } => self.apply_controlled(*control, *target, matrix),
            Gate::Qft { qubits, swap } => {
                for g in qft_gates(qubits, *swap) {
                    self.apply(&g)?;
                }
            }
            Gate::InverseQft { qubits, swap } => {
                for g in inverse_qft_gates(qubits, *swap) {
                    self.apply(&g)?;
                }
            }
        }
        Ok(())
    }

    fn check_operands(&self, gate: &Gate) -> StateResult<()> {
        let qubits = gate.qubits();
        for (i, q) in qubits.iter().enumerate() {
            if q.index() >= self.num_qubits {
                return Err(StateError::QubitOutOfRange {
                    qubit: *q,
                    num_qubits: self.num_qubits,
                    gate_name: Some(gate.name().to_string()),
                });
            }
            if qubits[..i].contains(q) {
                return Err(StateError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    fn apply_1q(&mut self, qubit: QubitId, u: &Unitary2x2) {
        let mask = qubit.mask();
        let [m00, m01, m10, m11] = u.data;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m00 * a + m01 * b;
                self.amplitudes[j] = m10 * a + m11 * b;
            }
        }
    }

    fn apply_x(&mut self, qubit: QubitId) {
        let mask = qubit.mask();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_phase(&mut self, qubit: QubitId, theta: f64) {
        let mask = qubit.mask();
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: QubitId, q2: QubitId) {
        let mask1 = q1.mask();
        let mask2 = q2.mask();
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cp(&mut self, control: QubitId, target: QubitId, theta: f64) {
        let both = control.mask() | target.mask();
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp *= phase;
            }
        }
    }

    fn apply_controlled(&mut self, control: QubitId, target: QubitId, u: &Unitary2x2) {
        let ctrl_mask = control.mask();
        let tgt_mask = target.mask();
        let [m00, m01, m10, m11] = u.data;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m00 * a + m01 * b;
                self.amplitudes[j] = m10 * a + m11 * b;
            }
        }
    }

    // =========================================================================
    // Measurement and introspection
    // =========================================================================

    /// Probability mass of the subspace where `qubit` reads `outcome`.
    pub fn probability(&self, qubit: QubitId, outcome: u8) -> StateResult<f64> {
        let want = self.outcome_mask(qubit, outcome)?;
        let mask = qubit.mask();
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask == want)
            .map(|(_, a)| a.norm_sqr())
            .sum())
    }

    /// Force `qubit` to `outcome`: project onto that subspace and renormalize.
    ///
    /// Returns the probability mass that was in the subspace. If it is below
    /// [`MIN_OUTCOME_PROBABILITY`] the state is left untouched and
    /// [`StateError::ZeroAmplitudeOutcome`] is returned.
    pub fn measure_forced(&mut self, qubit: QubitId, outcome: u8) -> StateResult<f64> {
        let probability = self.probability(qubit, outcome)?;
        if probability < MIN_OUTCOME_PROBABILITY {
            return Err(StateError::ZeroAmplitudeOutcome {
                qubit,
                outcome,
                probability,
            });
        }

        let mask = qubit.mask();
        let want = if outcome == 1 { mask } else { 0 };
        let scale = 1.0 / probability.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == want {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        Ok(probability)
    }

    fn outcome_mask(&self, qubit: QubitId, outcome: u8) -> StateResult<usize> {
        if qubit.index() >= self.num_qubits {
            return Err(StateError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: Some("measure".into()),
            });
        }
        match outcome {
            0 => Ok(0),
            1 => Ok(qubit.mask()),
            other => Err(StateError::InvalidOutcome(other)),
        }
    }

    /// Basis-state indices whose amplitude magnitude exceeds `threshold`,
    /// in ascending order.
    pub fn significant(&self, threshold: f64) -> Vec<usize> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm() > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Convert a basis index to a bitstring, qubit 0 leftmost.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
            .chars()
            .rev()
            .collect()
    }

    /// Human-readable lines for every significant basis state.
    pub fn dump(&self, threshold: f64) -> Vec<String> {
        self.significant(threshold)
            .into_iter()
            .map(|i| {
                let a = self.amplitudes[i];
                format!(
                    "|{}> ({:>2}): {:+.4}{:+.4}i  p={:.4}",
                    self.outcome_to_bitstring(i),
                    i,
                    a.re,
                    a.im,
                    a.norm_sqr()
                )
            })
            .collect()
    }
}

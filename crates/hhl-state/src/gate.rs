//! Gates understood by the statevector engine.

use serde::{Deserialize, Serialize};

use crate::register::QubitId;
use crate::unitary::Unitary2x2;

/// A gate with its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate.
    H(QubitId),
    /// Pauli-X (bit flip) gate.
    X(QubitId),
    /// Rotation around the Y axis.
    Ry {
        /// Target qubit.
        qubit: QubitId,
        /// Rotation angle.
        theta: f64,
    },
    /// Phase gate P(θ) = diag(1, e^{iθ}).
    Phase {
        /// Target qubit.
        qubit: QubitId,
        /// Phase angle.
        theta: f64,
    },
    /// SWAP gate.
    Swap(QubitId, QubitId),
    /// Controlled phase gate.
    CPhase {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
        /// Phase angle.
        theta: f64,
    },
    /// Controlled Y rotation.
    CRy {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
        /// Rotation angle.
        theta: f64,
    },
    /// Arbitrary single-qubit matrix applied when `control` is |1⟩.
    ControlledUnitary {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
        /// Matrix applied to the target.
        matrix: Unitary2x2,
    },
    /// Quantum Fourier transform over a little-endian register.
    Qft {
        /// Register qubits, least significant first.
        qubits: Vec<QubitId>,
        /// Reverse the bit order at the end.
        swap: bool,
    },
    /// Inverse quantum Fourier transform over a little-endian register.
    InverseQft {
        /// Register qubits, least significant first.
        qubits: Vec<QubitId>,
        /// Reverse the bit order first.
        swap: bool,
    },
}

impl Gate {
    /// Short lowercase gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Ry { .. } => "ry",
            Gate::Phase { .. } => "p",
            Gate::Swap(_, _) => "swap",
            Gate::CPhase { .. } => "cp",
            Gate::CRy { .. } => "cry",
            Gate::ControlledUnitary { .. } => "cu",
            Gate::Qft { .. } => "qft",
            Gate::InverseQft { .. } => "iqft",
        }
    }

    /// Operands in order (controls first).
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q) | Gate::X(q) => vec![*q],
            Gate::Ry { qubit, .. } | Gate::Phase { qubit, .. } => vec![*qubit],
            Gate::Swap(a, b) => vec![*a, *b],
            Gate::CPhase {
                control, target, ..
            }
            | Gate::CRy {
                control, target, ..
            }
            | Gate::ControlledUnitary {
                control, target, ..
            } => vec![*control, *target],
            Gate::Qft { qubits, .. } | Gate::InverseQft { qubits, .. } => qubits.clone(),
        }
    }

    /// The adjoint gate.
    ///
    /// - H† = H, X† = X, SWAP† = SWAP
    /// - rotations and phases: negate the angle
    /// - controlled unitary: dagger the matrix
    /// - QFT† = inverse QFT with the same swap setting
    pub fn inverse(&self) -> Gate {
        match self {
            // Self-inverse gates
            Gate::H(_) | Gate::X(_) | Gate::Swap(_, _) => self.clone(),

            Gate::Ry { qubit, theta } => Gate::Ry {
                qubit: *qubit,
                theta: -theta,
            },
            Gate::Phase { qubit, theta } => Gate::Phase {
                qubit: *qubit,
                theta: -theta,
            },
            Gate::CPhase {
                control,
                target,
                theta,
            } => Gate::CPhase {
                control: *control,
                target: *target,
                theta: -theta,
            },
            Gate::CRy {
                control,
                target,
                theta,
            } => Gate::CRy {
                control: *control,
                target: *target,
                theta: -theta,
            },
            Gate::ControlledUnitary {
                control,
                target,
                matrix,
            } => Gate::ControlledUnitary {
                control: *control,
                target: *target,
                matrix: matrix.dagger(),
            },
            Gate::Qft { qubits, swap } => Gate::InverseQft {
                qubits: qubits.clone(),
                swap: *swap,
            },
            Gate::InverseQft { qubits, swap } => Gate::Qft {
                qubits: qubits.clone(),
                swap: *swap,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_inverse() {
        let h = Gate::H(QubitId(0));
        assert_eq!(h.inverse(), h);
        let s = Gate::Swap(QubitId(0), QubitId(1));
        assert_eq!(s.inverse(), s);
    }

    #[test]
    fn test_rotation_inverse_negates() {
        let g = Gate::CRy {
            control: QubitId(1),
            target: QubitId(3),
            theta: 0.25,
        };
        match g.inverse() {
            Gate::CRy { theta, .. } => assert!((theta + 0.25).abs() < 1e-15),
            other => panic!("unexpected inverse {other:?}"),
        }
    }

    #[test]
    fn test_qft_inverse_roundtrips() {
        let g = Gate::Qft {
            qubits: vec![QubitId(1), QubitId(2)],
            swap: true,
        };
        assert_eq!(g.inverse().name(), "iqft");
        assert_eq!(g.inverse().inverse(), g);
    }

    #[test]
    fn test_operand_order() {
        let g = Gate::ControlledUnitary {
            control: QubitId(2),
            target: QubitId(0),
            matrix: Unitary2x2::identity(),
        };
        assert_eq!(g.qubits(), vec![QubitId(2), QubitId(0)]);
        assert_eq!(g.name(), "cu");
    }
}

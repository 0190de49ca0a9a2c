//! Error types for the state crate.

use crate::register::QubitId;
use thiserror::Error;

/// Errors that can occur while building operators or evolving a statevector.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    /// A gate addresses a qubit the state does not have.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit state{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the statevector.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Matrix or vector shapes do not line up.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A register initial value does not fit into its width.
    #[error("Initial value {value} does not fit in register '{name}' of width {width}")]
    InitialValueOutOfRange {
        /// Register name.
        name: String,
        /// Register width in qubits.
        width: u32,
        /// Requested initial value.
        value: u64,
    },

    /// A forced measurement outcome carries (almost) no probability mass.
    #[error("Outcome {outcome} on qubit {qubit} has negligible probability {probability:e}")]
    ZeroAmplitudeOutcome {
        /// Measured qubit.
        qubit: QubitId,
        /// Forced outcome (0 or 1).
        outcome: u8,
        /// Probability mass found in that subspace.
        probability: f64,
    },

    /// Requested measurement outcome is not a bit.
    #[error("Measurement outcome must be 0 or 1, got {0}")]
    InvalidOutcome(u8),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;

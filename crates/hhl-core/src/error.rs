//! Error types for the HHL pipeline.

use hhl_state::{QubitId, StateError};
use thiserror::Error;

/// Errors produced while planning, building, running or verifying an HHL
/// circuit. All of them end the scenario in progress.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HhlError {
    /// Input does not satisfy a precondition (e.g. A is not Hermitian).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An eigenvalue is zero, so the evolution time is undefined.
    #[error("Degenerate spectrum: eigenvalues ({w0}, {w1}) leave the evolution time undefined")]
    DegenerateSpectrum {
        /// Smaller eigenvalue.
        w0: f64,
        /// Larger eigenvalue.
        w1: f64,
    },

    /// The rotation constant exceeds a scaled eigenvalue, so the
    /// arcsine argument leaves [-1, 1].
    #[error("Rotation constant {constant} exceeds |lam| for lam = {lam:?}")]
    RotationOutOfRange {
        /// The rotation normalisation constant C.
        constant: f64,
        /// The scaled eigenvalues.
        lam: [f64; 2],
    },

    /// A forced measurement outcome has negligible probability.
    #[error("Outcome {outcome} on qubit {qubit} has negligible probability {probability:e}")]
    ZeroAmplitudeOutcome {
        /// Measured qubit.
        qubit: QubitId,
        /// Forced outcome.
        outcome: u8,
        /// Probability mass found.
        probability: f64,
    },

    /// A numerical self-check exceeded its tolerance.
    #[error("Numerical instability in {what}: error {error:e} exceeds tolerance {tolerance:e}")]
    NumericalInstability {
        /// The quantity that was checked.
        what: &'static str,
        /// Observed error.
        error: f64,
        /// Allowed error.
        tolerance: f64,
    },

    /// Quantum and classical solution ratios disagree.
    #[error("Verification failed at component {index}: classical ratio {classical:.6}, quantum ratio {quantum:.6}")]
    VerificationFailed {
        /// Solution component compared against component 0.
        index: usize,
        /// Classical |x_i|²/|x_0|².
        classical: f64,
        /// Quantum ψ_i²/ψ_0².
        quantum: f64,
    },

    /// Any other substrate failure.
    #[error("State error: {0}")]
    State(StateError),

    /// Configuration or scenario file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StateError> for HhlError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::ZeroAmplitudeOutcome {
                qubit,
                outcome,
                probability,
            } => HhlError::ZeroAmplitudeOutcome {
                qubit,
                outcome,
                probability,
            },
            other => HhlError::State(other),
        }
    }
}

/// Result type for HHL pipeline operations.
pub type HhlResult<T> = Result<T, HhlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amplitude_is_lifted() {
        let err: HhlError = StateError::ZeroAmplitudeOutcome {
            qubit: QubitId(3),
            outcome: 1,
            probability: 0.0,
        }
        .into();
        assert!(matches!(err, HhlError::ZeroAmplitudeOutcome { .. }));
    }

    #[test]
    fn test_other_state_errors_wrapped() {
        let err: HhlError = StateError::InvalidOutcome(7).into();
        assert!(matches!(err, HhlError::State(StateError::InvalidOutcome(7))));
    }
}

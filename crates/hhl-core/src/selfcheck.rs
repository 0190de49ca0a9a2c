//! Sanity check of the rotation gate the ancilla relies on.

use hhl_state::{Gate, QubitId, Statevector};
use num_complex::Complex64;
use tracing::debug;

use crate::error::{HhlError, HhlResult};

const ROTATION_TOLERANCE: f64 = 1e-9;

/// Apply `Ry(theta)` to |0> and confirm the amplitudes are
/// `(cos θ/2, sin θ/2)`.
pub fn check_rotate_ry(theta: f64) -> HhlResult<()> {
    let mut state = Statevector::new(1);
    state.apply(&Gate::Ry {
        qubit: QubitId(0),
        theta,
    })?;

    let expected = [
        Complex64::new((theta / 2.0).cos(), 0.0),
        Complex64::new((theta / 2.0).sin(), 0.0),
    ];
    let error = state
        .amplitudes()
        .iter()
        .zip(expected.iter())
        .map(|(a, e)| (a - e).norm())
        .fold(0.0_f64, |acc, d| {
            if acc.is_nan() || d.is_nan() {
                f64::NAN
            } else {
                acc.max(d)
            }
        });
    if !(error <= ROTATION_TOLERANCE) {
        return Err(HhlError::NumericalInstability {
            what: "ry rotation",
            error,
            tolerance: ROTATION_TOLERANCE,
        });
    }
    debug!(theta, "ry rotation check passed");
    Ok(())
}

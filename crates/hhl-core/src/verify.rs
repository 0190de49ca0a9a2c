//! Comparison of the simulated solution with the classical one.
//!
//! Only ratios relative to component 0 are compared: the post-selected
//! state is proportional to `x`, not equal to it.

use hhl_state::{Operator, Statevector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HhlError, HhlResult};

/// Both ratio lists of a successful verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// `|x_i|² / |x_0|²` for `i ≥ 1`.
    pub classical: Vec<f64>,
    /// `Re(ψ[res_j]² / ψ[res_0]²)` for `j ≥ 1`.
    pub quantum: Vec<f64>,
}

/// Solve `A·x = b` and return `Re(x_i·x̄_i / x_0·x̄_0)` for `i ≥ 1`.
pub fn classical_ratios(a: &Operator, b: &Operator) -> HhlResult<Vec<f64>> {
    let x = a
        .solve(b)
        .ok_or_else(|| HhlError::InvalidInput("A is singular or does not match b".into()))?;
    let x = x.entries();
    let x0 = x[0] * x[0].conj();
    Ok(x[1..].iter().map(|xi| ((xi * xi.conj()) / x0).re).collect())
}

/// Ratios `Re(ψ[res_j]² / ψ[res_0]²)` over the basis states whose amplitude
/// magnitude exceeds `threshold`, in index order.
pub fn quantum_ratios(state: &Statevector, threshold: f64) -> Vec<f64> {
    let res = state.significant(threshold);
    let Some((&first, rest)) = res.split_first() else {
        return Vec::new();
    };
    let psi0 = state.amplitude(first);
    let psi0_sq = psi0 * psi0;
    rest.iter()
        .map(|&j| {
            let psi = state.amplitude(j);
            (psi * psi / psi0_sq).re
        })
        .collect()
}

/// Check the final state against the classical solution of `A·x = b`.
///
/// See [`compare_ratios`] for the matching rule.
pub fn verify(
    state: &Statevector,
    a: &Operator,
    b: &Operator,
    threshold: f64,
    tol: f64,
) -> HhlResult<Verification> {
    let classical = classical_ratios(a, b)?;
    let quantum = quantum_ratios(state, threshold);
    compare_ratios(&classical, &quantum, tol)?;
    Ok(Verification { classical, quantum })
}

/// Match each classical ratio with the quantum ratio at the same position
/// within the absolute tolerance `tol`.
///
/// A missing quantum ratio (fewer significant amplitudes than solution
/// components) counts as NaN and fails.
pub fn compare_ratios(classical: &[f64], quantum: &[f64], tol: f64) -> HhlResult<()> {
    for (i, &c) in classical.iter().enumerate() {
        let q = quantum.get(i).copied().unwrap_or(f64::NAN);
        debug!(index = i + 1, classical = c, quantum = q, "comparing ratios");
        // NaN never passes
        if !((c - q).abs() <= tol) {
            return Err(HhlError::VerificationFailed {
                index: i + 1,
                classical: c,
                quantum: q,
            });
        }
    }
    Ok(())
}

//! Evolution time and eigenvalue scaling.
//!
//! With `N = dim²` the phase picked up by eigenvector `i` under
//! `U = exp(i·A·t)` is `w[i]·t = 2π·lam[i]/N`, so phase estimation reads out
//! `lam[i]`. Choosing
//!
//!   t = (w[1] / w[0]) / N / w[1] · 2π
//!
//! makes `lam[0] = 1` and `lam[1] = w[1] / w[0]`, which are integers for the
//! well-conditioned two-eigenvalue systems this pipeline targets.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{HhlError, HhlResult};

/// Eigenvalues closer to zero than this make the time undefined.
const ZERO_EIGENVALUE: f64 = 1e-12;

/// Slack allowed when comparing the rotation constant with `|lam|`.
const ROTATION_SLACK: f64 = 1e-12;

/// Derived circuit parameters for one (A, b) scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Evolution time.
    pub t: f64,
    /// Scaled eigenvalues `N·w[i]·t / 2π`.
    pub lam: [f64; 2],
    /// `w[1] / w[0]`.
    pub ratio: f64,
    /// Rotation constant: the smallest scaled eigenvalue.
    pub c: f64,
}

impl Parameters {
    /// Nearest integer to each scaled eigenvalue, ties to even.
    pub fn rounded_lam(&self) -> [i64; 2] {
        self.lam.map(|l| l.round_ties_even() as i64)
    }
}

/// Derive `t`, the scaled eigenvalues and the rotation constant from the
/// ascending eigenvalues of a 2x2 matrix.
pub fn plan_parameters(w: &[f64]) -> HhlResult<Parameters> {
    let [w0, w1] = <[f64; 2]>::try_from(w).map_err(|_| {
        HhlError::InvalidInput(format!("expected exactly 2 eigenvalues, got {}", w.len()))
    })?;
    if w0.abs() < ZERO_EIGENVALUE || w1.abs() < ZERO_EIGENVALUE {
        return Err(HhlError::DegenerateSpectrum { w0, w1 });
    }

    let dim = w.len() as f64;
    let n = dim * dim;
    let ratio = w1 / w0;
    let t = ratio / n / w1 * 2.0 * PI;
    let lam = [w0, w1].map(|wi| n * wi * t / (2.0 * PI));
    let c = lam[0].min(lam[1]);

    let min_abs = lam[0].abs().min(lam[1].abs());
    if !(c.abs() <= min_abs + ROTATION_SLACK) {
        return Err(HhlError::RotationOutOfRange { constant: c, lam });
    }

    debug!(t, ?lam, ratio, c, "planned parameters");
    Ok(Parameters { t, lam, ratio, c })
}

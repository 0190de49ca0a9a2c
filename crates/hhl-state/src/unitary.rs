//! Single-qubit gate matrices.
//!
//! The controlled-unitary gate used for phase estimation carries its matrix
//! as a [`Unitary2x2`]; Hadamard and Y rotations are built from the same
//! type so every single-qubit action goes through one kernel.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// `f64::max` that keeps NaN instead of dropping it.
pub(crate) fn max_keep_nan(acc: f64, x: f64) -> f64 {
    if acc.is_nan() || x.is_nan() {
        f64::NAN
    } else {
        acc.max(x)
    }
}

/// A 2x2 complex matrix, row-major: `[[a, b], [c, d]]` is stored as
/// `[a, b, c, d]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unitary2x2 {
    /// Entries in row-major order.
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Build from the four entries `[[a, b], [c, d]]`.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Identity.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Hadamard.
    pub fn h() -> Self {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Pauli-X.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// `Ry(θ) = [[cos θ/2, −sin θ/2], [sin θ/2, cos θ/2]]`.
    pub fn ry(theta: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// Largest entrywise distance to `other`; NaN if any entry is NaN.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, max_keep_nan)
    }
}

impl Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = rhs.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }
}

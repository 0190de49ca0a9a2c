//! Time evolution `U = exp(i·A·t)` built from the spectral decomposition.

use hhl_state::Operator;
use num_complex::Complex64;
use tracing::debug;

use crate::error::{HhlError, HhlResult};

/// Build `U = v · diag(e^{i·w[j]·t}) · v†`.
///
/// The result is checked to be unitary within `tol`; a larger error means
/// `v` was not orthonormal and fails with
/// [`HhlError::NumericalInstability`].
pub fn build_unitary(w: &[f64], v: &Operator, t: f64, tol: f64) -> HhlResult<Operator> {
    if v.dim() != Some(w.len()) {
        return Err(HhlError::InvalidInput(format!(
            "{} eigenvalues do not match a {}x{} eigenvector matrix",
            w.len(),
            v.rows(),
            v.cols()
        )));
    }

    let phases: Vec<Complex64> = w.iter().map(|&wj| Complex64::from_polar(1.0, wj * t)).collect();
    let d = Operator::diagonal(&phases);
    let u = v.matmul(&d)?.matmul(&v.adjoint())?;

    let error = u.unitarity_error().unwrap_or(f64::INFINITY);
    if !(error <= tol) {
        return Err(HhlError::NumericalInstability {
            what: "time-evolution unitarity",
            error,
            tolerance: tol,
        });
    }
    debug!(t, unitarity_error = error, "built time-evolution operator");
    Ok(u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_basis_gives_diagonal() {
        let u = build_unitary(&[1.0, 2.0], &Operator::identity(2), PI / 2.0, 1e-9).unwrap();
        assert!((u.get(0, 0) - Complex64::new(0.0, 1.0)).norm() < 1e-12);
        assert!((u.get(1, 1) - Complex64::new(-1.0, 0.0)).norm() < 1e-12);
        assert!(u.get(0, 1).norm() < 1e-12);
    }

    #[test]
    fn test_eigenvectors_are_eigenvectors_of_u() {
        let s = 1.0 / 2.0_f64.sqrt();
        let v = Operator::from_real_rows(&[vec![s, s], vec![s, -s]]).unwrap();
        let w = [0.5, 1.5];
        let t = 0.7;
        let u = build_unitary(&w, &v, t, 1e-9).unwrap();
        for (j, &wj) in w.iter().enumerate() {
            let col = v.column_at(j);
            let uv = u.matmul(&col).unwrap();
            let expected = col.scale(Complex64::from_polar(1.0, wj * t));
            assert!(uv.max_abs_diff(&expected).unwrap() < 1e-12);
        }
    }

    #[test]
    fn test_non_orthonormal_basis_rejected() {
        let v = Operator::from_real_rows(&[vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap();
        let err = build_unitary(&[1.0, 2.0], &v, 1.0, 1e-9).unwrap_err();
        assert!(matches!(err, HhlError::NumericalInstability { .. }));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = build_unitary(&[1.0], &Operator::identity(2), 1.0, 1e-9).unwrap_err();
        assert!(matches!(err, HhlError::InvalidInput(_)));
    }
}

//! Sorted spectral decomposition of the system matrix.

use hhl_state::Operator;
use num_complex::Complex64;
use tracing::debug;

use crate::error::{HhlError, HhlResult};

/// Eigenvalues in ascending order with matching eigenvector columns.
///
/// Invariant: `A·v[:,i] = w[i]·v[:,i]` and the columns of `v` are
/// orthonormal.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Ascending real eigenvalues.
    pub w: Vec<f64>,
    /// Eigenvectors as columns, `v[:, i]` belongs to `w[i]`.
    pub v: Operator,
}

impl EigenDecomposition {
    /// Eigenvector for `w[i]` as a column operator.
    pub fn vector(&self, i: usize) -> Operator {
        self.v.column_at(i)
    }
}

/// Compute the eigenvalues and eigenvectors of a Hermitian matrix, sorted
/// by ascending eigenvalue.
///
/// `hermitian_tol` bounds `|A − A†|` entrywise; a non-finite or
/// non-Hermitian input fails with [`HhlError::InvalidInput`]. The decomposition is then checked
/// against `eigen_tol` (residual `A·v − w·v` and orthonormality of `v`),
/// failing with [`HhlError::NumericalInstability`].
pub fn compute_eigen(
    a: &Operator,
    hermitian_tol: f64,
    eigen_tol: f64,
) -> HhlResult<EigenDecomposition> {
    if !a.is_finite() {
        return Err(HhlError::InvalidInput("A has a NaN or infinite entry".into()));
    }
    if !a.is_hermitian(hermitian_tol) {
        return Err(HhlError::InvalidInput(format!(
            "A must be Hermitian (got a {}x{} matrix with A != A^dagger)",
            a.rows(),
            a.cols()
        )));
    }

    let raw = a.eigh()?;
    let n = raw.values.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| raw.values[i].total_cmp(&raw.values[j]));

    // Hermitian input guarantees real eigenvalues; the solver already
    // returns only their real part.
    let w: Vec<f64> = order.iter().map(|&i| raw.values[i]).collect();
    let columns: Vec<Vec<Complex64>> = order
        .iter()
        .map(|&i| raw.vectors.column_at(i).entries())
        .collect();
    let rows: Vec<Vec<Complex64>> = (0..n)
        .map(|r| columns.iter().map(|col| col[r]).collect())
        .collect();
    let v = Operator::from_rows(rows)?;

    let eig = EigenDecomposition { w, v };
    check_decomposition(a, &eig, eigen_tol)?;
    debug!(w = ?eig.w, "sorted eigenvalues");
    Ok(eig)
}

fn check_decomposition(a: &Operator, eig: &EigenDecomposition, tol: f64) -> HhlResult<()> {
    for (i, &w) in eig.w.iter().enumerate() {
        let v = eig.vector(i);
        let av = a.matmul(&v)?;
        let residual = av.max_abs_diff(&v.scale(Complex64::new(w, 0.0)))?;
        if !(residual <= tol) {
            return Err(HhlError::NumericalInstability {
                what: "eigen residual",
                error: residual,
                tolerance: tol,
            });
        }
    }

    let n = eig.w.len();
    let gram = eig.v.adjoint().matmul(&eig.v)?;
    let ortho = gram.max_abs_diff(&Operator::identity(n))?;
    if !(ortho <= tol) {
        return Err(HhlError::NumericalInstability {
            what: "eigenvector orthonormality",
            error: ortho,
            tolerance: tol,
        });
    }
    Ok(())
}

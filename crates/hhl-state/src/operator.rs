//! Dense complex operators.
//!
//! [`Operator`] is an immutable complex matrix with an explicit shape. It is
//! used for the system matrix `A`, the time-evolution unitary `U` and, as a
//! single column, for vectors such as `b` and the classical solution `x`.

use nalgebra::DMatrix;
use num_complex::Complex64;
use std::fmt;
use std::ops::Mul;

use crate::error::{StateError, StateResult};
use crate::unitary::{Unitary2x2, max_keep_nan};

/// An immutable dense complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    m: DMatrix<Complex64>,
}

/// Eigenpairs of a Hermitian operator, in the order the solver produced them.
#[derive(Debug, Clone)]
pub struct RawEigen {
    /// Real eigenvalues.
    pub values: Vec<f64>,
    /// Eigenvectors as columns, matching `values` index by index.
    pub vectors: Operator,
}

impl Operator {
    /// Build an operator from rows of complex entries.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> StateResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows == 0 || ncols == 0 {
            return Err(StateError::DimensionMismatch(
                "operator must have at least one row and column".into(),
            ));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != ncols) {
            return Err(StateError::DimensionMismatch(format!(
                "row {bad} has {} entries, expected {ncols}",
                rows[bad].len()
            )));
        }
        let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
        Ok(Self {
            m: DMatrix::from_row_slice(nrows, ncols, &flat),
        })
    }

    /// Build an operator from rows of real entries.
    pub fn from_real_rows(rows: &[Vec<f64>]) -> StateResult<Self> {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&x| Complex64::new(x, 0.0)).collect())
                .collect(),
        )
    }

    /// Build a column operator (a vector).
    pub fn column(entries: &[Complex64]) -> StateResult<Self> {
        if entries.is_empty() {
            return Err(StateError::DimensionMismatch("empty column".into()));
        }
        Ok(Self {
            m: DMatrix::from_column_slice(entries.len(), 1, entries),
        })
    }

    /// Build a column operator from real entries.
    pub fn from_real_column(entries: &[f64]) -> StateResult<Self> {
        let c: Vec<Complex64> = entries.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        Self::column(&c)
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self {
            m: DMatrix::identity(n, n),
        }
    }

    /// A diagonal operator with the given entries.
    pub fn diagonal(entries: &[Complex64]) -> Self {
        let n = entries.len();
        let mut m = DMatrix::from_element(n, n, Complex64::new(0.0, 0.0));
        for (i, &e) in entries.iter().enumerate() {
            m[(i, i)] = e;
        }
        Self { m }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.m.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.m.ncols()
    }

    /// Side length of a square operator, `None` otherwise.
    pub fn dim(&self) -> Option<usize> {
        (self.rows() == self.cols()).then_some(self.rows())
    }

    /// Entry at `(row, col)`. Panics when out of bounds, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.m[(row, col)]
    }

    /// Column `col` as a new column operator.
    pub fn column_at(&self, col: usize) -> Operator {
        let entries: Vec<Complex64> = self.m.column(col).iter().copied().collect();
        Self {
            m: DMatrix::from_column_slice(self.rows(), 1, &entries),
        }
    }

    /// Entries of a column operator, top to bottom.
    pub fn entries(&self) -> Vec<Complex64> {
        self.m.iter().copied().collect()
    }

    /// Matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Operator) -> StateResult<Operator> {
        if self.cols() != rhs.rows() {
            return Err(StateError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows(),
                self.cols(),
                rhs.rows(),
                rhs.cols()
            )));
        }
        Ok(Self { m: &self.m * &rhs.m })
    }

    /// Scale every entry by a complex factor.
    pub fn scale(&self, factor: Complex64) -> Operator {
        Self {
            m: self.m.map(|z| z * factor),
        }
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Operator {
        Self {
            m: self.m.adjoint(),
        }
    }

    /// `self · self`.
    pub fn squared(&self) -> StateResult<Operator> {
        self.matmul(self)
    }

    /// Largest entry of `|self − other|`; shapes must match. NaN if any
    /// entry is NaN, so tolerance checks written as `d <= tol` reject it.
    pub fn max_abs_diff(&self, other: &Operator) -> StateResult<f64> {
        if self.m.shape() != other.m.shape() {
            return Err(StateError::DimensionMismatch(format!(
                "cannot compare {:?} with {:?}",
                self.m.shape(),
                other.m.shape()
            )));
        }
        Ok((&self.m - &other.m)
            .iter()
            .map(|z| z.norm())
            .fold(0.0_f64, max_keep_nan))
    }

    /// True if every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|z| z.is_finite())
    }

    /// True if the operator is square and equals its conjugate transpose
    /// within `tol` (entrywise).
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.dim().is_some()
            && self
                .max_abs_diff(&self.adjoint())
                .is_ok_and(|diff| diff <= tol)
    }

    /// Largest entry of `|U·U† − I|`, or `None` for a non-square operator.
    pub fn unitarity_error(&self) -> Option<f64> {
        let n = self.dim()?;
        let prod = Self {
            m: &self.m * self.m.adjoint(),
        };
        prod.max_abs_diff(&Self::identity(n)).ok()
    }

    /// True if `U·U† = I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        self.unitarity_error().is_some_and(|e| e <= tol)
    }

    /// Eigen-decomposition of a Hermitian operator.
    ///
    /// Only the lower triangle is read, so the caller must check
    /// [`is_hermitian`](Self::is_hermitian) first. Eigenvalues come back
    /// real and in solver order.
    pub fn eigh(&self) -> StateResult<RawEigen> {
        if self.dim().is_none() {
            return Err(StateError::DimensionMismatch(format!(
                "eigen-decomposition needs a square operator, got {}x{}",
                self.rows(),
                self.cols()
            )));
        }
        let eig = self.m.clone().symmetric_eigen();
        Ok(RawEigen {
            values: eig.eigenvalues.iter().copied().collect(),
            vectors: Self { m: eig.eigenvectors },
        })
    }

    /// Solve `self · x = rhs` by LU decomposition. `None` if singular.
    pub fn solve(&self, rhs: &Operator) -> Option<Operator> {
        if self.dim()? != rhs.rows() {
            return None;
        }
        self.m.clone().lu().solve(&rhs.m).map(|m| Self { m })
    }

    /// Reinterpret a 2x2 operator as a single-qubit gate matrix.
    pub fn as_unitary2x2(&self) -> StateResult<Unitary2x2> {
        if self.dim() != Some(2) {
            return Err(StateError::DimensionMismatch(format!(
                "expected a 2x2 operator, got {}x{}",
                self.rows(),
                self.cols()
            )));
        }
        Ok(Unitary2x2::new(
            self.m[(0, 0)],
            self.m[(0, 1)],
            self.m[(1, 0)],
            self.m[(1, 1)],
        ))
    }
}

impl Mul for &Operator {
    type Output = StateResult<Operator>;

    fn mul(self, rhs: &Operator) -> Self::Output {
        self.matmul(rhs)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            write!(f, "[")?;
            for c in 0..self.cols() {
                let z = self.m[(r, c)];
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}{:+.4}i", z.re, z.im)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(feature = "lapack")]
mod lapack;
#[cfg(not(feature = "lapack"))]
mod self_adjoint;

use crate::DecompositionError;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2, LinalgScalar, ScalarOperand};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;

/// Floating-point element types accepted by the estimators.
///
/// Implemented for `f32` and `f64`.
pub trait Float:
    num_traits::Float
    + FromPrimitive
    + ScalarOperand
    + LinalgScalar
    + fmt::Debug
    + Send
    + Sync
    + Eigh
{
}

impl Float for f32 {}
impl Float for f64 {}

/// Dense symmetric eigen-decomposition for a concrete element type.
///
/// Backed by faer, or by LAPACK's `?syev` when a LAPACK backend feature is
/// enabled.
pub trait Eigh: Sized {
    /// Returns the eigenvalues and a matrix whose columns are the matching
    /// unit eigenvectors. `a` must be square and finite.
    fn eigh(a: Array2<Self>) -> Result<(Array1<Self>, Array2<Self>), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    #[error("{0}")]
    OperationFailure(String),
}

impl From<Error> for DecompositionError {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidLayout(e) => DecompositionError::InvalidInput(e.to_string()),
            Error::OperationFailure(reason) => DecompositionError::LinalgError(reason),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[cfg_attr(not(feature = "lapack"), allow(dead_code))]
    #[error("memory not contiguous")]
    NotContiguous,
    #[error("too many columns: {0}")]
    TooManyColumns(String),
    #[error("too many rows: {0}")]
    TooManyRows(String),
}

/// Computes the sample covariance matrix of already centered data, normalized
/// by `n - 1`.
///
/// A single row yields a division by zero; the resulting NaNs are returned as
/// they are.
pub(crate) fn covariance<A, S>(centered: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: Float,
    S: Data<Elem = A>,
{
    let dof = A::from_usize(centered.nrows().saturating_sub(1)).unwrap_or_else(A::nan);
    centered.t().dot(centered) / dof
}

/// Computes the eigenvalues and eigenvectors of a real symmetric matrix.
///
/// Eigenvectors are returned as the columns of the second element, in the
/// same order as the eigenvalues. No particular order is guaranteed.
///
/// The matrix is divided by its largest absolute entry before decomposition
/// and the eigenvalues are scaled back, so entries near the overflow
/// threshold of `A` do not overflow inside the solver. A matrix with any NaN
/// or infinite entry is not decomposed: every eigenvalue and eigenvector
/// entry is NaN.
pub(crate) fn eigh<A: Float>(mut a: Array2<A>) -> Result<(Array1<A>, Array2<A>), Error> {
    if !a.is_square() {
        let reason = if a.nrows() > a.ncols() {
            LayoutError::TooManyRows("more rows than columns".to_string())
        } else {
            LayoutError::TooManyColumns("more columns than rows".to_string())
        };
        return Err(Error::InvalidLayout(reason));
    }
    let n = a.nrows();
    if a.iter().any(|e| !e.is_finite()) {
        log::debug!("non-finite entries in the {0}x{0} matrix; eigenpairs are NaN", n);
        return Ok((Array1::from_elem(n, A::nan()), Array2::from_elem((n, n), A::nan())));
    }

    let scale = a.iter().fold(A::zero(), |m, e| m.max(e.abs()));
    if scale > A::zero() {
        a.mapv_inplace(|e| e / scale);
    }
    log::debug!("solving {0}x{0} symmetric eigenproblem", n);
    let (mut values, vectors) = A::eigh(a)?;
    if scale > A::zero() {
        values.mapv_inplace(|v| v * scale);
    }
    Ok((values, vectors))
}

/// Selects the `k` eigenpairs with the largest eigenvalues, in descending
/// order. Eigenvectors are returned as rows.
///
/// The sort is stable: equal eigenvalues keep the order in which the solver
/// returned them. NaN eigenvalues go last.
pub(crate) fn descending<A: Float>(
    eigenvalues: &Array1<A>,
    eigenvectors: &Array2<A>,
    k: usize,
) -> (Array1<A>, Array2<A>) {
    let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (eigenvalues[i], eigenvalues[j]);
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        }
    });
    order.truncate(k);

    let values = order.iter().map(|&i| eigenvalues[i]).collect::<Array1<A>>();
    let mut vectors = Array2::<A>::zeros((order.len(), eigenvectors.nrows()));
    for (mut row, &i) in vectors.rows_mut().into_iter().zip(&order) {
        row.assign(&eigenvectors.column(i));
    }
    (values, vectors)
}

/// Makes the sign of each row deterministic: a row is negated if its entry
/// with the largest absolute value is negative.
pub(crate) fn flip_signs<A: Float>(vectors: &mut Array2<A>) {
    for mut row in vectors.rows_mut() {
        let mut iter = row.iter();
        let mut pivot = if let Some(e) = iter.next() {
            *e
        } else {
            continue;
        };
        for e in iter {
            if e.abs() > pivot.abs() {
                pivot = *e;
            }
        }
        if pivot < A::zero() {
            row.mapv_inplace(|e| -e);
        }
    }
}

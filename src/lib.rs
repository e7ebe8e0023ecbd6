//! Principal component analysis through eigen-decomposition of the sample
//! covariance matrix.
//!
//! The symmetric eigen-solver is faer's self-adjoint eigen-decomposition
//! unless one of the LAPACK backend features (`intel-mkl`, `netlib` or `openblas`) is
//! enabled, in which case `?syev` is used.

#[cfg(feature = "intel-mkl-src")]
extern crate intel_mkl_src as _;
#[cfg(feature = "netlib-src")]
extern crate netlib_src as _;
#[cfg(feature = "openblas-src")]
extern crate openblas_src as _;

mod linalg;
mod pca;
mod scale;

pub use linalg::Float;
pub use pca::{FittedPca, Pca, PcaBuilder};
pub use scale::{MeanCentered, Scale};
use thiserror::Error;

/// The error type for PCA operations.
#[derive(Debug, Error)]
pub enum DecompositionError {
    #[error("the model has not been fitted yet")]
    NotFitted,
    #[error("number of columns should be {expected}, but got {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("number of components ({n_components}) should be between 1 and the number of features ({n_features})")]
    InvalidComponentCount {
        n_components: usize,
        n_features: usize,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("linear algebra operation failed: {0}")]
    LinalgError(String),
}

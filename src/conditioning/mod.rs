//! Explicit numerical conditioning for covariance matrices.
//!
//! Purpose
//! -------
//! Replace the process-global jitter convention with an explicit
//! [`Conditioning`] value that callers thread into matrix assembly:
//! [`Conditioning::stabilize`] symmetrizes a covariance block and adds
//! `jitter·I` so downstream Cholesky/solve steps in the external layers
//! stay positive definite. The module also bridges `ndarray` matrices into
//! `nalgebra` for symmetric eigendecompositions, which the test suites use
//! to assert positive definiteness.
//!
//! Conventions
//! -----------
//! - The default jitter is `1e-8`.
//! - `stabilize` averages `K` with its transpose before adding the jitter,
//!   so tiny floating-point asymmetries from assembly cannot leak into the
//!   eigen/solve routines.
use ndarray::Array2;

/// Errors for conditioning configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditioningError {
    /// Jitter must be finite and non-negative.
    InvalidJitter { value: f64 },
}

impl std::fmt::Display for ConditioningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditioningError::InvalidJitter { value } => {
                write!(f, "Conditioning Error: jitter must be finite and >= 0 (got {})", value)
            }
        }
    }
}

impl std::error::Error for ConditioningError {}

/// Explicit jitter configuration for positive-definite stabilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditioning {
    jitter: f64,
}

impl Default for Conditioning {
    fn default() -> Self {
        Conditioning { jitter: 1e-8 }
    }
}

impl Conditioning {
    /// Build a conditioning configuration with the given jitter.
    ///
    /// # Errors
    /// - `ConditioningError::InvalidJitter` if `jitter` is NaN, ±∞, or < 0.
    pub fn new(jitter: f64) -> Result<Self, ConditioningError> {
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(ConditioningError::InvalidJitter { value: jitter });
        }
        Ok(Conditioning { jitter })
    }

    /// The configured jitter magnitude.
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Symmetrize `k` and add `jitter·I`.
    pub fn stabilize(&self, k: &Array2<f64>) -> Array2<f64> {
        let n = k.nrows();
        let mut out = Array2::zeros((n, k.ncols()));
        for i in 0..n {
            for j in 0..k.ncols() {
                out[[i, j]] = 0.5 * (k[[i, j]] + k[[j, i]]);
            }
            out[[i, i]] += self.jitter;
        }
        out
    }
}

/// Copy a square `ndarray` matrix into a `nalgebra::DMatrix`.
fn fill_dmatrix(k: &Array2<f64>) -> nalgebra::DMatrix<f64> {
    let (rows, cols) = k.dim();
    nalgebra::DMatrix::from_fn(rows, cols, |i, j| k[[i, j]])
}

/// Smallest eigenvalue of a symmetric matrix.
///
/// The input is assumed symmetric; feed assembly output through
/// [`Conditioning::stabilize`] first if that is in doubt.
pub fn min_symmetric_eigenvalue(k: &Array2<f64>) -> f64 {
    let eigen = fill_dmatrix(k).symmetric_eigen();
    eigen.eigenvalues.iter().fold(f64::INFINITY, |acc, &v| acc.min(v))
}

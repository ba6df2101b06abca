//! Errors for covariance-builder batch entry points.
//!
//! The builders themselves are pure closed-form functions; the only failure
//! modes live at the batch boundaries, where coordinate grids supplied by
//! the caller must be non-empty and finite. Problems are reported through
//! [`CovarianceError`] rather than silently coerced into NaN tensors. An
//! alias [`CovarianceResult`] standardizes the return type.

/// Result alias for covariance builders that may produce [`CovarianceError`].
pub type CovarianceResult<T> = Result<T, CovarianceError>;

/// Error type for covariance-tensor batch construction.
#[derive(Debug, Clone, PartialEq)]
pub enum CovarianceError {
    /// A coordinate grid is empty.
    EmptyCoordinateGrid { name: &'static str },

    /// A coordinate value is NaN/±inf.
    NonFiniteCoordinate { name: &'static str, index: usize, value: f64 },
}

impl std::fmt::Display for CovarianceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CovarianceError::EmptyCoordinateGrid { name } => {
                write!(f, "Covariance Error: coordinate grid `{}` is empty", name)
            }
            CovarianceError::NonFiniteCoordinate { name, index, value } => write!(
                f,
                "Covariance Error: coordinate grid `{}` has non-finite value {} at index {}",
                name, value, index
            ),
        }
    }
}

impl std::error::Error for CovarianceError {}

#[cfg(feature = "python-bindings")]
impl From<CovarianceError> for pyo3::PyErr {
    fn from(err: CovarianceError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Check that a coordinate grid is non-empty and finite.
pub(crate) fn validate_grid(
    name: &'static str, grid: ndarray::ArrayView1<f64>,
) -> CovarianceResult<()> {
    if grid.is_empty() {
        return Err(CovarianceError::EmptyCoordinateGrid { name });
    }
    for (index, &value) in grid.iter().enumerate() {
        if !value.is_finite() {
            return Err(CovarianceError::NonFiniteCoordinate { name, index, value });
        }
    }
    Ok(())
}

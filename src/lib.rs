//! gpconv — analytic covariance engine for causal GP convolution models.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the windowed convolution model to Python via the `_gpconv`
//! extension module. The core is a pure mathematical library: closed-form
//! double/triple integrals of causal exponential-decay kernels, a windowed
//! extended-Fourier basis, and the covariance builders that assemble them
//! into the blocks a variational inducing-point/inducing-frequency scheme
//! consumes.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`covariance`, `model`,
//!   `conditioning`) as the public crate surface.
//! - When `python-bindings` is enabled, define the `#[pyclass]` wrapper and
//!   the `#[pymodule]` initializer for the `_gpconv` extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules;
//!   this file performs only FFI glue, input validation, and error
//!   mapping.
//! - Every covariance quantity is recomputed from validated hyperparameters
//!   on each call: there is no mutable state behind the Python surface.
//!
//! Conventions
//! -----------
//! - Matrices cross the FFI boundary as row-major `Vec<Vec<f64>>`; the
//!   thin Python facade is expected to wrap them in arrays.
//! - Errors from core Rust code are propagated as structured error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The external optimization layer drives `model::ConvolutionModel::construct`
//!   with its own `VariationalStore` implementation; training, prediction,
//!   and plotting live outside this crate.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the quadrature cross-check suite in `tests/`.

pub mod conditioning;
pub mod covariance;
pub mod model;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    covariance::basis::beta_matrix,
    model::ConvolutionModel,
    utils::{extract_f64_array, to_nested_vec},
};

/// ConvModel — Python-facing wrapper for the windowed convolution model.
///
/// Purpose
/// -------
/// Expose the [`ConvolutionModel`] covariance accessors to Python callers
/// while preserving the core Rust validation and error handling.
///
/// Key behaviors
/// -------------
/// - Build a validated model from `(window, per, t, n_u, n_z)`.
/// - Provide the kernel matrices (`k_u`, `k_z`, `i_hx`) and the basis
///   matrix as nested lists.
/// - Expose the derived coordinates (`t_u`, window bounds, truncation) as
///   read-only properties.
///
/// Notes
/// -----
/// - Native Rust callers should use [`ConvolutionModel`] directly; this
///   type exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "gpconv")]
pub struct ConvModel {
    /// Underlying Rust model container.
    inner: ConvolutionModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ConvModel {
    #[new]
    #[pyo3(
        text_signature = "(window, per, t, /, n_u=16, n_z=16)",
        signature = (window, per, t, n_u = 16, n_z = 16)
    )]
    pub fn new<'py>(
        py: Python<'py>, window: f64, per: f64, t: &Bound<'py, PyAny>, n_u: usize, n_z: usize,
    ) -> PyResult<Self> {
        let arr = extract_f64_array(py, t)?;
        let times = arr.as_slice().map_err(|_| {
            PyValueError::new_err("t must be a 1-D contiguous float64 array or sequence")
        })?;
        let inner =
            ConvolutionModel::from_data(window, per, Array1::from(times.to_vec()), n_u, n_z)?;
        Ok(ConvModel { inner })
    }

    /// Inducing-point kernel matrix over the inducing grid.
    pub fn k_u(&self) -> Vec<Vec<f64>> {
        to_nested_vec(&self.inner.k_u_matrix())
    }

    /// Basis-coefficient prior matrix.
    pub fn k_z(&self) -> Vec<Vec<f64>> {
        to_nested_vec(&self.inner.k_z_matrix())
    }

    /// Process prior matrix over the observed grid.
    pub fn i_hx(&self) -> PyResult<Vec<Vec<f64>>> {
        Ok(to_nested_vec(&self.inner.i_hx_matrix()?))
    }

    /// Basis matrix over the given offsets (`n_z` rows).
    pub fn basis<'py>(&self, py: Python<'py>, taus: &Bound<'py, PyAny>) -> PyResult<Vec<Vec<f64>>> {
        let arr = extract_f64_array(py, taus)?;
        let offsets = arr.as_slice().map_err(|_| {
            PyValueError::new_err("taus must be a 1-D contiguous float64 array or sequence")
        })?;
        let offsets = Array1::from(offsets.to_vec());
        Ok(to_nested_vec(&beta_matrix(self.inner.hyperparams(), offsets.view())))
    }

    /// Inducing-point locations.
    #[getter]
    pub fn t_u(&self) -> Vec<f64> {
        self.inner.hyperparams().t_u.to_vec()
    }

    /// The latent window `(a, b)`.
    #[getter]
    pub fn window_bounds(&self) -> (f64, f64) {
        let h = self.inner.hyperparams();
        (h.a, h.b)
    }

    /// Largest cosine index.
    #[getter]
    pub fn m_max(&self) -> usize {
        self.inner.hyperparams().m_max
    }

    /// Number of basis indices.
    #[getter]
    pub fn n_z(&self) -> usize {
        self.inner.hyperparams().n_z
    }
}

/// _gpconv — PyO3 module initializer for the Python extension.
///
/// Registers the model wrapper; the pure-Python packaging layer wraps the
/// class in the user-facing API.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _gpconv<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<ConvModel>()?;
    Ok(())
}

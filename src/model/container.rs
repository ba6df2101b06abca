//! Model container for the windowed convolution model.
//!
//! Purpose
//! -------
//! Own the validated hyperparameters and the observed time grid, and expose
//! accessor methods that return each covariance builder's output at the
//! container's own coordinates. Every accessor recomputes from the
//! hyperparameters on each call; the container holds no mutable state and
//! no caches (the external optimization layer is responsible for caching
//! and differentiating through these calls).
//!
//! Key behaviors
//! -------------
//! - [`Capabilities`] records, once at construction, which optional tensors
//!   this variant supports, so downstream reporting code can branch on a
//!   tag instead of inspecting the concrete type at runtime.
//! - Accessors borrow `self` immutably and return freshly allocated
//!   matrices/tensors.
use crate::covariance::builders;
use crate::covariance::errors::CovarianceResult;
use crate::model::errors::{ModelError, ModelResult};
use crate::model::hyperparams::Hyperparams;
use ndarray::{Array1, Array2, Array3, Array4, ArrayView1};

/// Which optional covariance blocks a model variant supports.
///
/// The windowed convolution variant carries both inducing points and
/// extended-Fourier coefficients; sibling variants without one of the two
/// would clear the corresponding flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The model exposes inducing-point tensors (`K_u`, `I_ux`, `I_uz`).
    pub inducing_points: bool,
    /// The model exposes basis-coefficient tensors (`K_z`, `I_hz`, `I_uz`).
    pub fourier_coefficients: bool,
}

/// The windowed convolution model: hyperparameters plus observed times.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionModel {
    hyperparams: Hyperparams,
    t: Array1<f64>,
    capabilities: Capabilities,
}

impl ConvolutionModel {
    /// Wrap validated hyperparameters and an observed time grid.
    ///
    /// Errors
    /// ------
    /// - `ModelError::EmptyTimeGrid` / `NonFiniteTime` for bad time grids.
    pub fn new(hyperparams: Hyperparams, t: Array1<f64>) -> ModelResult<Self> {
        if t.is_empty() {
            return Err(ModelError::EmptyTimeGrid);
        }
        for (index, &value) in t.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteTime { index, value });
            }
        }
        Ok(ConvolutionModel {
            hyperparams,
            t,
            capabilities: Capabilities { inducing_points: true, fourier_coefficients: true },
        })
    }

    /// Derive hyperparameters from data-facing arguments and wrap them.
    ///
    /// See [`Hyperparams::from_data`] for the derivations and the full
    /// validation behavior.
    pub fn from_data(
        window: f64, per: f64, t: Array1<f64>, n_u: usize, n_z: usize,
    ) -> ModelResult<Self> {
        let hyperparams = Hyperparams::from_data(window, per, t.view(), n_u, n_z)?;
        Self::new(hyperparams, t)
    }

    /// The validated hyperparameters.
    pub fn hyperparams(&self) -> &Hyperparams {
        &self.hyperparams
    }

    /// The observed time grid.
    pub fn times(&self) -> ArrayView1<f64> {
        self.t.view()
    }

    /// The capability tag fixed at construction.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Inducing-point kernel matrix over the inducing grid (`n_u × n_u`).
    pub fn k_u_matrix(&self) -> Array2<f64> {
        builders::k_u_gram(&self.hyperparams)
    }

    /// Basis-coefficient prior matrix (`n_z × n_z`).
    pub fn k_z_matrix(&self) -> Array2<f64> {
        builders::k_z(&self.hyperparams)
    }

    /// Process prior matrix over the observed grid (`n × n`).
    pub fn i_hx_matrix(&self) -> CovarianceResult<Array2<f64>> {
        builders::i_hx_gram(&self.hyperparams, self.t.view())
    }

    /// Four-way cross tensor over `(t, t, t_u, t_u)`.
    pub fn i_ux_tensor(&self) -> CovarianceResult<Array4<f64>> {
        builders::i_ux_tensor(&self.hyperparams, self.t.view())
    }

    /// Process/basis cross tensor over `(ms, ms, t)`.
    pub fn i_hz_tensor(&self) -> CovarianceResult<Array3<f64>> {
        builders::i_hz_tensor(&self.hyperparams, self.t.view())
    }

    /// Inducing/basis cross tensor over `(t_u, ms, t)`.
    pub fn i_uz_tensor(&self) -> CovarianceResult<Array3<f64>> {
        builders::i_uz_tensor(&self.hyperparams, self.t.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction validation of the observed grid.
    // - Accessor shapes against the hyperparameter dimensions.
    // - The capability tag and accessor idempotence.
    //
    // They intentionally DO NOT cover:
    // - Numerical values of the blocks — covered in `covariance` and the
    //   integration suite.
    // -------------------------------------------------------------------------

    fn reference_model() -> ConvolutionModel {
        let t = array![0.0, 0.5, 1.0, 1.5, 2.0];
        ConvolutionModel::from_data(0.5, 0.5, t, 3, 5).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Accessors produce tensors shaped by (n, n_u, n_z).
    //
    // Given
    // -----
    // - The reference model: n = 5, n_u = 3, n_z = 5.
    //
    // Expect
    // ------
    // - Shapes (3,3), (5,5), (5,5), (5,5,3,3), (5,5,5), (3,5,5).
    fn accessors_have_documented_shapes() {
        // Arrange
        let model = reference_model();

        // Act & Assert
        assert_eq!(model.k_u_matrix().dim(), (3, 3));
        assert_eq!(model.k_z_matrix().dim(), (5, 5));
        assert_eq!(model.i_hx_matrix().unwrap().dim(), (5, 5));
        assert_eq!(model.i_ux_tensor().unwrap().dim(), (5, 5, 3, 3));
        assert_eq!(model.i_hz_tensor().unwrap().dim(), (5, 5, 5));
        assert_eq!(model.i_uz_tensor().unwrap().dim(), (3, 5, 5));
    }

    #[test]
    // Purpose
    // -------
    // The variant advertises both inducing points and Fourier coefficients.
    //
    // Given
    // -----
    // - The reference model.
    //
    // Expect
    // ------
    // - Both capability flags set.
    fn capabilities_are_fixed_at_construction() {
        // Arrange
        let model = reference_model();

        // Act
        let capabilities = model.capabilities();

        // Assert
        assert!(capabilities.inducing_points);
        assert!(capabilities.fourier_coefficients);
    }

    #[test]
    // Purpose
    // -------
    // Construction rejects empty and non-finite observed grids.
    //
    // Given
    // -----
    // - An empty grid and a grid containing NaN.
    //
    // Expect
    // ------
    // - `EmptyTimeGrid` and `NonFiniteTime`.
    fn construction_rejects_bad_grids() {
        // Arrange
        let h = Hyperparams::from_data(0.5, 0.5, array![0.0, 1.0].view(), 2, 4).unwrap();

        // Act & Assert
        assert!(matches!(
            ConvolutionModel::new(h.clone(), Array1::<f64>::zeros(0)),
            Err(ModelError::EmptyTimeGrid)
        ));
        assert!(matches!(
            ConvolutionModel::new(h, array![0.0, f64::NAN]),
            Err(ModelError::NonFiniteTime { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Repeated accessor calls with no intervening mutation are identical:
    // the container recomputes deterministically and holds no hidden state.
    //
    // Given
    // -----
    // - Two calls to each accessor.
    //
    // Expect
    // ------
    // - Bit-identical outputs.
    fn accessors_are_idempotent() {
        // Arrange
        let model = reference_model();

        // Act & Assert
        assert_eq!(model.k_u_matrix(), model.k_u_matrix());
        assert_eq!(model.k_z_matrix(), model.k_z_matrix());
        assert_eq!(model.i_hx_matrix().unwrap(), model.i_hx_matrix().unwrap());
        assert_eq!(model.i_ux_tensor().unwrap(), model.i_ux_tensor().unwrap());
        assert_eq!(model.i_hz_tensor().unwrap(), model.i_hz_tensor().unwrap());
        assert_eq!(model.i_uz_tensor().unwrap(), model.i_uz_tensor().unwrap());
    }
}

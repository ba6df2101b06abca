//! Variational interface: parameter store and model assembly.
//!
//! Purpose
//! -------
//! Define the seam between this core and the external optimization layer.
//! The optimizer owns a store of named parameters with whatever gradient
//! machinery it likes; the core only reads current values through
//! [`VariationalStore`] and assembles a [`ConstructedModel`] — every
//! covariance block evaluated at the container's coordinates, with the
//! square prior blocks stabilized by an explicit [`Conditioning`] value —
//! ready for the external training and prediction code.
//!
//! Key behaviors
//! -------------
//! - `construct` is pure: it reads, validates, assembles, and returns; it
//!   caches nothing on the container and can be called repeatedly as the
//!   optimizer updates the store.
//! - Jitter is threaded explicitly through [`Conditioning`]; there is no
//!   process-global epsilon.
use crate::conditioning::Conditioning;
use crate::model::container::{Capabilities, ConvolutionModel};
use crate::model::errors::{ModelError, ModelResult};
use ndarray::{Array1, Array2, Array3, Array4};

/// Read-only view of a named variational parameter store.
///
/// Implementations are owned by the external optimizer; gradients and
/// transformations are their business. The core requires only that current
/// values can be read by name, with missing names reported as errors
/// rather than defaulted.
pub trait VariationalStore {
    /// Read a named scalar parameter.
    fn scalar(&self, name: &str) -> ModelResult<f64>;

    /// Read a named vector parameter.
    fn vector(&self, name: &str) -> ModelResult<Array1<f64>>;
}

/// A ready-to-evaluate assembly of the model's covariance blocks.
///
/// Consumed by the external training/prediction layers; the square prior
/// blocks `k_u` and `k_z` have been stabilized with the jitter the caller
/// passed to [`ConvolutionModel::construct`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructedModel {
    /// Observation noise read from the store.
    pub noise: f64,
    /// Stabilized inducing-point prior (`n_u × n_u`).
    pub k_u: Array2<f64>,
    /// Stabilized basis-coefficient prior (`n_z × n_z`).
    pub k_z: Array2<f64>,
    /// Process prior over the observed grid (`n × n`).
    pub i_hx: Array2<f64>,
    /// Four-way cross tensor over `(t, t, t_u, t_u)`.
    pub i_ux: Array4<f64>,
    /// Process/basis cross tensor over `(ms, ms, t)`.
    pub i_hz: Array3<f64>,
    /// Inducing/basis cross tensor over `(t_u, ms, t)`.
    pub i_uz: Array3<f64>,
    /// Capability tag inherited from the container.
    pub capabilities: Capabilities,
}

impl ConvolutionModel {
    /// Assemble a [`ConstructedModel`] from the current store values.
    ///
    /// Parameters
    /// ----------
    /// - `store`: `&dyn VariationalStore`
    ///   Source of the current `noise` value (and, for the external layers,
    ///   of the variational moments the core does not interpret).
    /// - `conditioning`: `&Conditioning`
    ///   Explicit jitter applied to the square prior blocks.
    ///
    /// Returns
    /// -------
    /// `ModelResult<ConstructedModel>`
    ///   The assembled blocks, or the first read/validation failure.
    ///
    /// Errors
    /// ------
    /// - `ModelError::MissingParameter` / `NonFiniteParameter` from the
    ///   store read.
    /// - `ModelError::InvalidNoise` for a non-positive noise value.
    pub fn construct(
        &self, store: &dyn VariationalStore, conditioning: &Conditioning,
    ) -> ModelResult<ConstructedModel> {
        let noise = store.scalar("noise")?;
        if !noise.is_finite() {
            return Err(ModelError::NonFiniteParameter { name: "noise".to_string(), value: noise });
        }
        if noise <= 0.0 {
            return Err(ModelError::InvalidNoise { value: noise });
        }
        Ok(ConstructedModel {
            noise,
            k_u: conditioning.stabilize(&self.k_u_matrix()),
            k_z: conditioning.stabilize(&self.k_z_matrix()),
            i_hx: self.i_hx_matrix()?,
            i_ux: self.i_ux_tensor()?,
            i_hz: self.i_hz_tensor()?,
            i_uz: self.i_uz_tensor()?,
            capabilities: self.capabilities(),
        })
    }
}

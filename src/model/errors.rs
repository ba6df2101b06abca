//! Unified error handling for model construction and assembly.
//!
//! This module defines [`ModelError`], the central error type used by
//! hyperparameter validation, the model container, and the variational
//! assembly path. Hyperparameter problems fail fast at construction;
//! variational problems surface when `construct` reads the parameter
//! store. An alias [`ModelResult<T>`] standardizes the return type across
//! model code.
use crate::covariance::errors::CovarianceError;

/// Result alias for model operations that may produce [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for the convolution model.
///
/// Covers hyperparameter validation, inducing-grid and frequency-set
/// consistency, variational-parameter reads, and generic passthrough
/// errors. Designed to integrate with `anyhow::Error` via `From` and to
/// provide readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Hyperparameter validation ----
    /// Window length must be finite and strictly positive.
    InvalidWindow { value: f64 },

    /// Period must be finite and strictly positive.
    InvalidPeriod { value: f64 },

    /// A derived or explicit rate must be finite and strictly positive.
    InvalidRate { name: &'static str, value: f64 },

    /// Window bounds must satisfy a < b with both finite.
    InvalidWindowBounds { a: f64, b: f64 },

    /// Observed time grid is empty.
    EmptyTimeGrid,

    /// An observed time is NaN/±inf.
    NonFiniteTime { index: usize, value: f64 },

    /// At least one inducing point is required.
    InvalidInducingCount { n_u: usize },

    /// Inducing points must be finite and non-negative.
    InvalidInducingPoint { index: usize, value: f64 },

    /// Inducing points must be strictly ascending.
    UnsortedInducingPoints { index: usize },

    /// At least one frequency index is required.
    InvalidFrequencyCount { n_z: usize },

    /// The cosine/sine truncation must sit at n_z / 2.
    TruncationMismatch { m_max: usize, n_z: usize },

    // ---- Variational parameters ----
    /// A named parameter is missing from the store.
    MissingParameter { name: String },

    /// A named parameter is NaN/±inf.
    NonFiniteParameter { name: String, value: f64 },

    /// Observation noise must be finite and strictly positive.
    InvalidNoise { value: f64 },

    // ---- Covariance batch passthrough ----
    Covariance(CovarianceError),

    // ---- Anyhow catchall ----
    Anyhow(String),
}

impl From<CovarianceError> for ModelError {
    fn from(err: CovarianceError) -> Self {
        ModelError::Covariance(err)
    }
}

impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::Anyhow(err.to_string())
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Hyperparameter validation ----
            ModelError::InvalidWindow { value } => {
                write!(f, "Model Error: window must be finite and > 0 (got {})", value)
            }
            ModelError::InvalidPeriod { value } => {
                write!(f, "Model Error: period must be finite and > 0 (got {})", value)
            }
            ModelError::InvalidRate { name, value } => {
                write!(f, "Model Error: rate `{}` must be finite and > 0 (got {})", name, value)
            }
            ModelError::InvalidWindowBounds { a, b } => write!(
                f,
                "Model Error: window bounds must satisfy a < b (got a = {}, b = {})",
                a, b
            ),
            ModelError::EmptyTimeGrid => write!(f, "Model Error: observed time grid is empty"),
            ModelError::NonFiniteTime { index, value } => {
                write!(f, "Model Error: observed time {} at index {} is not finite", value, index)
            }
            ModelError::InvalidInducingCount { n_u } => {
                write!(f, "Model Error: at least one inducing point is required (got {})", n_u)
            }
            ModelError::InvalidInducingPoint { index, value } => write!(
                f,
                "Model Error: inducing point {} at index {} must be finite and non-negative",
                value, index
            ),
            ModelError::UnsortedInducingPoints { index } => write!(
                f,
                "Model Error: inducing points must be strictly ascending at index {}",
                index
            ),
            ModelError::InvalidFrequencyCount { n_z } => {
                write!(f, "Model Error: at least one frequency index is required (got {})", n_z)
            }
            ModelError::TruncationMismatch { m_max, n_z } => write!(
                f,
                "Model Error: cosine/sine truncation m_max = {} is inconsistent with n_z = {}",
                m_max, n_z
            ),

            // ---- Variational parameters ----
            ModelError::MissingParameter { name } => {
                write!(f, "Model Error: variational parameter `{}` is missing", name)
            }
            ModelError::NonFiniteParameter { name, value } => {
                write!(f, "Model Error: variational parameter `{}` is not finite ({})", name, value)
            }
            ModelError::InvalidNoise { value } => {
                write!(f, "Model Error: noise must be finite and > 0 (got {})", value)
            }

            // ---- Covariance batch passthrough ----
            ModelError::Covariance(err) => write!(f, "Model Error: {}", err),

            // ---- Anyhow catchall ----
            ModelError::Anyhow(msg) => write!(f, "Model Error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(feature = "python-bindings")]
impl From<ModelError> for pyo3::PyErr {
    fn from(err: ModelError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

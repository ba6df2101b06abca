//! model — hyperparameters, container, and variational interface.
//!
//! Purpose
//! -------
//! Provide the stateful-looking but immutable surface of the windowed
//! convolution model: validated hyperparameters ([`hyperparams`]), the
//! container that exposes every covariance block at its own coordinates
//! ([`container`]), the seam to the external optimizer ([`variational`]),
//! and the unified error type ([`errors`]).
//!
//! Key behaviors
//! -------------
//! - Construction validates everything up front; accessors recompute from
//!   hyperparameters on every call and never mutate.
//! - The variational store stays opaque: the core reads named values and
//!   returns assembled covariance blocks, nothing more.
pub mod container;
pub mod errors;
pub mod hyperparams;
pub mod variational;

pub use container::{Capabilities, ConvolutionModel};
pub use errors::{ModelError, ModelResult};
pub use hyperparams::Hyperparams;
pub use variational::{ConstructedModel, VariationalStore};

//! covariance — analytic covariance engine: integrals, basis, builders.
//!
//! Purpose
//! -------
//! Bundle the closed-form machinery of the windowed convolution model: the
//! exponential-kernel double integrals ([`integrals`]), the windowed
//! extended-Fourier basis ([`basis`]), and the covariance builders that
//! combine them into the blocks consumed by the variational model
//! ([`builders`]). Module-local batch errors live in [`errors`].
//!
//! Key behaviors
//! -------------
//! - No numerical quadrature anywhere: every quantity is a piecewise
//!   analytic expression with its branch structure spelled out.
//! - Builders borrow hyperparameters and return freshly allocated output;
//!   repeated calls with the same inputs are bit-identical.
//!
//! Downstream usage
//! ----------------
//! - `model::container` exposes these builders at the container's own
//!   coordinates; `model::variational::construct` assembles them into a
//!   ready-to-evaluate model for the external training/prediction layers.
pub mod basis;
pub mod builders;
pub mod errors;
pub mod integrals;

pub use basis::{beta, beta_matrix, beta_row, harmonic, Harmonic};
pub use builders::{i_hx, i_hx_gram, i_hz_tensor, i_ux, i_ux_tensor, i_uz_tensor, k_u, k_u_gram, k_z};
pub use errors::{CovarianceError, CovarianceResult};
pub use integrals::{integral_abcd, integral_abcd_lu};

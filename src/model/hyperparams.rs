//! Validated hyperparameters of the windowed convolution model.
//!
//! Purpose
//! -------
//! Hold every fixed quantity the covariance builders need — window length,
//! period, the derived decay rates and scale factors, the latent window
//! `[a, b]`, the inducing grid, and the frequency truncation — validated
//! once at construction and immutable afterwards.
//!
//! Key behaviors
//! -------------
//! - [`Hyperparams::from_data`] derives everything from `(window, per)` and
//!   the observed time grid: `alpha = 1/per`, `gamma = 1/(2·per)`,
//!   `lam = 2/window`, `alpha_t = sqrt(2·alpha)`, `gamma_t = sqrt(2·gamma)`
//!   (the square-root scalings give `k_u` and `i_hx` unit diagonal),
//!   `a = min(t) − 2·window`, `b = max(t)`, inducing points evenly spaced
//!   on `[0, 2·window]`, and `m_max = n_z / 2`.
//! - [`Hyperparams::with_parts`] accepts explicit rates, window bounds,
//!   inducing grid, and truncation for callers that need full control; both
//!   constructors share the same fail-fast validation.
//!
//! Invariants & assumptions
//! ------------------------
//! - All rates are finite and strictly positive; `a < b`; `t_u` is finite,
//!   non-negative, and strictly ascending; `m_max == n_z / 2`.
//! - Frequency indices are implicit: `ms = 0..n_z`, cosine half
//!   `m ≤ m_max`, sine half `m > m_max`, index 0 cosine-only.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise the derivations and every validation failure;
//!   builder behavior on top of these values is tested in `covariance`.
use crate::model::errors::{ModelError, ModelResult};
use ndarray::{Array1, ArrayView1};

/// Immutable hyperparameters of the windowed convolution model.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperparams {
    /// Window length controlling the latent decay rate and window extent.
    pub window: f64,
    /// Period controlling the impulse-response and inducing kernel decays.
    pub per: f64,
    /// Impulse-response decay rate.
    pub alpha: f64,
    /// Impulse-response scale factor, `sqrt(2·alpha)`.
    pub alpha_t: f64,
    /// Inducing kernel decay rate.
    pub gamma: f64,
    /// Inducing kernel scale factor, `sqrt(2·gamma)`.
    pub gamma_t: f64,
    /// Latent-process decay rate.
    pub lam: f64,
    /// Lower edge of the latent window.
    pub a: f64,
    /// Upper edge of the latent window.
    pub b: f64,
    /// Inducing-point locations, ascending and non-negative.
    pub t_u: Array1<f64>,
    /// Number of basis indices.
    pub n_z: usize,
    /// Largest cosine index; sine indices run above it.
    pub m_max: usize,
}

impl Hyperparams {
    /// Derive hyperparameters from data-facing arguments.
    ///
    /// Parameters
    /// ----------
    /// - `window`: `f64`
    ///   Window length; finite and strictly positive.
    /// - `per`: `f64`
    ///   Period; finite and strictly positive.
    /// - `t`: `ArrayView1<f64>`
    ///   Observed time points; non-empty and finite. Only the minimum and
    ///   maximum are used, so ordering is not required here.
    /// - `n_u`: `usize`
    ///   Number of inducing points, spaced evenly on `[0, 2·window]`;
    ///   at least 1.
    /// - `n_z`: `usize`
    ///   Number of basis indices; at least 1. The truncation is
    ///   `m_max = n_z / 2`.
    ///
    /// Returns
    /// -------
    /// `ModelResult<Hyperparams>`
    ///   The validated hyperparameters, or the first validation failure.
    ///
    /// Errors
    /// ------
    /// - `ModelError::InvalidWindow` / `InvalidPeriod` for non-positive or
    ///   non-finite scalars.
    /// - `ModelError::EmptyTimeGrid` / `NonFiniteTime` for bad time grids.
    /// - `ModelError::InvalidInducingCount` / `InvalidFrequencyCount` for
    ///   empty grids.
    pub fn from_data(
        window: f64, per: f64, t: ArrayView1<f64>, n_u: usize, n_z: usize,
    ) -> ModelResult<Self> {
        if !window.is_finite() || window <= 0.0 {
            return Err(ModelError::InvalidWindow { value: window });
        }
        if !per.is_finite() || per <= 0.0 {
            return Err(ModelError::InvalidPeriod { value: per });
        }
        if t.is_empty() {
            return Err(ModelError::EmptyTimeGrid);
        }
        for (index, &value) in t.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteTime { index, value });
            }
        }
        if n_u == 0 {
            return Err(ModelError::InvalidInducingCount { n_u });
        }
        let t_min = t.iter().cloned().fold(f64::INFINITY, f64::min);
        let t_max = t.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let alpha = 1.0 / per;
        let gamma = 1.0 / (2.0 * per);
        let lam = 2.0 / window;
        let t_u = linspace(0.0, 2.0 * window, n_u);
        let a = t_min - 2.0 * window;
        Self::with_parts(window, per, alpha, gamma, lam, a, t_max, t_u, n_z, n_z / 2)
    }

    /// Construct from explicit parts, validating every invariant.
    ///
    /// Intended for callers (and tests) that need full control over the
    /// rates, window bounds, inducing grid, and truncation. The scale
    /// factors are always derived as `sqrt(2·alpha)` / `sqrt(2·gamma)`.
    ///
    /// Errors
    /// ------
    /// - `ModelError::InvalidRate` for a non-positive or non-finite
    ///   `alpha`, `gamma`, or `lam`.
    /// - `ModelError::InvalidWindowBounds` unless `a < b` with both finite.
    /// - `ModelError::InvalidInducingCount` / `InvalidInducingPoint` /
    ///   `UnsortedInducingPoints` for bad inducing grids.
    /// - `ModelError::InvalidFrequencyCount` for `n_z == 0`.
    /// - `ModelError::TruncationMismatch` unless `m_max == n_z / 2`.
    #[allow(clippy::too_many_arguments)]
    pub fn with_parts(
        window: f64, per: f64, alpha: f64, gamma: f64, lam: f64, a: f64, b: f64,
        t_u: Array1<f64>, n_z: usize, m_max: usize,
    ) -> ModelResult<Self> {
        if !window.is_finite() || window <= 0.0 {
            return Err(ModelError::InvalidWindow { value: window });
        }
        if !per.is_finite() || per <= 0.0 {
            return Err(ModelError::InvalidPeriod { value: per });
        }
        for (name, value) in [("alpha", alpha), ("gamma", gamma), ("lam", lam)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::InvalidRate { name, value });
            }
        }
        if !a.is_finite() || !b.is_finite() || a >= b {
            return Err(ModelError::InvalidWindowBounds { a, b });
        }
        if t_u.is_empty() {
            return Err(ModelError::InvalidInducingCount { n_u: 0 });
        }
        for (index, &value) in t_u.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidInducingPoint { index, value });
            }
            if index > 0 && value <= t_u[index - 1] {
                return Err(ModelError::UnsortedInducingPoints { index });
            }
        }
        if n_z == 0 {
            return Err(ModelError::InvalidFrequencyCount { n_z });
        }
        if m_max != n_z / 2 {
            return Err(ModelError::TruncationMismatch { m_max, n_z });
        }
        Ok(Hyperparams {
            window,
            per,
            alpha,
            alpha_t: (2.0 * alpha).sqrt(),
            gamma,
            gamma_t: (2.0 * gamma).sqrt(),
            lam,
            a,
            b,
            t_u,
            n_z,
            m_max,
        })
    }

    /// Number of inducing points.
    pub fn n_u(&self) -> usize {
        self.t_u.len()
    }

    /// The frequency index set `0..n_z`.
    pub fn ms(&self) -> Vec<usize> {
        (0..self.n_z).collect()
    }
}

/// Evenly spaced grid of `n` points from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from(vec![start]);
    }
    let step = (stop - start) / (n - 1) as f64;
    Array1::from_iter((0..n).map(|i| start + step * i as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The data-driven derivations (rates, scale factors, window bounds,
    //   inducing grid, truncation).
    // - Every validation failure of both constructors.
    //
    // They intentionally DO NOT cover:
    // - Covariance values built on top of these hyperparameters.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `from_data` derives rates, scale factors, window bounds, and the
    // inducing grid as documented.
    //
    // Given
    // -----
    // - window = 0.5, per = 0.5, t = linspace(0, 2, 5), n_u = 3, n_z = 5.
    //
    // Expect
    // ------
    // - alpha = 2, gamma = 1, lam = 4, alpha_t = 2, gamma_t = sqrt(2),
    //   a = -1, b = 2, t_u = [0, 0.5, 1], m_max = 2.
    fn from_data_derives_documented_values() {
        // Arrange
        let t = array![0.0, 0.5, 1.0, 1.5, 2.0];

        // Act
        let h = Hyperparams::from_data(0.5, 0.5, t.view(), 3, 5).unwrap();

        // Assert
        assert_eq!(h.alpha, 2.0);
        assert_eq!(h.gamma, 1.0);
        assert_eq!(h.lam, 4.0);
        assert!((h.alpha_t - 2.0).abs() < 1e-15);
        assert!((h.gamma_t - 2.0_f64.sqrt()).abs() < 1e-15);
        assert_eq!(h.a, -1.0);
        assert_eq!(h.b, 2.0);
        assert_eq!(h.t_u, array![0.0, 0.5, 1.0]);
        assert_eq!(h.m_max, 2);
        assert_eq!(h.n_u(), 3);
        assert_eq!(h.ms(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    // Purpose
    // -------
    // Non-positive or non-finite window/period values fail fast.
    //
    // Given
    // -----
    // - window ∈ {0, -1, NaN} and per ∈ {0, NaN} against a valid grid.
    //
    // Expect
    // ------
    // - `InvalidWindow` / `InvalidPeriod` respectively.
    fn from_data_rejects_bad_window_and_period() {
        // Arrange
        let t = array![0.0, 1.0];

        // Act & Assert
        for window in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                Hyperparams::from_data(window, 0.5, t.view(), 2, 4),
                Err(ModelError::InvalidWindow { .. })
            ));
        }
        for per in [0.0, f64::NAN] {
            assert!(matches!(
                Hyperparams::from_data(0.5, per, t.view(), 2, 4),
                Err(ModelError::InvalidPeriod { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Empty and non-finite time grids are rejected with their own variants.
    //
    // Given
    // -----
    // - An empty grid and a grid with an infinity at index 1.
    //
    // Expect
    // ------
    // - `EmptyTimeGrid` and `NonFiniteTime { index: 1 }`.
    fn from_data_rejects_bad_time_grids() {
        // Arrange
        let empty = Array1::<f64>::zeros(0);
        let bad = array![0.0, f64::INFINITY];

        // Act & Assert
        assert!(matches!(
            Hyperparams::from_data(0.5, 0.5, empty.view(), 2, 4),
            Err(ModelError::EmptyTimeGrid)
        ));
        match Hyperparams::from_data(0.5, 0.5, bad.view(), 2, 4) {
            Err(ModelError::NonFiniteTime { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_infinite());
            }
            other => panic!("expected NonFiniteTime, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Empty inducing or frequency sets are rejected.
    //
    // Given
    // -----
    // - n_u = 0 and n_z = 0 against otherwise valid arguments.
    //
    // Expect
    // ------
    // - `InvalidInducingCount` and `InvalidFrequencyCount`.
    fn from_data_rejects_empty_grids() {
        // Arrange
        let t = array![0.0, 1.0];

        // Act & Assert
        assert!(matches!(
            Hyperparams::from_data(0.5, 0.5, t.view(), 0, 4),
            Err(ModelError::InvalidInducingCount { n_u: 0 })
        ));
        assert!(matches!(
            Hyperparams::from_data(0.5, 0.5, t.view(), 2, 0),
            Err(ModelError::InvalidFrequencyCount { n_z: 0 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `with_parts` enforces rate positivity, bound ordering, inducing-grid
    // shape, and the n_z / 2 truncation.
    //
    // Given
    // -----
    // - Perturbations of a valid argument set, one violation each.
    //
    // Expect
    // ------
    // - The matching error variant per violation.
    fn with_parts_rejects_each_violation() {
        // Arrange
        let t_u = array![0.0, 0.5, 1.0];
        let valid = |t_u: Array1<f64>, m_max: usize| {
            Hyperparams::with_parts(0.5, 0.5, 2.0, 1.0, 4.0, -1.0, 2.0, t_u, 5, m_max)
        };

        // Act & Assert
        assert!(valid(t_u.clone(), 2).is_ok());
        assert!(matches!(
            Hyperparams::with_parts(0.5, 0.5, 0.0, 1.0, 4.0, -1.0, 2.0, t_u.clone(), 5, 2),
            Err(ModelError::InvalidRate { name: "alpha", .. })
        ));
        assert!(matches!(
            Hyperparams::with_parts(0.5, 0.5, 2.0, 1.0, 4.0, 2.0, -1.0, t_u.clone(), 5, 2),
            Err(ModelError::InvalidWindowBounds { .. })
        ));
        assert!(matches!(
            valid(array![0.0, -0.5, 1.0], 2),
            Err(ModelError::InvalidInducingPoint { index: 1, .. })
        ));
        assert!(matches!(
            valid(array![0.0, 1.0, 0.5], 2),
            Err(ModelError::UnsortedInducingPoints { index: 2 })
        ));
        assert!(matches!(
            valid(t_u, 3),
            Err(ModelError::TruncationMismatch { m_max: 3, n_z: 5 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A single inducing point degenerates the grid to `[0]` without error.
    //
    // Given
    // -----
    // - n_u = 1.
    //
    // Expect
    // ------
    // - `t_u == [0.0]`.
    fn from_data_with_single_inducing_point() {
        // Arrange
        let t = array![0.0, 1.0];

        // Act
        let h = Hyperparams::from_data(0.5, 0.5, t.view(), 1, 4).unwrap();

        // Assert
        assert_eq!(h.t_u, array![0.0]);
    }
}

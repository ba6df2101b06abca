//! Windowed extended-Fourier basis for the latent process.
//!
//! The latent process is represented on a finite window `[a, b]` by a
//! truncated Fourier family and, outside the window, by causal exponential
//! tails. For basis index `m` and time offset `tau`:
//!
//! - inside the window (`a < tau < b`): `cos(2π·m/(b−a)·(tau−a))` for the
//!   cosine half (`m ≤ m_max`), `sin(2π·(m−m_max)/(b−a)·(tau−a))` for the
//!   sine half (`m > m_max`);
//! - before the window (`tau ≤ a`): `exp(−lam·(a−tau))` for cosine indices,
//!   zero for sine indices;
//! - after the window (`tau ≥ b`): `exp(−lam·(tau−b))` for cosine indices,
//!   zero for sine indices.
//!
//! Index 0 belongs to the cosine half (a constant inside the window with
//! decaying tails); it is never treated as a sine term. Since `b − a` spans
//! an integer number of periods of every harmonic, the cosine branch is
//! continuous at both window edges and the sine branch vanishes there, so
//! the basis is continuous everywhere.
//!
//! The covariance builders integrate products of these branches in closed
//! form; [`harmonic`] exposes the per-index trigonometric descriptor so the
//! split points and sign conventions live in one place.
use crate::model::hyperparams::Hyperparams;
use ndarray::{Array1, Array2, ArrayView1};
use std::f64::consts::TAU;

/// Trigonometric descriptor of one basis index inside the window.
///
/// `omega` is the angular frequency of the interior branch; the cosine
/// variant also owns the exponential tails outside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Harmonic {
    Cosine { omega: f64 },
    Sine { omega: f64 },
}

impl Harmonic {
    /// Evaluate the interior branch at angle `arg`.
    pub fn eval(&self, arg: f64) -> f64 {
        match self {
            Harmonic::Cosine { .. } => arg.cos(),
            Harmonic::Sine { .. } => arg.sin(),
        }
    }

    /// Angular frequency of the interior branch.
    pub fn omega(&self) -> f64 {
        match self {
            Harmonic::Cosine { omega } | Harmonic::Sine { omega } => *omega,
        }
    }
}

/// Map a basis index to its interior harmonic.
///
/// Indices `m ≤ m_max` are cosine terms at frequency `2π·m/(b−a)`; indices
/// `m > m_max` are sine terms at frequency `2π·(m−m_max)/(b−a)`.
pub fn harmonic(hyperparams: &Hyperparams, m: usize) -> Harmonic {
    let width = hyperparams.b - hyperparams.a;
    if m <= hyperparams.m_max {
        Harmonic::Cosine { omega: TAU * m as f64 / width }
    } else {
        Harmonic::Sine { omega: TAU * (m - hyperparams.m_max) as f64 / width }
    }
}

/// Evaluate basis index `m` at time offset `tau`.
pub fn beta(hyperparams: &Hyperparams, m: usize, tau: f64) -> f64 {
    let a = hyperparams.a;
    let b = hyperparams.b;
    if tau > a && tau < b {
        let shape = harmonic(hyperparams, m);
        return shape.eval(shape.omega() * (tau - a));
    }
    if m > hyperparams.m_max {
        return 0.0;
    }
    if tau <= a {
        (-hyperparams.lam * (a - tau)).exp()
    } else {
        (-hyperparams.lam * (tau - b)).exp()
    }
}

/// Evaluate basis index `m` over an array of time offsets.
pub fn beta_row(hyperparams: &Hyperparams, m: usize, taus: ArrayView1<f64>) -> Array1<f64> {
    taus.mapv(|tau| beta(hyperparams, m, tau))
}

/// Evaluate the full basis over an array of time offsets.
///
/// Returns an `n_z × taus.len()` matrix whose row `m` is basis index `m`
/// broadcast over the offsets.
pub fn beta_matrix(hyperparams: &Hyperparams, taus: ArrayView1<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((hyperparams.n_z, taus.len()));
    for m in 0..hyperparams.n_z {
        for (k, &tau) in taus.iter().enumerate() {
            out[[m, k]] = beta(hyperparams, m, tau);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Branch selection (cosine vs sine halves, index 0 as cosine).
    // - Continuity at the window edges for cosine indices and vanishing
    //   tails for sine indices.
    // - Agreement between scalar and vectorized evaluation.
    //
    // They intentionally DO NOT cover:
    // - Integrals of basis products — covered by the builder tests and the
    //   quadrature integration suite.
    // -------------------------------------------------------------------------

    fn test_hyperparams() -> Hyperparams {
        let t = array![0.0, 0.5, 1.0, 1.5, 2.0];
        Hyperparams::from_data(0.5, 0.5, t.view(), 3, 5).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Index 0 is a cosine term: constant 1 inside the window, decaying
    // exponential tails outside.
    //
    // Given
    // -----
    // - The reference hyperparameters (window [-1, 2], lam = 4).
    //
    // Expect
    // ------
    // - beta(0, tau) = 1 inside, exp(−lam·dist) outside.
    fn beta_index_zero_is_constant_with_tails() {
        // Arrange
        let h = test_hyperparams();

        // Act & Assert
        assert_eq!(beta(&h, 0, 0.3), 1.0);
        assert!((beta(&h, 0, h.a - 0.25) - (-h.lam * 0.25).exp()).abs() < 1e-12);
        assert!((beta(&h, 0, h.b + 0.25) - (-h.lam * 0.25).exp()).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Cosine indices are continuous at both window edges; sine indices
    // vanish there and outside.
    //
    // Given
    // -----
    // - A cosine index (1) and a sine index (m_max + 1) evaluated just
    //   inside and just outside each edge.
    //
    // Expect
    // ------
    // - Matching one-sided limits for the cosine index; zeros for the sine
    //   index at and beyond the edges.
    fn beta_is_continuous_at_window_edges() {
        // Arrange
        let h = test_hyperparams();
        let eps = 1e-9;

        // Act & Assert
        for edge in [h.a, h.b] {
            let inside = beta(&h, 1, edge + if edge == h.a { eps } else { -eps });
            let outside = beta(&h, 1, edge);
            assert!((inside - outside).abs() < 1e-6, "cosine discontinuity at {edge}");
        }
        let sine = h.m_max + 1;
        assert!(beta(&h, sine, h.a + eps).abs() < 1e-6);
        assert_eq!(beta(&h, sine, h.a - 0.5), 0.0);
        assert_eq!(beta(&h, sine, h.b + 0.5), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Interior values follow the advertised harmonics.
    //
    // Given
    // -----
    // - tau = a + quarter of the window width.
    //
    // Expect
    // ------
    // - cos/sin of 2π·k/4 for cosine index 1 and sine frequency 1.
    fn beta_interior_matches_harmonics() {
        // Arrange
        let h = test_hyperparams();
        let width = h.b - h.a;
        let tau = h.a + width / 4.0;

        // Act & Assert
        assert!((beta(&h, 1, tau) - (TAU / 4.0).cos()).abs() < 1e-12);
        assert!((beta(&h, h.m_max + 1, tau) - (TAU / 4.0).sin()).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Vectorized evaluation agrees with scalar evaluation entry by entry.
    //
    // Given
    // -----
    // - Offsets spanning the tails and the interior.
    //
    // Expect
    // ------
    // - `beta_matrix` rows equal `beta_row`, which equals scalar `beta`.
    fn beta_vectorized_matches_scalar() {
        // Arrange
        let h = test_hyperparams();
        let taus = array![-2.0, -1.0, -0.3, 0.4, 1.9, 2.0, 2.7];

        // Act
        let matrix = beta_matrix(&h, taus.view());

        // Assert
        for m in 0..h.n_z {
            let row = beta_row(&h, m, taus.view());
            for (k, &tau) in taus.iter().enumerate() {
                assert_eq!(matrix[[m, k]], row[k]);
                assert_eq!(row[k], beta(&h, m, tau));
            }
        }
    }
}

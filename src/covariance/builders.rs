//! covariance::builders — covariance blocks of the windowed convolution model.
//!
//! Purpose
//! -------
//! Assemble every covariance quantity the variational model needs from the
//! closed-form integral primitives and the windowed basis:
//!
//! ```text
//! k_u(s, s′)  = γ_t²/(2γ) · e^{−γ|s−s′|}                  inducing kernel
//! K_z         = diag(d) + v·vᵀ                            coefficient prior
//! i_hx(x, x′) = α_t²/(2α) · e^{−λ|x−x′|}                  process prior
//! i_ux        = α_t²γ_t² ∬ e^{−α(τ+τ′) −γ(s−τ) −γ(s′−τ′) −λ|(x−τ)−(x′−τ′)|}
//! I_hz[m,n,k] = ∫_{−∞}^{t_k} α_t² e^{−2α(t_k−τ)} β_m(τ) β_n(τ) dτ
//! I_uz[i,j,k] = ∫₀^{t_{u,i}} α_t γ_t e^{−ατ −γ(t_{u,i}−τ)} β_j(t_k−τ) dτ
//! ```
//!
//! Key behaviors
//! -------------
//! - Every builder is a pure function of borrowed hyperparameters and
//!   returns a freshly allocated matrix/tensor; nothing is cached or
//!   mutated across calls.
//! - The double integral in `i_ux` reduces to one `integral_abcd_lu` call
//!   through the change of variables `s = τ − x`, which turns the mixing
//!   term into the canonical `|s − s′|` form with rates `(γ − α, λ)`.
//! - `I_hz` and `I_uz` split their ranges at the window boundaries `a`/`b`
//!   (respectively at the basis-argument crossings `t − b`, `t − a` clipped
//!   to `[0, t_u]`) and integrate each piece in closed form; trigonometric
//!   products go through product-to-sum identities.
//! - Exponent offsets are folded into the segment helpers so combined
//!   exponents stay balanced; zero-width pieces are skipped by bound
//!   clamps, not special-cased as errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Hyperparameters come from a validated [`Hyperparams`], so all rates
//!   are strictly positive, `b > a`, and `t_u` is ascending and
//!   non-negative.
//! - `k_u` and `i_hx` have unit diagonal under the default scale factors;
//!   Gram matrices over distinct coordinates are symmetric positive
//!   definite.
//! - `K_z` is block-structured by the cosine/sine split: the rank-one part
//!   couples cosine indices only, sine rows are purely diagonal.
//!
//! Testing notes
//! -------------
//! - Unit tests cover normalization, symmetry, block structure, and
//!   positive definiteness; the integration suite checks every builder
//!   against brute-force quadrature of the raw integrands to five decimal
//!   places.
use crate::covariance::{
    basis::{harmonic, Harmonic},
    errors::{validate_grid, CovarianceResult},
    integrals::{exp_cos_segment, exp_segment, exp_sin_segment, integral_abcd_lu},
};
use crate::model::hyperparams::Hyperparams;
use ndarray::{Array2, Array3, Array4, ArrayView1};

/// Inducing-point kernel between two filter-relative times.
///
/// Unit at zero separation under the default `gamma_t = sqrt(2·gamma)`.
pub fn k_u(hyperparams: &Hyperparams, t_u_1: f64, t_u_2: f64) -> f64 {
    let h = hyperparams;
    h.gamma_t * h.gamma_t / (2.0 * h.gamma) * (-h.gamma * (t_u_1 - t_u_2).abs()).exp()
}

/// Gram matrix of [`k_u`] over the inducing-point grid (`n_u × n_u`).
pub fn k_u_gram(hyperparams: &Hyperparams) -> Array2<f64> {
    let t_u = &hyperparams.t_u;
    let n_u = t_u.len();
    let mut out = Array2::zeros((n_u, n_u));
    for i in 0..n_u {
        for j in 0..=i {
            let value = k_u(hyperparams, t_u[i], t_u[j]);
            out[[i, j]] = value;
            out[[j, i]] = value;
        }
    }
    out
}

/// Prior covariance of the extended-basis coefficients (`n_z × n_z`).
///
/// Diagonal-plus-rank-one: the diagonal carries `(λ² + ω_m²)(b−a)/(4λ)`
/// per harmonic (doubled at `m = 0`, whose squared interior integrates to
/// the full width), and the rank-one all-ones block couples the cosine
/// indices through the window-edge contributions of their tails. Sine
/// indices vanish at the edges and stay purely diagonal.
pub fn k_z(hyperparams: &Hyperparams) -> Array2<f64> {
    let h = hyperparams;
    let width = h.b - h.a;
    let quarter_width = width / (4.0 * h.lam);
    let mut out = Array2::zeros((h.n_z, h.n_z));
    for m in 0..h.n_z {
        for n in 0..h.n_z {
            if m <= h.m_max && n <= h.m_max {
                out[[m, n]] = 1.0;
            }
        }
    }
    for m in 0..h.n_z {
        let omega = harmonic(h, m).omega();
        let mut diagonal = (h.lam * h.lam + omega * omega) * quarter_width;
        if m == 0 {
            diagonal *= 2.0;
        }
        out[[m, m]] += diagonal;
    }
    out
}

/// Prior covariance of the convolved process between two evaluation times.
///
/// The white-noise pairing collapses the filter double integral onto the
/// latent kernel, leaving `α_t²/(2α)·e^{−λ|x−x′|}`; unit at zero separation
/// under the default `alpha_t = sqrt(2·alpha)`.
pub fn i_hx(hyperparams: &Hyperparams, t1: f64, t2: f64) -> f64 {
    let h = hyperparams;
    h.alpha_t * h.alpha_t / (2.0 * h.alpha) * (-h.lam * (t1 - t2).abs()).exp()
}

/// Gram matrix of [`i_hx`] over a time grid.
pub fn i_hx_gram(hyperparams: &Hyperparams, t: ArrayView1<f64>) -> CovarianceResult<Array2<f64>> {
    validate_grid("t", t)?;
    let n = t.len();
    let mut out = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let value = i_hx(hyperparams, t[i], t[j]);
            out[[i, j]] = value;
            out[[j, i]] = value;
        }
    }
    Ok(out)
}

/// Cross term between two evaluation times and two inducing points.
///
/// With `s = τ − t1`, `s′ = τ′ − t2` the mixing term becomes `|s − s′|` and
/// the whole double integral is one [`integral_abcd_lu`] evaluation at
/// rates `(γ − α, λ)`, scaled by the decay envelopes factored out of the
/// substitution.
pub fn i_ux(hyperparams: &Hyperparams, t1: f64, t2: f64, t_u_1: f64, t_u_2: f64) -> f64 {
    let h = hyperparams;
    let c = h.gamma - h.alpha;
    let scale = h.alpha_t * h.alpha_t * h.gamma_t * h.gamma_t;
    let envelope = (c * (t1 + t2) - h.gamma * (t_u_1 + t_u_2)).exp();
    scale
        * envelope
        * integral_abcd_lu(-t1, t_u_1 - t1, -t2, t_u_2 - t2, c, h.lam)
}

/// Full [`i_ux`] tensor over `(t, t, t_u, t_u)` grids.
pub fn i_ux_tensor(hyperparams: &Hyperparams, t: ArrayView1<f64>) -> CovarianceResult<Array4<f64>> {
    validate_grid("t", t)?;
    let t_u = &hyperparams.t_u;
    let (nt, nu) = (t.len(), t_u.len());
    let mut out = Array4::zeros((nt, nt, nu, nu));
    for i in 0..nt {
        for j in 0..nt {
            for k in 0..nu {
                for l in 0..nu {
                    out[[i, j, k, l]] = i_ux(hyperparams, t[i], t[j], t_u[k], t_u[l]);
                }
            }
        }
    }
    Ok(out)
}

/// One entry of the process/basis cross tensor.
///
/// `∫_{−∞}^{t} α_t²·e^{−2α(t−τ)}·β_m(τ)·β_n(τ) dτ`, split at the window
/// boundaries: a pre-window tail (cosine pairs only, both tails decay at
/// rate λ toward −∞ so the piece closes in one exponential), the interior
/// trigonometric product, and a post-window tail when `t` clears `b`.
fn i_hz_entry(hyperparams: &Hyperparams, m: usize, n: usize, t: f64) -> f64 {
    let h = hyperparams;
    let two_alpha = 2.0 * h.alpha;
    let two_lam = 2.0 * h.lam;
    let cosine_pair = m <= h.m_max && n <= h.m_max;
    let mut total = 0.0;
    if cosine_pair {
        let hi = t.min(h.a);
        let rate = two_alpha + two_lam;
        total += (rate * hi - two_alpha * t - two_lam * h.a).exp() / rate;
    }
    if t > h.a {
        let hi = t.min(h.b);
        total += trig_product_segment(h, m, n, two_alpha, -two_alpha * t, h.a, hi);
    }
    if cosine_pair && t > h.b {
        total += exp_segment(two_alpha - two_lam, two_lam * h.b - two_alpha * t, h.b, t);
    }
    h.alpha_t * h.alpha_t * total
}

/// Integrate `e^{rate·τ+offset}·β_m·β_n` over an in-window segment.
///
/// Product-to-sum on the two harmonics about the pivot `a`; each resulting
/// term is a single damped cosine/sine segment. Frequency differences may
/// be negative, which the segment antiderivatives accept.
fn trig_product_segment(
    hyperparams: &Hyperparams, m: usize, n: usize, rate: f64, offset: f64, lo: f64, hi: f64,
) -> f64 {
    let h = hyperparams;
    let left = harmonic(h, m);
    let right = harmonic(h, n);
    let sum = left.omega() + right.omega();
    let diff = left.omega() - right.omega();
    let cos_at = |omega: f64| exp_cos_segment(rate, offset, omega, -omega * h.a, lo, hi);
    let sin_at = |omega: f64| exp_sin_segment(rate, offset, omega, -omega * h.a, lo, hi);
    match (left, right) {
        (Harmonic::Cosine { .. }, Harmonic::Cosine { .. }) => {
            0.5 * (cos_at(diff) + cos_at(sum))
        }
        (Harmonic::Sine { .. }, Harmonic::Sine { .. }) => 0.5 * (cos_at(diff) - cos_at(sum)),
        (Harmonic::Sine { .. }, Harmonic::Cosine { .. }) => 0.5 * (sin_at(sum) + sin_at(diff)),
        (Harmonic::Cosine { .. }, Harmonic::Sine { .. }) => 0.5 * (sin_at(sum) - sin_at(diff)),
    }
}

/// Process/basis cross tensor over a time grid (`n_z × n_z × len(t)`).
pub fn i_hz_tensor(hyperparams: &Hyperparams, t: ArrayView1<f64>) -> CovarianceResult<Array3<f64>> {
    validate_grid("t", t)?;
    let n_z = hyperparams.n_z;
    let mut out = Array3::zeros((n_z, n_z, t.len()));
    for m in 0..n_z {
        for n in 0..=m {
            for (k, &time) in t.iter().enumerate() {
                let value = i_hz_entry(hyperparams, m, n, time);
                out[[m, n, k]] = value;
                out[[n, m, k]] = value;
            }
        }
    }
    Ok(out)
}

/// One entry of the inducing/basis cross tensor.
///
/// `∫₀^{t_u} α_t γ_t e^{−ατ − γ(t_u−τ)}·β_m(t−τ) dτ`. The basis argument
/// `t − τ` descends through the window as `τ` grows, so the range splits at
/// `t − b` and `t − a` clipped to `[0, t_u]`: post-window tail, interior
/// harmonic, pre-window tail. Sine indices contribute only the interior
/// piece.
fn i_uz_entry(hyperparams: &Hyperparams, t_u: f64, m: usize, t: f64) -> f64 {
    let h = hyperparams;
    let rate = h.gamma - h.alpha;
    let offset = -h.gamma * t_u;
    let cosine = m <= h.m_max;
    let mut total = 0.0;
    if cosine {
        let hi = t_u.min(t - h.b);
        if hi > 0.0 {
            total += exp_segment(rate + h.lam, offset - h.lam * (t - h.b), 0.0, hi);
        }
    }
    {
        let lo = (t - h.b).max(0.0);
        let hi = t_u.min(t - h.a);
        if hi > lo {
            let shape = harmonic(h, m);
            let omega = shape.omega();
            let phase = omega * (t - h.a);
            total += match shape {
                Harmonic::Cosine { .. } => exp_cos_segment(rate, offset, -omega, phase, lo, hi),
                Harmonic::Sine { .. } => exp_sin_segment(rate, offset, -omega, phase, lo, hi),
            };
        }
    }
    if cosine {
        let lo = (t - h.a).max(0.0);
        if t_u > lo {
            total += exp_segment(rate - h.lam, offset + h.lam * (t - h.a), lo, t_u);
        }
    }
    h.alpha_t * h.gamma_t * total
}

/// Inducing/basis cross tensor over a time grid (`n_u × n_z × len(t)`).
pub fn i_uz_tensor(hyperparams: &Hyperparams, t: ArrayView1<f64>) -> CovarianceResult<Array3<f64>> {
    validate_grid("t", t)?;
    let t_u = &hyperparams.t_u;
    let n_z = hyperparams.n_z;
    let mut out = Array3::zeros((t_u.len(), n_z, t.len()));
    for (i, &point) in t_u.iter().enumerate() {
        for j in 0..n_z {
            for (k, &time) in t.iter().enumerate() {
                out[[i, j, k]] = i_uz_entry(hyperparams, point, j, time);
            }
        }
    }
    Ok(out)
}

//! Fisher z-transform.
//!
//! Correlation coefficients are bounded and skewed, so averaging them
//! directly biases Monte Carlo error estimates. The z-transform
//! `z = atanh(r)` maps (-1, 1) onto the real line where the sampling
//! distribution is approximately normal; mean/spread are computed there and
//! mapped back through `tanh`, which is why the resulting bounds are
//! asymmetric around the point estimate.

/// Fisher z-transform of a correlation coefficient.
///
/// Returns `None` when the transform diverges (`|r| >= 1`) or the input is
/// not finite, so degenerate Monte Carlo realizations can be rejected instead
/// of propagating infinities.
pub fn fisher_z(r: f64) -> Option<f64> {
    if r.is_finite() && r.abs() < 1.0 {
        Some(r.atanh())
    } else {
        None
    }
}

/// Inverse transform, mapping a z-value back into (-1, 1).
pub fn fisher_z_inv(z: f64) -> f64 {
    z.tanh()
}

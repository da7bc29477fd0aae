//! Small sample-statistics helpers shared by the estimator and the Monte
//! Carlo engine.
//!
//! Callers guard against empty/degenerate inputs before dividing by anything
//! derived from these values; the helpers themselves stay total.

/// Arithmetic mean. Returns 0.0 for an empty slice (callers never pass one,
/// but we keep the helper total rather than panicking).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation around a precomputed mean, with the (n-1)
/// denominator. Returns 0.0 when fewer than two values.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

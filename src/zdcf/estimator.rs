//! Per-bin correlation estimation.
//!
//! Given one bin, compute:
//!
//! - the unweighted mean lag and the sample spread of the bin's lags
//! - the discrete-correlation-function statistic: cross-products of each
//!   side's deviation from its bin-local mean, normalized by the product of
//!   the bin-local standard deviations
//!
//! The statistic is a Pearson correlation over the paired value sets local to
//! the bin; no other bin and no randomness is consulted. The denominator is
//! guarded before any division: a bin with fewer than two pairs or with zero
//! variance on either side is a hard error, not a NaN.

use crate::domain::Bin;
use crate::error::AppError;
use crate::math::{mean, sample_std};

/// Deterministic per-bin summary, before error estimation.
#[derive(Debug, Clone, Copy)]
pub struct BinEstimate {
    pub lag: f64,
    pub lag_spread: f64,
    pub r: f64,
}

/// Compute the bin's lag summary and correlation coefficient.
pub fn estimate_bin(bin: &Bin) -> Result<BinEstimate, AppError> {
    let lags: Vec<f64> = bin.pairs.iter().map(|p| p.lag).collect();
    let lag = mean(&lags);
    let lag_spread = sample_std(&lags, lag);

    let a_vals: Vec<f64> = bin.pairs.iter().map(|p| p.a_val).collect();
    let b_vals: Vec<f64> = bin.pairs.iter().map(|p| p.b_val).collect();
    let r = bin_correlation(&a_vals, &b_vals).ok_or_else(|| AppError::degenerate_bin(lag))?;

    Ok(BinEstimate { lag, lag_spread, r })
}

/// The bin-local correlation statistic over two paired value slices.
///
/// Returns `None` when fewer than two pairs or when either side has zero
/// variance (the Monte Carlo engine uses this to reject degenerate
/// realizations instead of failing the run). The result is clamped into
/// [-1, 1] against floating-point round-off.
pub fn bin_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len();
    if n < 2 || n != b.len() {
        return None;
    }

    let ma = mean(a);
    let mb = mean(b);
    let sa = sample_std(a, ma);
    let sb = sample_std(b, mb);
    if sa <= 0.0 || sb <= 0.0 {
        return None;
    }

    let mut cross = 0.0;
    for i in 0..n {
        cross += (a[i] - ma) * (b[i] - mb);
    }
    let r = cross / ((n as f64 - 1.0) * sa * sb);
    if !r.is_finite() {
        return None;
    }
    Some(r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LagPair;

    fn bin_from(values: &[(f64, f64, f64)]) -> Bin {
        // (lag, a_val, b_val)
        let pairs = values
            .iter()
            .enumerate()
            .map(|(i, &(lag, a_val, b_val))| LagPair {
                ia: i,
                ib: i + 1,
                lag,
                a_val,
                a_err: 0.1,
                b_val,
                b_err: 0.1,
            })
            .collect();
        Bin { pairs }
    }

    #[test]
    fn perfectly_correlated_values_give_r_one() {
        let bin = bin_from(&[(0.0, 1.0, 2.0), (1.0, 2.0, 4.0), (2.0, 3.0, 6.0)]);
        let est = estimate_bin(&bin).unwrap();
        assert!((est.r - 1.0).abs() < 1e-12);
        assert!((est.lag - 1.0).abs() < 1e-12);
        assert!((est.lag_spread - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfectly_anticorrelated_values_give_r_minus_one() {
        let bin = bin_from(&[(0.0, 1.0, 6.0), (0.0, 2.0, 4.0), (0.0, 3.0, 2.0)]);
        let est = estimate_bin(&bin).unwrap();
        assert!((est.r + 1.0).abs() < 1e-12);
        assert_eq!(est.lag_spread, 0.0);
    }

    #[test]
    fn uncorrelated_pattern_gives_zero() {
        let bin = bin_from(&[(0.0, -1.0, -1.0), (0.0, -1.0, 1.0), (0.0, 1.0, 1.0), (0.0, 1.0, -1.0)]);
        let est = estimate_bin(&bin).unwrap();
        assert!(est.r.abs() < 1e-12);
    }

    #[test]
    fn zero_variance_side_is_a_degenerate_bin_error() {
        let bin = bin_from(&[(0.0, 1.0, 5.0), (1.0, 2.0, 5.0), (2.0, 3.0, 5.0)]);
        let err = estimate_bin(&bin).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("Degenerate bin"));
    }

    #[test]
    fn single_pair_bin_is_degenerate() {
        let bin = bin_from(&[(3.0, 1.0, 2.0)]);
        assert_eq!(estimate_bin(&bin).unwrap_err().exit_code(), 4);
    }
}

//! Pair enumeration.
//!
//! Conventions (fixed):
//!
//! - lag = time(series B) - time(series A)
//! - autocorrelation iterates index pairs `(i, j)` with `i <= j` when zero
//!   lags are included and `i < j` when they are omitted, which yields
//!   n(n+1)/2 and n(n-1)/2 pairs respectively
//! - cross-correlation iterates the full index product of A and B and, when
//!   zero lags are omitted, drops pairs whose computed lag is exactly zero
//!
//! `count_pairs` must agree with `enumerate_pairs(..).len()` for every input;
//! it is used to validate the enumeration and to pre-size downstream buffers.

use crate::domain::{LagPair, LightCurve, ZdcfConfig};

/// Enumerate every eligible pair. Pairs cache the point data they reference,
/// so later stages never go back to the series.
pub fn enumerate_pairs(a: &LightCurve, b: &LightCurve, config: &ZdcfConfig) -> Vec<LagPair> {
    let mut out = Vec::with_capacity(count_pairs(a, b, config));
    if config.autocf {
        autocorrelation_pairs(a, config.omit_zero_lags, &mut out);
    } else {
        cross_correlation_pairs(a, b, config.omit_zero_lags, &mut out);
    }
    out
}

/// Count the pairs `enumerate_pairs` would produce, without materializing
/// them. Closed forms for autocorrelation; for cross-correlation with
/// zero-lag omission the coincident-time pairs are counted with a merge walk
/// over the two time-sorted series.
pub fn count_pairs(a: &LightCurve, b: &LightCurve, config: &ZdcfConfig) -> usize {
    if config.autocf {
        let n = a.len();
        if config.omit_zero_lags {
            n * (n - 1) / 2
        } else {
            n * (n + 1) / 2
        }
    } else {
        let total = a.len() * b.len();
        if config.omit_zero_lags {
            total - coincident_time_pairs(a, b)
        } else {
            total
        }
    }
}

fn autocorrelation_pairs(curve: &LightCurve, omit_zero_lags: bool, out: &mut Vec<LagPair>) {
    let pts = curve.points();
    for i in 0..pts.len() {
        let j_start = if omit_zero_lags { i + 1 } else { i };
        for j in j_start..pts.len() {
            out.push(LagPair {
                ia: i,
                ib: j,
                lag: pts[j].time - pts[i].time,
                a_val: pts[i].value,
                a_err: pts[i].error,
                b_val: pts[j].value,
                b_err: pts[j].error,
            });
        }
    }
}

fn cross_correlation_pairs(a: &LightCurve, b: &LightCurve, omit_zero_lags: bool, out: &mut Vec<LagPair>) {
    let pa = a.points();
    let pb = b.points();
    for (i, ap) in pa.iter().enumerate() {
        for (j, bp) in pb.iter().enumerate() {
            let lag = bp.time - ap.time;
            if omit_zero_lags && lag == 0.0 {
                continue;
            }
            out.push(LagPair {
                ia: i,
                ib: j,
                lag,
                a_val: ap.value,
                a_err: ap.error,
                b_val: bp.value,
                b_err: bp.error,
            });
        }
    }
}

/// Number of (i, j) index pairs with identical times across the two series.
///
/// Both series are time-sorted, so runs of equal times can be matched in a
/// single forward pass: each coincident time contributes
/// `count_in_a * count_in_b` zero-lag pairs.
fn coincident_time_pairs(a: &LightCurve, b: &LightCurve) -> usize {
    let pa = a.points();
    let pb = b.points();
    let mut i = 0;
    let mut j = 0;
    let mut count = 0;

    while i < pa.len() && j < pb.len() {
        let ta = pa[i].time;
        let tb = pb[j].time;
        if ta < tb {
            i += 1;
        } else if tb < ta {
            j += 1;
        } else {
            let mut run_a = 1;
            while i + run_a < pa.len() && pa[i + run_a].time == ta {
                run_a += 1;
            }
            let mut run_b = 1;
            while j + run_b < pb.len() && pb[j + run_b].time == tb {
                run_b += 1;
            }
            count += run_a * run_b;
            i += run_a;
            j += run_b;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ObsPoint;

    fn curve(times: &[f64]) -> LightCurve {
        let points = times
            .iter()
            .enumerate()
            .map(|(i, &t)| ObsPoint { time: t, value: i as f64, error: 0.1 })
            .collect();
        LightCurve::new("lc", points).unwrap()
    }

    fn config(autocf: bool, omit_zero_lags: bool) -> ZdcfConfig {
        ZdcfConfig {
            autocf,
            uniform_sampling: false,
            omit_zero_lags,
            minpts: 1,
            num_mc: 0,
            seed: 0,
        }
    }

    #[test]
    fn autocorrelation_counts_include_zero_lags() {
        // n = 3 with zero lags: n(n+1)/2 = 6 pairs.
        let c = curve(&[0.0, 1.0, 2.0]);
        let cfg = config(true, false);
        let pairs = enumerate_pairs(&c, &c, &cfg);
        assert_eq!(pairs.len(), 6);
        assert_eq!(count_pairs(&c, &c, &cfg), 6);
    }

    #[test]
    fn autocorrelation_counts_exclude_zero_lags() {
        // n = 4 without zero lags: n(n-1)/2 = 6 pairs.
        let c = curve(&[0.0, 1.0, 2.0, 3.0]);
        let cfg = config(true, true);
        let pairs = enumerate_pairs(&c, &c, &cfg);
        assert_eq!(pairs.len(), 6);
        assert_eq!(count_pairs(&c, &c, &cfg), 6);
        assert!(pairs.iter().all(|p| p.ia < p.ib));
    }

    #[test]
    fn cross_correlation_is_the_full_index_product() {
        let a = curve(&[0.0, 1.0, 2.0]);
        let b = curve(&[0.5, 1.5]);
        let cfg = config(false, false);
        assert_eq!(enumerate_pairs(&a, &b, &cfg).len(), 6);
        assert_eq!(count_pairs(&a, &b, &cfg), 6);
    }

    #[test]
    fn cross_correlation_drops_exact_zero_lags() {
        // Times 1.0 and 2.0 coincide across the series: 2 zero-lag pairs.
        let a = curve(&[0.0, 1.0, 2.0]);
        let b = curve(&[1.0, 2.0, 3.0]);
        let cfg = config(false, true);
        let pairs = enumerate_pairs(&a, &b, &cfg);
        assert_eq!(pairs.len(), 7);
        assert_eq!(count_pairs(&a, &b, &cfg), 7);
        assert!(pairs.iter().all(|p| p.lag != 0.0));
    }

    #[test]
    fn count_matches_enumeration_with_duplicate_times() {
        let a = curve(&[0.0, 1.0, 1.0, 2.0]);
        let b = curve(&[1.0, 1.0, 4.0]);
        for omit in [false, true] {
            let cfg = config(false, omit);
            assert_eq!(count_pairs(&a, &b, &cfg), enumerate_pairs(&a, &b, &cfg).len());
        }
    }

    #[test]
    fn lag_sign_is_b_minus_a() {
        let a = curve(&[10.0]);
        let b = curve(&[4.0]);
        let cfg = config(false, false);
        let pairs = enumerate_pairs(&a, &b, &cfg);
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].lag - (-6.0)).abs() < 1e-12);
    }
}

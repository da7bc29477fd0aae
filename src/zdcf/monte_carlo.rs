//! Monte Carlo error estimation for one bin.
//!
//! Per realization, every distinct participating point is perturbed once by
//! `N(0, 1) * error` and the bin correlation is recomputed with the exact
//! estimator statistic. The sampled coefficients are averaged in Fisher
//! z-space and the mean +/- one sample spread is mapped back through `tanh`,
//! which makes the resulting bounds asymmetric around the point estimate.
//!
//! Degenerate realizations (zero-variance resample, |r| = 1) are rejected
//! rather than fed into the diverging transform; if fewer than two valid
//! realizations remain, the bin's bounds are reported as undefined.
//!
//! The random stream is an explicit parameter. Nothing in this module reads
//! or advances a process-wide generator, so draws are reproducible and a
//! caller-owned RNG elsewhere in the process is left untouched.

use std::collections::HashMap;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Bin;
use crate::error::AppError;
use crate::math::{fisher_z, fisher_z_inv, mean, sample_std};
use crate::zdcf::estimator::bin_correlation;

/// Asymmetric coefficient bounds for one bin, or `None` when error
/// estimation is disabled or the Monte Carlo sample is degenerate.
pub fn mc_bounds(
    bin: &Bin,
    r_point: f64,
    autocf: bool,
    num_mc: usize,
    rng: &mut StdRng,
) -> Result<Option<(f64, f64)>, AppError> {
    if num_mc == 0 {
        return Ok(None);
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    // A point referenced by several pairs (or by both sides of an
    // autocorrelation pair) must receive a single offset per realization,
    // so draws are keyed by point index, not by pair.
    let a_slots = if autocf {
        slot_map(bin.pairs.iter().flat_map(|p| [p.ia, p.ib]))
    } else {
        slot_map(bin.pairs.iter().map(|p| p.ia))
    };
    let b_slots = if autocf {
        None
    } else {
        Some(slot_map(bin.pairs.iter().map(|p| p.ib)))
    };

    let n = bin.pairs.len();
    let mut pa = vec![0.0; n];
    let mut pb = vec![0.0; n];
    let mut z_samples = Vec::with_capacity(num_mc);

    for _ in 0..num_mc {
        let a_draws: Vec<f64> = (0..a_slots.len()).map(|_| normal.sample(rng)).collect();
        let b_draws: Vec<f64> = match &b_slots {
            Some(slots) => (0..slots.len()).map(|_| normal.sample(rng)).collect(),
            None => Vec::new(),
        };

        for (k, p) in bin.pairs.iter().enumerate() {
            pa[k] = p.a_val + p.a_err * a_draws[a_slots[&p.ia]];
            let b_offset = match &b_slots {
                Some(slots) => b_draws[slots[&p.ib]],
                None => a_draws[a_slots[&p.ib]],
            };
            pb[k] = p.b_val + p.b_err * b_offset;
        }

        if let Some(r) = bin_correlation(&pa, &pb) {
            if let Some(z) = fisher_z(r) {
                z_samples.push(z);
            }
        }
    }

    if z_samples.len() < 2 {
        return Ok(None);
    }

    let z_mean = mean(&z_samples);
    let z_spread = sample_std(&z_samples, z_mean);

    // Bounds always bracket the deterministic point estimate.
    let lo = fisher_z_inv(z_mean - z_spread).min(r_point);
    let hi = fisher_z_inv(z_mean + z_spread).max(r_point);
    Ok(Some((lo, hi)))
}

/// Map each distinct point index to a stable draw slot. Slot order follows
/// sorted index order, so the draw sequence is deterministic for a given bin.
fn slot_map<I: IntoIterator<Item = usize>>(indices: I) -> HashMap<usize, usize> {
    let mut sorted: Vec<usize> = indices.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.into_iter().enumerate().map(|(slot, idx)| (idx, slot)).collect()
}

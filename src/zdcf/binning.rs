//! Lag binning.
//!
//! Two strategies over the lag-sorted pair set:
//!
//! - **equal-population** (default): consecutive groups of `minpts` pairs; a
//!   trailing group smaller than `minpts` merges into its predecessor
//! - **uniform-width**: a fixed bin width derived from the observed lag
//!   range; bins whose population falls below `minpts` are discarded
//!
//! Degeneracies fail fast here, before any downstream statistic is computed:
//! an empty pair set, too few pairs for a single bin, a derived bin count of
//! zero, or uniform bins that are all undersized.

use crate::domain::{Bin, LagPair, ZdcfConfig};
use crate::error::AppError;

/// Partition the pair set into lag-ordered bins, or fail.
pub fn bin_pairs(mut pairs: Vec<LagPair>, config: &ZdcfConfig) -> Result<Vec<Bin>, AppError> {
    if pairs.is_empty() {
        return Err(AppError::no_valid_pairs());
    }

    // Deterministic order: lag ascending, ties broken by index pair so that
    // identical inputs always produce identical bins.
    pairs.sort_by(|x, y| {
        x.lag
            .partial_cmp(&y.lag)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (x.ia, x.ib).cmp(&(y.ia, y.ib)))
    });

    if config.uniform_sampling {
        uniform_width_bins(pairs, config.minpts)
    } else {
        equal_population_bins(pairs, config.minpts)
    }
}

fn equal_population_bins(pairs: Vec<LagPair>, minpts: usize) -> Result<Vec<Bin>, AppError> {
    if pairs.len() < minpts {
        return Err(AppError::no_valid_pairs());
    }

    let mut bins: Vec<Bin> = Vec::with_capacity(pairs.len() / minpts);
    for chunk in pairs.chunks(minpts) {
        if chunk.len() < minpts {
            // Trailing short group: fold into the previous bin rather than
            // emitting an undersized one. The guard above ensures the first
            // chunk is always full, so a predecessor exists.
            match bins.last_mut() {
                Some(prev) => prev.pairs.extend_from_slice(chunk),
                None => bins.push(Bin { pairs: chunk.to_vec() }),
            }
        } else {
            bins.push(Bin { pairs: chunk.to_vec() });
        }
    }

    Ok(bins)
}

fn uniform_width_bins(pairs: Vec<LagPair>, minpts: usize) -> Result<Vec<Bin>, AppError> {
    // Average candidate population equals minpts. A count of zero means no
    // bin of valid width exists for this pair set; that is distinct from
    // "bins existed but were all undersized" below.
    let nbins = pairs.len() / minpts;
    if nbins == 0 {
        return Err(AppError::zero_bins());
    }

    let lag_min = pairs[0].lag;
    let lag_max = pairs[pairs.len() - 1].lag;
    let range = lag_max - lag_min;
    if range <= 0.0 {
        // Every pair sits at one lag; a single bin holds them all and no
        // division by the zero width is ever attempted.
        return Ok(vec![Bin { pairs }]);
    }

    let width = range / nbins as f64;
    let mut buckets: Vec<Vec<LagPair>> = vec![Vec::new(); nbins];
    for pair in pairs {
        let idx = (((pair.lag - lag_min) / width).floor() as usize).min(nbins - 1);
        buckets[idx].push(pair);
    }

    let bins: Vec<Bin> = buckets
        .into_iter()
        .filter(|b| b.len() >= minpts)
        .map(|pairs| Bin { pairs })
        .collect();

    // With nbins = n_pairs / minpts at least one bucket reaches minpts
    // (pigeonhole), but only the width derivation guarantees that; an empty
    // bin list must never reach the estimator.
    if bins.is_empty() {
        return Err(AppError::no_valid_pairs());
    }
    Ok(bins)
}

//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - bin estimates: `o`
//! - Monte Carlo bounds: `|` bars spanning [r_lo, r_hi]
//! - zero-correlation axis: `-` line

use crate::domain::BinResult;

/// Render the correlation-vs-lag plot for a bin table.
pub fn render_ascii_plot(results: &[BinResult], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (lag_min, lag_max) = lag_range(results).unwrap_or((-1.0, 1.0));
    let (r_min, r_max) = pad_range(r_range(results).unwrap_or((-1.0, 1.0)), 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Zero axis first so bars and points can overlay it.
    if r_min < 0.0 && r_max > 0.0 {
        let row = map_y(0.0, r_min, r_max, height);
        for cell in &mut grid[row] {
            *cell = '-';
        }
    }

    for result in results {
        let x = map_x(result.lag, lag_min, lag_max, width);
        if let (Some(lo), Some(hi)) = (result.r_lo, result.r_hi) {
            let y_top = map_y(hi, r_min, r_max, height);
            let y_bottom = map_y(lo, r_min, r_max, height);
            for row in grid.iter_mut().take(y_bottom + 1).skip(y_top) {
                row[x] = '|';
            }
        }
    }

    // Points last: the estimate should stay visible over its own bar.
    for result in results {
        let x = map_x(result.lag, lag_min, lag_max, width);
        let y = map_y(result.r, r_min, r_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: lag=[{lag_min:.3}, {lag_max:.3}] | r=[{r_min:.2}, {r_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn lag_range(results: &[BinResult]) -> Option<(f64, f64)> {
    let mut min_lag = f64::INFINITY;
    let mut max_lag = f64::NEG_INFINITY;
    for r in results {
        min_lag = min_lag.min(r.lag);
        max_lag = max_lag.max(r.lag);
    }
    if min_lag.is_finite() && max_lag.is_finite() && max_lag > min_lag {
        Some((min_lag, max_lag))
    } else {
        None
    }
}

fn r_range(results: &[BinResult]) -> Option<(f64, f64)> {
    let mut min_r = f64::INFINITY;
    let mut max_r = f64::NEG_INFINITY;
    for result in results {
        min_r = min_r.min(result.r);
        max_r = max_r.max(result.r);
        if let Some(lo) = result.r_lo {
            min_r = min_r.min(lo);
        }
        if let Some(hi) = result.r_hi {
            max_r = max_r.max(hi);
        }
    }
    if min_r.is_finite() && max_r.is_finite() && max_r > min_r {
        Some((min_r, max_r))
    } else {
        None
    }
}

fn pad_range((min, max): (f64, f64), frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(lag: f64, lag_min: f64, lag_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((lag - lag_min) / (lag_max - lag_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(r: f64, r_min: f64, r_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((r - r_min) / (r_max - r_min)).clamp(0.0, 1.0);
    // r = max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

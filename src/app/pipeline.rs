//! Shared "run pipeline" logic used by the `run` and `table` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> pair enumeration -> binning -> estimation -> Monte Carlo
//!
//! The front-end code can then focus on presentation (summary vs table-only).

use crate::domain::{CorrelationMode, DcfFile, RunConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestedCurve, read_light_curve};
use crate::zdcf;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub curve_a: IngestedCurve,
    pub curve_b: Option<IngestedCurve>,
    pub n_pairs: usize,
    pub results: Vec<crate::domain::BinResult>,
}

/// Execute the full pipeline from light-curve files.
pub fn run_zdcf_files(config: &RunConfig) -> Result<RunOutput, AppError> {
    let curve_a = read_light_curve(&config.lc1_path, config.sep)?;
    let curve_b = match &config.lc2_path {
        Some(path) => Some(read_light_curve(path, config.sep)?),
        None => None,
    };
    run_zdcf_curves(config, curve_a, curve_b)
}

/// Execute the pipeline with pre-loaded curves.
///
/// This is useful in tests where curves are built in memory.
pub fn run_zdcf_curves(
    config: &RunConfig,
    curve_a: IngestedCurve,
    curve_b: Option<IngestedCurve>,
) -> Result<RunOutput, AppError> {
    let b_ref = curve_b.as_ref().map(|c| &c.curve);
    let n_pairs = zdcf::count_pairs(
        &curve_a.curve,
        b_ref.unwrap_or(&curve_a.curve),
        &config.zdcf,
    );
    let results = zdcf::run_zdcf(&curve_a.curve, b_ref, &config.zdcf)?;

    Ok(RunOutput {
        curve_a,
        curve_b,
        n_pairs,
        results,
    })
}

/// Assemble the portable JSON representation of a run.
pub fn to_dcf_file(run: &RunOutput, config: &RunConfig) -> DcfFile {
    DcfFile {
        tool: "zdcf".to_string(),
        mode: CorrelationMode::from_config(&config.zdcf),
        curve_a: run.curve_a.curve.name().to_string(),
        curve_b: run.curve_b.as_ref().map(|c| c.curve.name().to_string()),
        config: config.zdcf.clone(),
        n_pairs: run.n_pairs,
        bins: run.results.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LightCurve, ObsPoint, ZdcfConfig};

    fn ingested(name: &str, n: usize, phase: f64) -> IngestedCurve {
        let points = (0..n)
            .map(|i| {
                let t = i as f64 + 0.25 * ((i % 2) as f64);
                ObsPoint {
                    time: t,
                    value: (0.5 * t + phase).sin(),
                    error: 0.05,
                }
            })
            .collect();
        IngestedCurve {
            curve: LightCurve::new(name, points).unwrap(),
            row_errors: Vec::new(),
            rows_read: n,
            rows_used: n,
        }
    }

    fn run_config() -> RunConfig {
        RunConfig {
            lc1_path: "lc1.csv".into(),
            lc2_path: Some("lc2.csv".into()),
            sep: ',',
            output: None,
            export_json: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            zdcf: ZdcfConfig {
                autocf: false,
                uniform_sampling: false,
                omit_zero_lags: false,
                minpts: 11,
                num_mc: 20,
                seed: 42,
            },
        }
    }

    #[test]
    fn pipeline_reports_pair_count_and_results() {
        let config = run_config();
        let run = run_zdcf_curves(&config, ingested("a", 20, 0.0), Some(ingested("b", 20, 0.4)))
            .unwrap();
        assert_eq!(run.n_pairs, 400);
        assert!(!run.results.is_empty());
    }

    #[test]
    fn dcf_file_mirrors_the_run() {
        let config = run_config();
        let run = run_zdcf_curves(&config, ingested("a", 20, 0.0), Some(ingested("b", 20, 0.4)))
            .unwrap();
        let file = to_dcf_file(&run, &config);
        assert_eq!(file.curve_a, "a");
        assert_eq!(file.curve_b.as_deref(), Some("b"));
        assert_eq!(file.bins.len(), run.results.len());
        assert_eq!(file.n_pairs, 400);
    }
}

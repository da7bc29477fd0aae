//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads light curves
//! - runs the correlation pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, PlotArgs, RunArgs};
use crate::domain::{RunConfig, ZdcfConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `zdcf` binary.
pub fn run() -> Result<(), AppError> {
    // We want `zdcf lc.csv` to behave like `zdcf run lc.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::Full),
        Command::Table(args) => handle_run(args, OutputMode::TableOnly),
        Command::Plot(args) => handle_plot(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TableOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_zdcf_files(&config)?;

    if mode == OutputMode::Full {
        println!("{}", crate::report::format_run_summary(&run, &config));
    }

    println!("{}", crate::report::format_bin_table(&run.results));

    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_ascii_plot(&run.results, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.output {
        crate::io::export::write_dcf_table(path, &run.results, config.sep)?;
    }
    if let Some(path) = &config.export_json {
        let file = pipeline::to_dcf_file(&run, &config);
        crate::io::table::write_table_json(path, &file)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let table = crate::io::table::read_table_json(&args.table)?;
    let plot = crate::plot::render_ascii_plot(&table.bins, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Resolve CLI args into the validated run configuration.
pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    if args.autocf && args.lc2.is_some() {
        return Err(AppError::new(
            2,
            "Autocorrelation takes a single light curve; drop the second path or `--autocf`.",
        ));
    }
    if !args.autocf && args.lc2.is_none() {
        return Err(AppError::new(
            2,
            "Cross-correlation needs two light curves; pass a second path or use `--autocf`.",
        ));
    }
    if !args.sep.is_ascii() {
        return Err(AppError::new(2, "Separator must be a single ASCII character."));
    }

    let zdcf = ZdcfConfig {
        autocf: args.autocf,
        uniform_sampling: args.uniform,
        omit_zero_lags: args.omit_zero_lags,
        minpts: args.minpts,
        num_mc: args.num_mc,
        seed: args.seed,
    };
    zdcf.validate()?;

    Ok(RunConfig {
        lc1_path: args.lc1.clone(),
        lc2_path: args.lc2.clone(),
        sep: args.sep,
        output: args.output.clone(),
        export_json: args.export_json.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        zdcf,
    })
}

/// Rewrite argv so `zdcf <file>` defaults to `zdcf run <file>`.
///
/// Rules:
/// - `zdcf lc.csv ...`         -> `zdcf run lc.csv ...`
/// - `zdcf --autocf lc.csv`    -> `zdcf run --autocf lc.csv`
/// - `zdcf --help/--version`   -> unchanged (show top-level help/version)
/// - `zdcf run/table/plot ...` -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "table" | "plot");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "run".to_string());
    argv
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads CSV data or generates synthetic samples
//! - runs curve fitting and comparison
//! - prints reports/plots (diagnostics go to stderr)
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CompareArgs, FitArgs, PlotArgs, SampleArgs};
use crate::domain::{CsvSource, FitConfig, FitOptions, SampleConfig};
use crate::error::AppError;
use crate::io::ingest::IngestedData;

pub mod pipeline;

/// Entry point for the `cfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Compare(args) => handle_compare(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    report_row_errors(&run.ingest);
    for w in &run.result.warnings {
        eprintln!("warning: {} fit: {w}", run.result.kind);
    }

    println!("{}", crate::report::format_fit_summary(&run.ingest, &run.result));
    println!("{}", crate::report::format_points_table(&run.residuals));

    if config.plot {
        let highlight = crate::report::largest_residuals(&run.residuals, args.top);
        let plot = crate::plot::render_ascii_plot(
            &run.residuals,
            &run.result,
            config.plot_width,
            config.plot_height,
            Some(&highlight),
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.result)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &run.result)?;
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let (source, options) = source_and_options(&args.input);
    let out = pipeline::run_compare(&source, &options)?;

    report_row_errors(&out.ingest);
    println!("{}", crate::report::format_comparison(&out.comparison));
    println!("{}", crate::report::format_fit_block(&out.comparison.best));

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let points = crate::data::generate_sample(&config)?;

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| {
                AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display()))
            })?;
            crate::io::export::write_points(std::io::BufWriter::new(file), &points)?;
            eprintln!("wrote {} points to {}", points.len(), path.display());
        }
        None => crate::io::export::write_points(std::io::stdout().lock(), &points)?,
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    if !curve.grid.y.iter().flatten().any(|y| y.is_finite()) {
        return Err(AppError::new(4, "Curve grid has no finite values to plot."));
    }

    println!("{} | r²={}", curve.equation, crate::models::fmt_number(curve.r2));
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn report_row_errors(ingest: &IngestedData) {
    for e in &ingest.row_errors {
        eprintln!("warning: line {}: {}", e.line, e.message);
    }
}

fn source_and_options(args: &crate::cli::InputArgs) -> (CsvSource, FitOptions) {
    let source = CsvSource {
        path: args.input.clone(),
        x_col: args.x_col.clone(),
        y_col: args.y_col.clone(),
    };
    let options = FitOptions {
        order: args.order,
        precision: args.precision,
    };
    (source, options)
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let (source, options) = source_and_options(&args.input);
    FitConfig {
        source,
        kind: args.kind,
        options,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        kind: args.kind,
        coefficients: args.coefficients.clone(),
        count: args.n,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        missing_prob: args.missing_prob,
        seed: args.seed,
    }
}

//! Command-line parsing for the `cfit` curve fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting and math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FitKind;

/// Highest polynomial order accepted on the command line.
pub const MAX_ORDER: u64 = 20;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cfit", version, about = "Least-squares curve fitting for x/y data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one curve kind to a CSV dataset, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Fit every curve kind and rank them by r².
    Compare(CompareArgs),
    /// Generate a synthetic dataset from a known curve.
    Sample(SampleArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Input columns and estimator options shared by `fit` and `compare`.
#[derive(Debug, Parser, Clone)]
pub struct InputArgs {
    /// CSV file with a header row.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Header of the x column.
    #[arg(long, default_value = "x")]
    pub x_col: String,

    /// Header of the y column.
    #[arg(long, default_value = "y")]
    pub y_col: String,

    /// Polynomial order (ignored by the other kinds).
    #[arg(
        long,
        default_value_t = 2,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_ORDER)
    )]
    pub order: usize,

    /// Decimal places kept in coefficients, predictions, and r².
    #[arg(short = 'p', long, default_value_t = 3, allow_negative_numbers = true)]
    pub precision: i32,
}

/// Options for fitting a single kind.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Curve kind to fit.
    #[arg(short = 'k', long, value_enum)]
    pub kind: FitKind,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Highlight the N largest residuals in the plot.
    #[arg(long, default_value_t = 0)]
    pub top: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (kind + coefficients + fitted grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for ranking all kinds.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Options for synthetic data generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Curve kind to sample from.
    #[arg(short = 'k', long, value_enum)]
    pub kind: FitKind,

    /// Curve coefficients, comma separated, in the same layout the fitter reports.
    #[arg(
        short = 'c',
        long,
        value_delimiter = ',',
        required = true,
        allow_negative_numbers = true
    )]
    pub coefficients: Vec<f64>,

    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub n: usize,

    /// Lower bound of the x range.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Upper bound of the x range.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Probability that a point is written without a y value.
    #[arg(long, default_value_t = 0.0)]
    pub missing_prob: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the CSV here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `cfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

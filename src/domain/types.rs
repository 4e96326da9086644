//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the estimators and handed back to callers as plain values
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// An input observation.
///
/// `y` is `None` when there is no observation at this `x`. Such points are
/// skipped by every summation and by r², but still receive a prediction so the
/// output stays index-aligned with the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    /// A point with no observed `y`.
    pub fn missing(x: f64) -> Self {
        Self { x, y: None }
    }

    /// `(x, y)` when `y` is present.
    pub fn observed(&self) -> Option<(f64, f64)> {
        self.y.map(|y| (self.x, y))
    }
}

/// A predicted point. Both coordinates are rounded to the fit precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedPoint {
    pub x: f64,
    pub y: f64,
}

/// Estimator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Polynomial degree. Ignored by the other kinds.
    pub order: usize,
    /// Decimal places applied to every numeric output. Negative values round
    /// to tens, hundreds, ...
    pub precision: i32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            order: 2,
            precision: 3,
        }
    }
}

/// Curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitKind {
    /// `y = m·x + c`
    Linear,
    /// `y = a·e^(b·x)`
    Exponential,
    /// `y = a + b·ln(x)`
    Logarithmic,
    /// `y = a·x^b`
    Power,
    /// `y = c0 + c1·x + ... + ck·x^k`
    Polynomial,
}

impl FitKind {
    /// Every kind, simplest first. Comparison ties resolve in this order.
    pub const ALL: [FitKind; 5] = [
        FitKind::Linear,
        FitKind::Exponential,
        FitKind::Logarithmic,
        FitKind::Power,
        FitKind::Polynomial,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            FitKind::Linear => "linear",
            FitKind::Exponential => "exponential",
            FitKind::Logarithmic => "logarithmic",
            FitKind::Power => "power",
            FitKind::Polynomial => "polynomial",
        }
    }

    /// Number of coefficients the model estimates.
    pub fn param_count(self, order: usize) -> usize {
        match self {
            FitKind::Polynomial => order.saturating_add(1),
            _ => 2,
        }
    }
}

impl fmt::Display for FitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Non-fatal conditions detected while fitting.
///
/// Warnings never alter the numeric output; they only explain why it may be
/// NaN-laden or meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum FitWarning {
    /// Fewer observed points than coefficients to estimate.
    Underdetermined { required: usize, observed: usize },
    /// `ln(x)` taken for `x <= 0` (logarithmic, power).
    NonPositiveX { count: usize },
    /// `ln(y)` taken for `y <= 0` (exponential, power).
    NonPositiveY { count: usize },
    /// At least one coefficient is NaN or infinite.
    NonFiniteCoefficients,
}

impl fmt::Display for FitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitWarning::Underdetermined { required, observed } => write!(
                f,
                "underdetermined fit: {observed} observed point(s), {required} required; output is meaningless"
            ),
            FitWarning::NonPositiveX { count } => {
                write!(f, "{count} point(s) with x <= 0 fed into ln(x)")
            }
            FitWarning::NonPositiveY { count } => {
                write!(f, "{count} point(s) with y <= 0 fed into ln(y)")
            }
            FitWarning::NonFiniteCoefficients => f.write_str("non-finite coefficients"),
        }
    }
}

/// Output of a single estimator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub kind: FitKind,
    pub options: FitOptions,
    /// Input points, passed through unrounded.
    pub points: Vec<Point>,
    /// One prediction per input point, same order.
    pub predicted: Vec<FittedPoint>,
    /// Kind-specific coefficients:
    ///
    /// - linear: `[gradient, intercept]`
    /// - exponential, logarithmic, power: `[a, b]`
    /// - polynomial: `[c0, c1, ..., c_order]` (lowest power first)
    pub coefficients: Vec<f64>,
    pub equation: String,
    pub r2: f64,
    pub warnings: Vec<FitWarning>,
}

impl FitResult {
    /// Predict a rounded point at an arbitrary `x` using the fitted model.
    pub fn predict(&self, x: f64) -> FittedPoint {
        crate::models::predict_point(self.kind, &self.coefficients, x, self.options.precision)
    }

    /// Number of input points with an observed `y`.
    pub fn observed_len(&self) -> usize {
        self.points.iter().filter(|p| p.y.is_some()).count()
    }

    pub fn is_underdetermined(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, FitWarning::Underdetermined { .. }))
    }
}

/// Where to read points from.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
    /// Header of the x column (matched case-insensitively).
    pub x_col: String,
    /// Header of the y column (matched case-insensitively).
    pub y_col: String,
}

/// A `cfit fit` run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: CsvSource,
    pub kind: FitKind,
    pub options: FitOptions,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// Synthetic dataset settings for `cfit sample`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub kind: FitKind,
    /// Coefficients in the same layout as `FitResult::coefficients`.
    pub coefficients: Vec<f64>,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
    /// Probability that a point's `y` is dropped.
    pub missing_prob: f64,
    pub seed: u64,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub kind: FitKind,
    pub options: FitOptions,
    pub coefficients: Vec<f64>,
    pub equation: String,
    pub r2: f64,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    /// `None` where the model is not finite (e.g. `ln(0)`); written as `null`.
    pub y: Vec<Option<f64>>,
}

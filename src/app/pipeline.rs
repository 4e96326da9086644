//! Shared "fit pipeline" logic used by the `fit` and `compare` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> fit (one kind or all) -> residuals
//!
//! The command handlers can then focus on presentation and exports.

use crate::domain::{CsvSource, FitConfig, FitOptions};
use crate::error::AppError;
use crate::fit::selection::FitComparison;
use crate::io::ingest::IngestedData;
use crate::report::Residual;

/// All computed outputs of a single `cfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub result: crate::domain::FitResult,
    pub residuals: Vec<Residual>,
}

/// All computed outputs of a single `cfit compare` run.
#[derive(Debug, Clone)]
pub struct CompareOutput {
    pub ingest: IngestedData,
    pub comparison: FitComparison,
}

/// Load the configured CSV and fit the configured kind.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = crate::io::ingest::load_points(&config.source)?;
    let result = crate::fit::fit(config.kind, &ingest.points, &config.options);
    let residuals = crate::report::compute_residuals(&result);

    Ok(RunOutput {
        ingest,
        result,
        residuals,
    })
}

/// Load a CSV and rank every kind on it.
pub fn run_compare(source: &CsvSource, options: &FitOptions) -> Result<CompareOutput, AppError> {
    let ingest = crate::io::ingest::load_points(source)?;
    let comparison = crate::fit::selection::fit_and_rank(&ingest.points, options)?;

    Ok(CompareOutput { ingest, comparison })
}

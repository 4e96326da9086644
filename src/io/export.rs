//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Rows follow the input order; points without an observed `y` keep their row
//! with empty `y_obs` and `residual` cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitResult, Point};
use crate::error::AppError;

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, result: &FitResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, result)
}

/// Write per-point results to any writer.
pub fn write_results<W: Write>(mut out: W, result: &FitResult) -> Result<(), AppError> {
    writeln!(out, "index,x,y_obs,x_fit,y_fit,residual")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, (p, fit)) in result.points.iter().zip(&result.predicted).enumerate() {
        let y_obs = p.y.map(|y| y.to_string()).unwrap_or_default();
        let residual = p.y.map(|y| (y - fit.y).to_string()).unwrap_or_default();
        writeln!(out, "{i},{},{y_obs},{},{},{residual}", p.x, fit.x, fit.y)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write raw points (`x,y`) to any writer; missing `y` is an empty cell.
///
/// This is the format `cfit sample` emits and `cfit fit` reads back.
pub fn write_points<W: Write>(mut out: W, points: &[Point]) -> Result<(), AppError> {
    writeln!(out, "x,y").map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for p in points {
        let y = p.y.map(|y| y.to_string()).unwrap_or_default();
        writeln!(out, "{},{y}", p.x).map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    out.flush().map_err(|e| AppError::new(2, format!("Failed to flush CSV output: {e}")))
}

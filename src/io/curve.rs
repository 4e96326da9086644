//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - fit kind + options + coefficients + equation + r²
//! - a generation timestamp
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, CurveGrid, FitResult};
use crate::error::AppError;
use crate::io::ingest::compute_stats;

/// Number of grid points written to curve files.
const GRID_POINTS: usize = 101;

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, result: &FitResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    let curve = curve_file(result);
    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

/// Build the serializable curve for a fit, gridded over the input x range.
pub fn curve_file(result: &FitResult) -> CurveFile {
    let (x_min, x_max) = compute_stats(&result.points)
        .map(|s| (s.x_min, s.x_max))
        .unwrap_or((0.0, 1.0));

    CurveFile {
        tool: "cfit".to_string(),
        generated: Utc::now(),
        kind: result.kind,
        options: result.options,
        coefficients: result.coefficients.clone(),
        equation: result.equation.clone(),
        r2: result.r2,
        grid: build_grid(result, x_min, x_max, GRID_POINTS),
    }
}

fn build_grid(result: &FitResult, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let mut x0 = x_min;
    let mut x1 = x_max;
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);

    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let p = result.predict(x0 + u * (x1 - x0));
        xs.push(p.x);
        ys.push(p.y.is_finite().then_some(p.y));
    }

    CurveGrid { x: xs, y: ys }
}

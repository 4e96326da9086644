//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::FitResult;

/// A per-point fitted row (used for tables, plots, and exports).
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    pub index: usize,
    pub x: f64,
    pub y_obs: Option<f64>,
    pub y_fit: f64,
    /// `y_obs - y_fit`, absent when `y_obs` is.
    pub residual: Option<f64>,
}

/// Pair every input point with its prediction.
pub fn compute_residuals(result: &FitResult) -> Vec<Residual> {
    result
        .points
        .iter()
        .zip(&result.predicted)
        .enumerate()
        .map(|(index, (p, fit))| Residual {
            index,
            x: p.x,
            y_obs: p.y,
            y_fit: fit.y,
            residual: p.y.map(|y| y - fit.y),
        })
        .collect()
}

/// The `top_n` observed points with the largest absolute residual, largest first.
pub fn largest_residuals(residuals: &[Residual], top_n: usize) -> Vec<Residual> {
    let mut sorted: Vec<Residual> = residuals.iter().filter(|r| r.residual.is_some()).cloned().collect();
    sorted.sort_by(|a, b| {
        let ra = a.residual.map(f64::abs).unwrap_or(0.0);
        let rb = b.residual.map(f64::abs).unwrap_or(0.0);
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}

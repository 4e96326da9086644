//! Coefficient of determination (r²).
//!
//! ```text
//! r² = 1 - SSres / SStot
//! SSres = Σ (y_i - ŷ_i)^2
//! SStot = Σ (y_i - ȳ)^2
//! ```
//!
//! Only points with an observed `y` take part; predictions are matched to
//! observations by index.

use crate::domain::{FittedPoint, Point};

/// Compute r² for `points` against the index-aligned `predicted` values.
///
/// Returns `NaN` when fewer than two points carry an observed `y` (the total
/// sum of squares is zero). Otherwise the raw division is returned as-is, so
/// constant observations yield `NaN` or `-inf` rather than a special value.
///
/// Callers must pass slices of equal length; extra trailing entries on either
/// side are ignored.
pub fn determination_coefficient(points: &[Point], predicted: &[FittedPoint]) -> f64 {
    let observed: Vec<(f64, f64)> = points
        .iter()
        .zip(predicted)
        .filter_map(|(p, fit)| p.y.map(|y| (y, fit.y)))
        .collect();

    if observed.len() < 2 {
        return f64::NAN;
    }

    let mean = observed.iter().map(|&(y, _)| y).sum::<f64>() / observed.len() as f64;

    let ss_tot: f64 = observed
        .iter()
        .map(|&(y, _)| {
            let d = y - mean;
            d * d
        })
        .sum();

    let ss_res: f64 = observed
        .iter()
        .map(|&(y, y_fit)| {
            let r = y - y_fit;
            r * r
        })
        .sum();

    1.0 - ss_res / ss_tot
}

//! Comparison of every curve family on one dataset.
//!
//! The tool fits each kind independently (in parallel) and:
//! 1. Skips kinds that are underdetermined for the data
//! 2. Skips kinds whose r² is not finite (e.g. `ln` of non-positive values)
//! 3. Picks the kind with the highest r²; ties go to the kind listed first in
//!    `FitKind::ALL` (simplest first)
//!
//! Each kind only reads its own inputs, so the parallel run produces the same
//! numbers as a sequential one.

use rayon::prelude::*;

use crate::domain::{FitKind, FitOptions, FitResult, Point};
use crate::error::AppError;
use crate::fit::estimators::fit;

/// Output of fitting + ranking.
#[derive(Debug, Clone)]
pub struct FitComparison {
    pub best: FitResult,
    /// Qualifying fits, ordered by descending r².
    pub fits: Vec<FitResult>,
    /// Kinds that did not qualify and why (for diagnostics).
    pub skipped: Vec<(FitKind, String)>,
}

/// Fit every kind and rank the qualifying ones by r².
pub fn fit_and_rank(points: &[Point], options: &FitOptions) -> Result<FitComparison, AppError> {
    let results: Vec<FitResult> = FitKind::ALL
        .par_iter()
        .map(|&kind| fit(kind, points, options))
        .collect();

    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for result in results {
        if let Some(reason) = disqualify(&result) {
            skipped.push((result.kind, reason));
        } else {
            fits.push(result);
        }
    }

    if fits.is_empty() {
        return Err(AppError::new(3, "No curve family produced a usable fit for this data."));
    }

    // Stable sort keeps `FitKind::ALL` order among equal r².
    fits.sort_by(|a, b| b.r2.partial_cmp(&a.r2).unwrap_or(std::cmp::Ordering::Equal));
    let best = fits[0].clone();

    Ok(FitComparison { best, fits, skipped })
}

fn disqualify(result: &FitResult) -> Option<String> {
    if result.is_underdetermined() {
        let required = result.kind.param_count(result.options.order);
        return Some(format!(
            "Underdetermined: n={} < k={required}",
            result.observed_len()
        ));
    }
    if !result.r2.is_finite() {
        return Some(format!("Non-finite r² ({})", result.r2));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<Point> {
        xs.iter().map(|&x| Point::new(x, f(x))).collect()
    }

    #[test]
    fn picks_exponential_on_exponential_data() {
        let xs: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
        let points = curve(&xs, |x| 1.5 * (0.8 * x).exp());
        let cmp = fit_and_rank(&points, &FitOptions::default()).unwrap();

        // Logarithmic and power take ln(0) and drop out.
        assert_eq!(cmp.best.kind, FitKind::Exponential);
        assert!(cmp.skipped.iter().any(|(k, _)| *k == FitKind::Logarithmic));
        assert!(cmp.skipped.iter().any(|(k, _)| *k == FitKind::Power));
    }

    #[test]
    fn ties_resolve_to_simplest_kind() {
        // A straight line is fitted perfectly by linear and by polynomial.
        let points = curve(&[1.0, 2.0, 3.0, 4.0, 5.0], |x| 3.0 * x - 1.0);
        let cmp = fit_and_rank(&points, &FitOptions::default()).unwrap();
        assert_eq!(cmp.best.kind, FitKind::Linear);
        assert_eq!(cmp.best.r2, 1.0);
        assert!(cmp.fits.iter().any(|f| f.kind == FitKind::Polynomial && f.r2 == 1.0));
    }

    #[test]
    fn fits_are_sorted_by_r2() {
        let points = curve(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], |x| 2.0 * x.powf(0.7) + 0.1 * x.sin());
        let cmp = fit_and_rank(&points, &FitOptions::default()).unwrap();
        for pair in cmp.fits.windows(2) {
            assert!(pair[0].r2 >= pair[1].r2);
        }
        assert_eq!(cmp.fits.len() + cmp.skipped.len(), FitKind::ALL.len());
    }

    #[test]
    fn high_order_polynomial_is_skipped_when_underdetermined() {
        let points = curve(&[1.0, 2.0, 3.0], |x| x * x);
        let cmp = fit_and_rank(&points, &FitOptions { order: 4, precision: 3 }).unwrap();
        let (_, reason) = cmp
            .skipped
            .iter()
            .find(|(k, _)| *k == FitKind::Polynomial)
            .expect("polynomial should be skipped");
        assert!(reason.contains("Underdetermined"));
    }

    #[test]
    fn errors_when_nothing_qualifies() {
        let err = fit_and_rank(&[Point::new(1.0, 1.0)], &FitOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}

//! The five curve estimators.
//!
//! Each estimator:
//! - accumulates its sums in one pass over the points with an observed `y`
//! - solves for the coefficients in closed form (or, for polynomials, via the
//!   Gaussian solver) and rounds them to `options.precision`
//! - predicts every input `x`, including points without an observed `y`
//! - scores the prediction with r² and formats the equation
//!
//! No input is rejected. Empty sets, `ln` of non-positive values, and singular
//! systems all flow through as NaN/inf; the matching `FitWarning`s are attached
//! to the result instead.

use crate::domain::{FitKind, FitOptions, FitResult, FitWarning, Point};
use crate::math::{determination_coefficient, gaussian_elimination, round};
use crate::models::{format_equation, predict_point};

/// Fit `points` with the estimator for `kind`.
pub fn fit(kind: FitKind, points: &[Point], options: &FitOptions) -> FitResult {
    match kind {
        FitKind::Linear => linear(points, options),
        FitKind::Exponential => exponential(points, options),
        FitKind::Logarithmic => logarithmic(points, options),
        FitKind::Power => power(points, options),
        FitKind::Polynomial => polynomial(points, options),
    }
}

/// Least-squares line `y = m·x + c`.
///
/// When every observed `x` is identical the slope is undefined and is forced
/// to zero. The intercept is derived from the rounded gradient.
pub fn linear(points: &[Point], options: &FitOptions) -> FitResult {
    let precision = options.precision;

    let mut len = 0usize;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_xy = 0.0;
    for (x, y) in points.iter().filter_map(Point::observed) {
        len += 1;
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }

    let n = len as f64;
    let run = n * sum_xx - sum_x * sum_x;
    let rise = n * sum_xy - sum_x * sum_y;
    let gradient = if run == 0.0 { 0.0 } else { round(rise / run, precision) };
    let intercept = round(sum_y / n - gradient * sum_x / n, precision);

    finish(FitKind::Linear, points, options, vec![gradient, intercept])
}

/// `y = a·e^(b·x)` from the y-weighted log-linear normal equations.
pub fn exponential(points: &[Point], options: &FitOptions) -> FitResult {
    let precision = options.precision;

    let mut sum_y = 0.0;
    let mut sum_xxy = 0.0;
    let mut sum_y_ln_y = 0.0;
    let mut sum_xy_ln_y = 0.0;
    let mut sum_xy = 0.0;
    for (x, y) in points.iter().filter_map(Point::observed) {
        let ln_y = y.ln();
        sum_y += y;
        sum_xxy += x * x * y;
        sum_y_ln_y += y * ln_y;
        sum_xy_ln_y += x * y * ln_y;
        sum_xy += x * y;
    }

    let denominator = sum_y * sum_xxy - sum_xy * sum_xy;
    let a = ((sum_xxy * sum_y_ln_y - sum_xy * sum_xy_ln_y) / denominator).exp();
    let b = (sum_y * sum_xy_ln_y - sum_xy * sum_y_ln_y) / denominator;

    finish(
        FitKind::Exponential,
        points,
        options,
        vec![round(a, precision), round(b, precision)],
    )
}

/// `y = a + b·ln(x)`. The intercept is derived from the rounded slope.
pub fn logarithmic(points: &[Point], options: &FitOptions) -> FitResult {
    let precision = options.precision;

    let mut len = 0usize;
    let mut sum_ln_x = 0.0;
    let mut sum_y_ln_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_ln_x_sq = 0.0;
    for (x, y) in points.iter().filter_map(Point::observed) {
        let ln_x = x.ln();
        len += 1;
        sum_ln_x += ln_x;
        sum_y_ln_x += y * ln_x;
        sum_y += y;
        sum_ln_x_sq += ln_x * ln_x;
    }

    let n = len as f64;
    let b = round(
        (n * sum_y_ln_x - sum_y * sum_ln_x) / (n * sum_ln_x_sq - sum_ln_x * sum_ln_x),
        precision,
    );
    let a = round((sum_y - b * sum_ln_x) / n, precision);

    finish(FitKind::Logarithmic, points, options, vec![a, b])
}

/// `y = a·x^b` by least squares on `ln(y) = ln(a) + b·ln(x)`.
pub fn power(points: &[Point], options: &FitOptions) -> FitResult {
    let precision = options.precision;

    let mut len = 0usize;
    let mut sum_ln_x = 0.0;
    let mut sum_ln_x_ln_y = 0.0;
    let mut sum_ln_y = 0.0;
    let mut sum_ln_x_sq = 0.0;
    for (x, y) in points.iter().filter_map(Point::observed) {
        let ln_x = x.ln();
        let ln_y = y.ln();
        len += 1;
        sum_ln_x += ln_x;
        sum_ln_x_ln_y += ln_x * ln_y;
        sum_ln_y += ln_y;
        sum_ln_x_sq += ln_x * ln_x;
    }

    let n = len as f64;
    let b = (n * sum_ln_x_ln_y - sum_ln_x * sum_ln_y) / (n * sum_ln_x_sq - sum_ln_x * sum_ln_x);
    let a = ((sum_ln_y - b * sum_ln_x) / n).exp();

    finish(
        FitKind::Power,
        points,
        options,
        vec![round(a, precision), round(b, precision)],
    )
}

/// Least-squares polynomial of degree `options.order`.
///
/// Builds the `(order+1)²` normal-equation system and hands it to
/// [`gaussian_elimination`]. The stored coefficients are lowest power first.
pub fn polynomial(points: &[Point], options: &FitOptions) -> FitResult {
    let precision = options.precision;
    let k = options.order.saturating_add(1);
    let observed: Vec<(f64, f64)> = points.iter().filter_map(Point::observed).collect();

    // Unknown `c` is the coefficient of x^(order - c): highest power first.
    let power_of = |c: usize| (k - 1 - c) as i32;

    let mut matrix: Vec<Vec<f64>> = Vec::with_capacity(k + 1);
    for c in 0..k {
        let column = (0..k)
            .map(|r| {
                let p = power_of(r) + power_of(c);
                observed.iter().map(|&(x, _)| x.powi(p)).sum::<f64>()
            })
            .collect();
        matrix.push(column);
    }
    let rhs = (0..k)
        .map(|r| {
            let p = power_of(r);
            observed.iter().map(|&(x, y)| x.powi(p) * y).sum::<f64>()
        })
        .collect();
    matrix.push(rhs);

    let mut coefficients = gaussian_elimination(matrix);
    // Solved highest power first; stored lowest power first so index == power.
    // `format_equation` walks this vector backwards to print highest first.
    coefficients.reverse();
    let coefficients = coefficients.into_iter().map(|c| round(c, precision)).collect();

    finish(FitKind::Polynomial, points, options, coefficients)
}

/// Shared tail: predictions, r², equation string, warnings.
fn finish(kind: FitKind, points: &[Point], options: &FitOptions, coefficients: Vec<f64>) -> FitResult {
    let precision = options.precision;

    let predicted: Vec<_> = points
        .iter()
        .map(|p| predict_point(kind, &coefficients, p.x, precision))
        .collect();
    let r2 = round(determination_coefficient(points, &predicted), precision);
    let equation = format_equation(kind, &coefficients);
    let warnings = collect_warnings(kind, points, options, &coefficients);

    FitResult {
        kind,
        options: *options,
        points: points.to_vec(),
        predicted,
        coefficients,
        equation,
        r2,
        warnings,
    }
}

fn collect_warnings(
    kind: FitKind,
    points: &[Point],
    options: &FitOptions,
    coefficients: &[f64],
) -> Vec<FitWarning> {
    let mut warnings = Vec::new();

    let observed: Vec<(f64, f64)> = points.iter().filter_map(Point::observed).collect();
    let required = kind.param_count(options.order);
    if observed.len() < required {
        warnings.push(FitWarning::Underdetermined {
            required,
            observed: observed.len(),
        });
    }

    if matches!(kind, FitKind::Logarithmic | FitKind::Power) {
        let count = observed.iter().filter(|&&(x, _)| x <= 0.0).count();
        if count > 0 {
            warnings.push(FitWarning::NonPositiveX { count });
        }
    }
    if matches!(kind, FitKind::Exponential | FitKind::Power) {
        let count = observed.iter().filter(|&&(_, y)| y <= 0.0).count();
        if count > 0 {
            warnings.push(FitWarning::NonPositiveY { count });
        }
    }

    if coefficients.iter().any(|c| !c.is_finite()) {
        warnings.push(FitWarning::NonFiniteCoefficients);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate;
    use nalgebra::{DMatrix, DVector};

    fn opts(order: usize, precision: i32) -> FitOptions {
        FitOptions { order, precision }
    }

    fn curve(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<Point> {
        xs.iter().map(|&x| Point::new(x, f(x))).collect()
    }

    /// Independent least-squares reference: SVD solve of the Vandermonde system.
    fn reference_polyfit(points: &[(f64, f64)], degree: usize) -> Vec<f64> {
        let design = DMatrix::from_fn(points.len(), degree + 1, |r, c| points[r].0.powi(c as i32));
        let y = DVector::from_iterator(points.len(), points.iter().map(|p| p.1));
        let svd = design.svd(true, true);
        svd.solve(&y, 1e-12).unwrap().iter().copied().collect()
    }

    #[test]
    fn linear_matches_least_squares_reference() {
        let data = [
            (0.5, 1.9),
            (1.0, 3.2),
            (2.0, 4.8),
            (3.5, 8.1),
            (4.0, 8.7),
            (6.0, 13.4),
            (7.5, 15.9),
        ];
        let points: Vec<Point> = data.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let fit = linear(&points, &opts(2, 9));

        // Reference is [intercept, slope]; linear stores [gradient, intercept].
        let reference = reference_polyfit(&data, 1);
        assert!((fit.coefficients[0] - reference[1]).abs() < 1e-8, "{fit:?}");
        assert!((fit.coefficients[1] - reference[0]).abs() < 1e-6, "{fit:?}");
    }

    #[test]
    fn linear_perfect_fit() {
        let points = curve(&[1.0, 2.0, 3.0, 4.0, 5.0], |x| 2.0 * x + 1.0);
        let fit = linear(&points, &FitOptions::default());
        assert_eq!(fit.coefficients, vec![2.0, 1.0]);
        assert_eq!(fit.r2, 1.0);
        assert_eq!(fit.equation, "y = 2x + 1");
        assert!(fit.warnings.is_empty());
    }

    #[test]
    fn linear_zero_intercept_is_omitted() {
        let points = curve(&[0.0, 1.0, 2.0, 3.0], |x| 2.0 * x);
        let fit = linear(&points, &FitOptions::default());
        assert_eq!(fit.coefficients, vec![2.0, 0.0]);
        assert_eq!(fit.equation, "y = 2x");
    }

    #[test]
    fn linear_vertical_data_forces_zero_gradient() {
        let points = vec![Point::new(3.0, 1.0), Point::new(3.0, 2.0), Point::new(3.0, 6.0)];
        let fit = linear(&points, &FitOptions::default());
        assert_eq!(fit.coefficients, vec![0.0, 3.0]);
        assert_eq!(fit.equation, "y = 0x + 3");
    }

    #[test]
    fn missing_y_is_excluded_but_still_predicted() {
        let points = vec![
            Point::new(0.0, 1.0),
            Point::missing(1.0),
            Point::new(2.0, 5.0),
            Point::new(3.0, 7.0),
        ];
        let fit = linear(&points, &FitOptions::default());

        assert_eq!(fit.coefficients, vec![2.0, 1.0]);
        assert_eq!(fit.r2, 1.0);
        assert_eq!(fit.points, points);
        assert_eq!(fit.predicted.len(), points.len());
        assert_eq!(fit.predicted[1].x, 1.0);
        assert_eq!(fit.predicted[1].y, 3.0);
    }

    /// `curve` with an unobserved point inserted at `index`.
    fn with_missing(mut points: Vec<Point>, index: usize, x: f64) -> Vec<Point> {
        points.insert(index, Point::missing(x));
        points
    }

    #[test]
    fn exponential_skips_missing_y() {
        let points = with_missing(curve(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], |x| 2.0 * (0.5 * x).exp()), 3, 2.5);
        let fit = exponential(&points, &FitOptions::default());

        assert_eq!(fit.coefficients, vec![2.0, 0.5]);
        assert_eq!(fit.r2, 1.0);
        assert_eq!(fit.predicted.len(), 7);
        assert_eq!(fit.predicted[3].x, 2.5);
        assert_eq!(fit.predicted[3].y, round(2.0 * 1.25f64.exp(), 3));
    }

    #[test]
    fn logarithmic_counts_only_observed_points() {
        let points = with_missing(curve(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], |x| 1.0 + 2.0 * x.ln()), 2, 2.5);
        let fit = logarithmic(&points, &FitOptions::default());

        assert_eq!(fit.coefficients, vec![1.0, 2.0]);
        assert_eq!(fit.r2, 1.0);
        assert!(fit.warnings.is_empty());
        assert_eq!(fit.predicted[2].x, 2.5);
        assert_eq!(fit.predicted[2].y, round(1.0 + 2.0 * 2.5f64.ln(), 3));
    }

    #[test]
    fn power_counts_only_observed_points() {
        let points = with_missing(curve(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], |x| 3.0 * x.powf(1.5)), 2, 2.5);
        let fit = power(&points, &FitOptions::default());

        assert_eq!(fit.coefficients, vec![3.0, 1.5]);
        assert_eq!(fit.r2, 1.0);
        assert!(fit.warnings.is_empty());
        assert_eq!(fit.predicted[2].x, 2.5);
        assert_eq!(fit.predicted[2].y, round(3.0 * 2.5f64.powf(1.5), 3));
    }

    #[test]
    fn polynomial_skips_missing_y() {
        let xs: Vec<f64> = (-3..=3).map(f64::from).collect();
        let points = with_missing(curve(&xs, |x| 1.0 - 2.0 * x + 0.5 * x * x), 4, 0.5);
        let fit = polynomial(&points, &opts(2, 3));

        assert_eq!(fit.coefficients, vec![1.0, -2.0, 0.5]);
        assert_eq!(fit.r2, 1.0);
        assert_eq!(fit.predicted.len(), 8);
        assert_eq!(fit.predicted[4].x, 0.5);
        assert_eq!(fit.predicted[4].y, 0.125);
    }

    #[test]
    fn exponential_perfect_fit_and_equation() {
        let points = curve(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], |x| 2.0 * (0.5 * x).exp());
        let fit = exponential(&points, &FitOptions::default());
        assert_eq!(fit.coefficients, vec![2.0, 0.5]);
        assert_eq!(fit.equation, "y = 2e^(0.5x)");
        assert_eq!(fit.r2, 1.0);
    }

    #[test]
    fn logarithmic_perfect_fit() {
        let points = curve(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], |x| 1.0 + 2.0 * x.ln());
        let fit = logarithmic(&points, &FitOptions::default());
        assert_eq!(fit.coefficients, vec![1.0, 2.0]);
        assert_eq!(fit.equation, "y = 1 + 2 ln(x)");
        assert_eq!(fit.r2, 1.0);
    }

    #[test]
    fn power_perfect_fit() {
        let points = curve(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], |x| 3.0 * x.powf(1.5));
        let fit = power(&points, &FitOptions::default());
        assert_eq!(fit.coefficients, vec![3.0, 1.5]);
        assert_eq!(fit.equation, "y = 3x^1.5");
        assert_eq!(fit.r2, 1.0);
    }

    #[test]
    fn polynomial_perfect_fit() {
        let xs: Vec<f64> = (-3..=3).map(f64::from).collect();
        let points = curve(&xs, |x| 1.0 - 2.0 * x + 0.5 * x * x);
        let fit = polynomial(&points, &opts(2, 3));
        assert_eq!(fit.coefficients, vec![1.0, -2.0, 0.5]);
        assert_eq!(fit.equation, "y = 0.5x^2 + -2x + 1");
        assert_eq!(fit.r2, 1.0);
    }

    #[test]
    fn polynomial_order_one_matches_linear() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let poly = polynomial(&points, &opts(1, 3));
        let line = linear(&points, &opts(1, 3));

        // Polynomial stores [intercept, slope]; linear stores [slope, intercept].
        assert_eq!(poly.coefficients, vec![0.0, 1.0]);
        assert_eq!(line.coefficients, vec![1.0, 0.0]);
        assert_eq!(poly.r2, 1.0);
        assert_eq!(poly.equation, "y = 1x + 0");
        assert_eq!(poly.predicted, line.predicted);
    }

    #[test]
    fn polynomial_matches_least_squares_reference() {
        let data: Vec<(f64, f64)> = (0..17)
            .map(|i| {
                let x = -2.0 + 0.25 * i as f64;
                (x, 3.0 * x.sin() + 0.2 * x * x)
            })
            .collect();
        let points: Vec<Point> = data.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let fit = polynomial(&points, &opts(3, 9));

        let reference = reference_polyfit(&data, 3);
        assert_eq!(fit.coefficients.len(), 4);
        for (got, want) in fit.coefficients.iter().zip(&reference) {
            assert!((got - want).abs() < 1e-6, "got {:?}, want {reference:?}", fit.coefficients);
        }
        assert!(fit.r2 > 0.99 && fit.r2 <= 1.0);
    }

    #[test]
    fn polynomial_with_too_few_points_warns() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0), Point::missing(2.0)];
        let fit = polynomial(&points, &opts(3, 3));
        assert_eq!(fit.coefficients.len(), 4);
        assert_eq!(fit.predicted.len(), 3);
        assert!(fit.warnings.contains(&FitWarning::Underdetermined {
            required: 4,
            observed: 2
        }));
    }

    #[test]
    fn single_observation_is_underdetermined() {
        let points = vec![Point::new(1.0, 2.0), Point::missing(2.0)];
        let fit = linear(&points, &FitOptions::default());
        assert!(fit.r2.is_nan());
        assert!(fit.is_underdetermined());
        assert_eq!(
            fit.warnings[0],
            FitWarning::Underdetermined {
                required: 2,
                observed: 1
            }
        );
    }

    #[test]
    fn empty_input_never_panics() {
        for kind in FitKind::ALL {
            let fit = fit(kind, &[], &FitOptions::default());
            assert_eq!(fit.kind, kind);
            assert!(fit.predicted.is_empty());
            assert!(fit.r2.is_nan());
            assert!(fit.is_underdetermined());
        }
    }

    #[test]
    fn non_positive_x_propagates_nan_with_warning() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0), Point::new(2.0, 3.0)];
        let fit = logarithmic(&points, &FitOptions::default());
        assert!(fit.coefficients[1].is_nan());
        assert!(fit.warnings.contains(&FitWarning::NonPositiveX { count: 1 }));
        assert!(fit.warnings.contains(&FitWarning::NonFiniteCoefficients));
    }

    #[test]
    fn non_positive_y_is_reported_for_power() {
        let points = vec![Point::new(1.0, -1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)];
        let fit = power(&points, &FitOptions::default());
        assert!(fit.warnings.contains(&FitWarning::NonPositiveY { count: 1 }));
        assert!(!fit.warnings.contains(&FitWarning::NonPositiveX { count: 1 }));
    }

    #[test]
    fn precision_applies_to_outputs() {
        let points = curve(&[1.0, 2.0, 3.0], |x| x / 3.0);
        let fit = linear(&points, &opts(2, 1));
        // gradient 1/3 -> 0.3; intercept 2/3 - 0.3·2 ≈ 0.067 -> 0.1
        assert_eq!(fit.coefficients, vec![0.3, 0.1]);
        assert_eq!(fit.predicted[2].y, 1.0);
        assert_eq!(fit.predicted[2].x, 3.0);
        // Inputs are passed through unrounded.
        assert_eq!(fit.points[0].y, Some(1.0 / 3.0));
    }

    #[test]
    fn result_predict_uses_fitted_model() {
        let points = curve(&[1.0, 2.0, 3.0], |x| 2.0 * x + 1.0);
        let fit = linear(&points, &FitOptions::default());
        let p = fit.predict(10.12345);
        assert_eq!(p.x, 10.123);
        assert_eq!(p.y, round(evaluate(FitKind::Linear, &fit.coefficients, 10.12345), 3));
    }
}

//! Model evaluation and equation formatting for each fit kind.
//!
//! The estimators and every consumer of a stored coefficient vector rely on two
//! primitive operations:
//! - evaluate `y(x)` given the coefficients (for predictions/plots)
//! - render the coefficients as an equation string
//!
//! Both read coefficients in the layout stored on `FitResult`.

use crate::domain::{FitKind, FittedPoint};
use crate::math::round;

/// Evaluate `y(x)` for the given kind. No rounding is applied.
///
/// A two-parameter kind given fewer than two coefficients evaluates to NaN.
pub fn evaluate(kind: FitKind, coefficients: &[f64], x: f64) -> f64 {
    let (a, b) = (coef(coefficients, 0), coef(coefficients, 1));
    match kind {
        FitKind::Linear => a * x + b,
        FitKind::Exponential => a * (b * x).exp(),
        FitKind::Logarithmic => a + b * x.ln(),
        FitKind::Power => a * x.powf(b),
        FitKind::Polynomial => coefficients
            .iter()
            .enumerate()
            .fold(0.0, |sum, (power, &c)| sum + c * x.powi(power as i32)),
    }
}

/// Rounded `(x, y(x))`, the prediction the estimators map over their input.
pub fn predict_point(kind: FitKind, coefficients: &[f64], x: f64, precision: i32) -> FittedPoint {
    FittedPoint {
        x: round(x, precision),
        y: round(evaluate(kind, coefficients, x), precision),
    }
}

/// Human-readable equation for the given kind.
///
/// The polynomial equation lists terms from the highest power down, while the
/// coefficient slice is lowest power first.
pub fn format_equation(kind: FitKind, coefficients: &[f64]) -> String {
    let (a, b) = (coef(coefficients, 0), coef(coefficients, 1));
    match kind {
        FitKind::Linear => {
            let (m, c) = (a, b);
            if c == 0.0 {
                format!("y = {}x", fmt_number(m))
            } else {
                format!("y = {}x + {}", fmt_number(m), fmt_number(c))
            }
        }
        FitKind::Exponential => format!("y = {}e^({}x)", fmt_number(a), fmt_number(b)),
        FitKind::Logarithmic => format!("y = {} + {} ln(x)", fmt_number(a), fmt_number(b)),
        FitKind::Power => format!("y = {}x^{}", fmt_number(a), fmt_number(b)),
        FitKind::Polynomial => {
            let mut out = String::from("y = ");
            for (power, &c) in coefficients.iter().enumerate().rev() {
                match power {
                    0 => out.push_str(&fmt_number(c)),
                    1 => out.push_str(&format!("{}x + ", fmt_number(c))),
                    _ => out.push_str(&format!("{}x^{power} + ", fmt_number(c))),
                }
            }
            out
        }
    }
}

fn coef(coefficients: &[f64], index: usize) -> f64 {
    coefficients.get(index).copied().unwrap_or(f64::NAN)
}

/// Shortest round-trip decimal form; negative zero prints as `0`.
pub fn fmt_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_each_kind() {
        assert_eq!(evaluate(FitKind::Linear, &[2.0, 1.0], 3.0), 7.0);
        assert!((evaluate(FitKind::Exponential, &[2.0, 0.5], 2.0) - 2.0 * 1f64.exp()).abs() < 1e-12);
        assert!((evaluate(FitKind::Logarithmic, &[1.0, 2.0], 1f64.exp()) - 3.0).abs() < 1e-12);
        assert!((evaluate(FitKind::Power, &[3.0, 2.0], 4.0) - 48.0).abs() < 1e-12);
        // 1 + 2x + 3x^2 at x = 2
        assert_eq!(evaluate(FitKind::Polynomial, &[1.0, 2.0, 3.0], 2.0), 17.0);
    }

    #[test]
    fn predict_point_rounds_both_coordinates() {
        let p = predict_point(FitKind::Linear, &[1.0, 0.0], 1.23456, 2);
        assert_eq!(p, FittedPoint { x: 1.23, y: 1.23 });
    }

    #[test]
    fn linear_equation_omits_zero_intercept() {
        assert_eq!(format_equation(FitKind::Linear, &[2.0, 0.0]), "y = 2x");
        assert_eq!(format_equation(FitKind::Linear, &[2.0, -0.0]), "y = 2x");
        assert_eq!(format_equation(FitKind::Linear, &[2.0, 1.5]), "y = 2x + 1.5");
    }

    #[test]
    fn two_parameter_equations() {
        assert_eq!(format_equation(FitKind::Exponential, &[2.0, 0.5]), "y = 2e^(0.5x)");
        assert_eq!(format_equation(FitKind::Logarithmic, &[1.25, -3.0]), "y = 1.25 + -3 ln(x)");
        assert_eq!(format_equation(FitKind::Power, &[4.0, 0.333]), "y = 4x^0.333");
    }

    #[test]
    fn polynomial_equation_runs_high_to_low() {
        assert_eq!(
            format_equation(FitKind::Polynomial, &[1.0, 2.0, 3.0]),
            "y = 3x^2 + 2x + 1"
        );
        assert_eq!(format_equation(FitKind::Polynomial, &[0.0, 1.0]), "y = 1x + 0");
        assert_eq!(format_equation(FitKind::Polynomial, &[4.5]), "y = 4.5");
    }

    #[test]
    fn short_coefficient_slices_give_nan() {
        assert!(evaluate(FitKind::Linear, &[2.0], 1.0).is_nan());
        assert!(evaluate(FitKind::Power, &[], 1.0).is_nan());
        assert_eq!(format_equation(FitKind::Exponential, &[2.0]), "y = 2e^(NaNx)");
        assert_eq!(format_equation(FitKind::Polynomial, &[]), "y = ");

        let fit = crate::fit::linear(
            &[crate::domain::Point::new(0.0, 1.0), crate::domain::Point::new(1.0, 3.0)],
            &crate::domain::FitOptions::default(),
        );
        let truncated = crate::domain::FitResult {
            coefficients: vec![2.0],
            ..fit
        };
        assert!(truncated.predict(1.0).y.is_nan());
    }

    #[test]
    fn non_finite_numbers_print_plainly() {
        assert_eq!(fmt_number(f64::NAN), "NaN");
        assert_eq!(fmt_number(-0.0), "0");
    }
}

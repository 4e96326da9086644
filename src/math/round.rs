//! Decimal rounding applied to every numeric output of the estimators.

/// Round `value` to `precision` decimal places.
///
/// `precision` may be zero or negative (`-2` rounds to hundreds). Halves round
/// away from zero (`f64::round`). The scaling is plain floating-point
/// arithmetic, so values whose scaled product is not exactly representable
/// round as that product does: `round(1.005, 2)` is `1.0` because
/// `1.005 * 100.0 == 100.49999999999999`.
///
/// NaN and infinities pass through unchanged.
pub fn round(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

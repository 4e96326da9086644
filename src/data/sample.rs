//! Synthetic dataset generation from a known curve.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{FitKind, Point, SampleConfig};
use crate::error::AppError;
use crate::models::evaluate;

/// Draw `config.count` points from the configured curve.
///
/// x values are uniform over `[x_min, x_max]` and returned sorted. Each y is
/// the exact curve value plus `N(0, noise)`, and is dropped with probability
/// `missing_prob`. The same config always yields the same points.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Point>, AppError> {
    validate(config)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let mut xs: Vec<f64> = (0..config.count)
        .map(|_| rng.gen_range(config.x_min..=config.x_max))
        .collect();
    xs.sort_by(f64::total_cmp);

    let mut points = Vec::with_capacity(config.count);
    for x in xs {
        let exact = evaluate(config.kind, &config.coefficients, x);
        if !exact.is_finite() {
            return Err(AppError::new(
                4,
                format!("The {} curve is not finite at x={x}.", config.kind.display_name()),
            ));
        }

        let noise = if config.noise > 0.0 { normal.sample(&mut rng) } else { 0.0 };
        if config.missing_prob > 0.0 && rng.gen_bool(config.missing_prob) {
            points.push(Point::missing(x));
        } else {
            points.push(Point::new(x, exact + noise));
        }
    }

    Ok(points)
}

fn validate(config: &SampleConfig) -> Result<(), AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise standard deviation must be finite and >= 0."));
    }
    if !(0.0..1.0).contains(&config.missing_prob) {
        return Err(AppError::new(2, "Missing probability must be in [0, 1)."));
    }
    if config.coefficients.iter().any(|c| !c.is_finite()) {
        return Err(AppError::new(2, "Coefficients must be finite."));
    }

    let expected_ok = match config.kind {
        FitKind::Polynomial => !config.coefficients.is_empty(),
        _ => config.coefficients.len() == 2,
    };
    if !expected_ok {
        let expected = match config.kind {
            FitKind::Polynomial => "at least 1".to_string(),
            _ => "exactly 2".to_string(),
        };
        return Err(AppError::new(
            2,
            format!(
                "The {} curve takes {expected} coefficients (got {}).",
                config.kind.display_name(),
                config.coefficients.len()
            ),
        ));
    }

    Ok(())
}

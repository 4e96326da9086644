//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::FitResult;
use crate::fit::selection::FitComparison;
use crate::io::ingest::IngestedData;
use crate::models::fmt_number;
use crate::report::Residual;

/// Format the run summary (dataset stats + chosen model + warnings).
pub fn format_fit_summary(ingest: &IngestedData, result: &FitResult) -> String {
    let mut out = String::new();
    let stats = &ingest.stats;

    out.push_str("=== cfit - curve fit ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} rejected={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Points: n={} (observed={}) | x=[{}, {}]",
        stats.n_points,
        stats.n_observed,
        fmt_number(stats.x_min),
        fmt_number(stats.x_max),
    ));
    if let Some((y_min, y_max)) = stats.y_range {
        out.push_str(&format!(" | y=[{}, {}]", fmt_number(y_min), fmt_number(y_max)));
    }
    out.push('\n');

    out.push_str(&format_fit_block(result));
    out
}

/// Format one fit: kind, equation, coefficients, r², warnings.
pub fn format_fit_block(result: &FitResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("\nModel: {}", result.kind));
    if result.kind == crate::domain::FitKind::Polynomial {
        out.push_str(&format!(" (order={})", result.options.order));
    }
    out.push_str(&format!(" | precision={}\n", result.options.precision));
    out.push_str(&format!("- equation    : {}\n", result.equation));
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&result.coefficients)));
    out.push_str(&format!("- r²          : {}\n", fmt_number(result.r2)));

    for w in &result.warnings {
        out.push_str(&format!("  (warning) {w}\n"));
    }

    out
}

/// Format the per-point table.
pub fn format_points_table(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>6} {:>12} {:>12} {:>12} {:>12}\n",
            "index", "x", "y_obs", "y_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:->6} {:->12} {:->12} {:->12} {:->12}\n",
            "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:>6} {:>12} {:>12} {:>12} {:>12}\n",
                r.index,
                fmt_number(r.x),
                fmt_opt(r.y_obs),
                fmt_number(r.y_fit),
                fmt_opt(r.residual.map(|v| crate::math::round(v, 6))),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the model comparison table.
pub fn format_comparison(cmp: &FitComparison) -> String {
    let mut out = String::new();

    out.push_str("Model comparison (ranked by r²):\n");
    for fit in &cmp.fits {
        let chosen = if fit.kind == cmp.best.kind { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<12} r²={:<10} {}\n",
            fit.kind.display_name(),
            fmt_number(fit.r2),
            fit.equation
        ));
    }
    for (kind, reason) in &cmp.skipped {
        out.push_str(&format!("  (skipped {kind}) {reason}\n"));
    }

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|&x| fmt_number(x)).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(fmt_number).unwrap_or_else(|| "-".to_string())
}

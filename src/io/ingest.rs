//! CSV ingest and normalization.
//!
//! This module is responsible for turning a two-column (or wider) CSV into a
//! clean list of `Point`s that are safe to hand to the estimators.
//!
//! Design goals:
//! - **Strict schema** for the x/y headers (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Missing y is data, not an error**: blank, `NA`, `null`, and `NaN` cells
//!   become `Point { y: None }` so the row keeps its place in the output
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use csv::StringRecord;

use crate::domain::{CsvSource, Point};
use crate::error::AppError;

/// Summary stats about the points actually loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    /// Points with an observed `y`.
    pub n_observed: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Range of the observed `y` values (`None` when nothing is observed).
    pub y_range: Option<(f64, f64)>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: points + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub points: Vec<Point>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load the CSV described by `source`.
pub fn load_points(source: &CsvSource) -> Result<IngestedData, AppError> {
    let file = File::open(&source.path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open CSV '{}': {e}", source.path.display()),
        )
    })?;
    read_points(file, &source.x_col, &source.y_col)
}

/// Parse points from any CSV reader (header row required).
pub fn read_points<R: Read>(input: R, x_col: &str, y_col: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_idx = column_index(&header_map, x_col)?;
    let y_idx = column_index(&header_map, y_col)?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, x_idx, y_idx) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = points.len();
    let stats = compute_stats(&points)
        .ok_or_else(|| AppError::new(3, "No valid rows remain after parsing."))?;

    Ok(IngestedData {
        points,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM;
    // left in place it makes the column look missing.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn column_index(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
}

fn parse_row(record: &StringRecord, x_idx: usize, y_idx: usize) -> Result<Point, String> {
    let x_raw = record
        .get(x_idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing required value: x".to_string())?;
    let x = parse_finite(x_raw).ok_or_else(|| format!("Invalid x value '{x_raw}'."))?;

    let y = match record.get(y_idx) {
        None => None,
        Some(s) if is_missing_marker(s) => None,
        Some(s) => Some(parse_finite(s).ok_or_else(|| format!("Invalid y value '{s}'."))?),
    };

    Ok(Point { x, y })
}

fn is_missing_marker(s: &str) -> bool {
    s.is_empty()
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("nan")
}

fn parse_finite(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

pub fn compute_stats(points: &[Point]) -> Option<DatasetStats> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut n_observed = 0usize;

    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        if let Some(y) = p.y {
            n_observed += 1;
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !x_min.is_finite() || !x_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_points: points.len(),
        n_observed,
        x_min,
        x_max,
        y_range: (n_observed > 0).then_some((y_min, y_max)),
    })
}

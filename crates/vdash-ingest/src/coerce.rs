//! Best-effort numeric coercion for uploaded text columns.
//!
//! Uploaded CSVs are read with every column as text. Columns whose names
//! carry a numeric-indicator keyword are reparsed as Float64 here; a cell
//! that fails to parse becomes a missing value. Coercion is per-cell and
//! never aborts the column or the load.

use polars::prelude::*;
use vdash_model::RoleMap;

use crate::error::Result;

/// Parse a string value to numeric (f64).
///
/// Handles common survey-entry formats:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,234,567"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
///
/// Returns None for anything else, including "nan"-style tokens and
/// non-finite results: those are missing values on this dashboard, never
/// float NaN that would poison a mean.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Remove thousands separators and whitespace
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', ""); // Non-breaking space

    if cleaned.eq_ignore_ascii_case("nan") {
        return None;
    }

    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Check if a string represents a valid numeric value.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Reinterpret one text column as Float64, cell by cell.
fn coerce_column(column: &Column) -> Result<Series> {
    let strings = column.as_materialized_series().str()?;
    let values: Float64Chunked = strings
        .into_iter()
        .map(|cell| cell.and_then(parse_numeric))
        .collect();
    Ok(values.with_name(column.name().clone()).into_series())
}

/// Coerce every column whose name matches a numeric-indicator keyword.
///
/// Non-matching columns and columns that are not text-typed are left
/// untouched.
pub fn coerce_numeric_columns(df: &mut DataFrame, roles: &RoleMap) -> Result<()> {
    let candidates: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .filter(|name| roles.is_numeric_indicator(name))
        .collect();

    for name in candidates {
        let column = df.column(name.as_str())?;
        if column.dtype() != &DataType::String {
            continue;
        }
        let coerced = coerce_column(column)?;
        let parsed = coerced.len() - coerced.null_count();
        tracing::debug!(column = %name, parsed, rows = coerced.len(), "coerced column to numeric");
        df.with_column(coerced)?;
    }

    Ok(())
}

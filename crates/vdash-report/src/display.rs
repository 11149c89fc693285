//! Display-safety transform.
//!
//! Rendering layers choke on mixed-type columns, so the preview copy is
//! all text: every cell stringified, missing values and literal
//! null-marker tokens rendered as the empty string. The copy is for
//! display only and is never fed back into KPI computation.

use polars::prelude::*;
use vdash_ingest::NULL_MARKERS;

use crate::error::Result;

/// Produce a text-only rendering copy of the table.
///
/// Idempotent: applying it twice yields the same result as once.
pub fn display_safe(df: &DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let strings = column.as_materialized_series().cast(&DataType::String)?;
        let strings = strings.str()?;
        let scrubbed: StringChunked = strings
            .into_iter()
            .map(|cell| match cell {
                Some(value) if NULL_MARKERS.contains(&value) => Some(""),
                Some(value) => Some(value),
                None => Some(""),
            })
            .collect();
        columns.push(
            scrubbed
                .with_name(column.name().clone())
                .into_series()
                .into_column(),
        );
    }
    Ok(DataFrame::new(columns)?)
}

/// Display-safe excerpt of the first `rows` rows.
pub fn preview(df: &DataFrame, rows: usize) -> Result<DataFrame> {
    display_safe(&df.head(Some(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_frame() -> DataFrame {
        df!(
            "Age (Years)" => [Some(25.0f64), None, Some(40.0)],
            "Company" => [Some("Acme"), Some("nan"), None],
        )
        .expect("build frame")
    }

    #[test]
    fn all_columns_become_text() {
        let safe = display_safe(&mixed_frame()).expect("display safe");
        for column in safe.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
            assert_eq!(column.null_count(), 0);
        }
    }

    #[test]
    fn null_markers_and_missing_render_empty() {
        let safe = display_safe(&mixed_frame()).expect("display safe");
        let company = safe.column("Company").expect("company");
        let cells: Vec<&str> = company
            .as_materialized_series()
            .str()
            .expect("strings")
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(cells, vec!["Acme", "", ""]);
    }

    #[test]
    fn transform_is_idempotent() {
        let once = display_safe(&mixed_frame()).expect("first pass");
        let twice = display_safe(&once).expect("second pass");
        assert!(once.equals(&twice));
    }

    #[test]
    fn preview_limits_rows() {
        let df = df!("Company" => ["A", "B", "C", "D", "E"]).expect("frame");
        let excerpt = preview(&df, 3).expect("preview");
        assert_eq!(excerpt.height(), 3);
        assert_eq!(excerpt.width(), 1);
    }

    #[test]
    fn preview_of_short_table_keeps_all_rows() {
        let df = df!("Company" => ["A", "B"]).expect("frame");
        let excerpt = preview(&df, 3).expect("preview");
        assert_eq!(excerpt.height(), 2);
    }
}

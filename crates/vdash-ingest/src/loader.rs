//! Loading the survey table from the bundled sample or an uploaded file.

use std::path::Path;

use polars::prelude::*;
use vdash_model::RoleMap;

use crate::coerce::coerce_numeric_columns;
use crate::error::{IngestError, Result};

/// Literal tokens that mean "missing" when they appear as cell text.
pub const NULL_MARKERS: [&str; 2] = ["nan", "<NA>"];

/// Load the bundled sample file.
///
/// Column types are inferred normally since the sample is pre-cleaned.
/// A missing or unreadable file reports `SourceUnavailable` so the caller
/// can fall back to requesting an upload.
pub fn load_default(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::SourceUnavailable {
            path: path.to_path_buf(),
        });
    }

    let mut df = read_csv(path, Some(100)).map_err(|error| {
        tracing::warn!(path = %path.display(), %error, "failed to read sample file");
        IngestError::SourceUnavailable {
            path: path.to_path_buf(),
        }
    })?;

    trim_column_names(&mut df)?;
    validate_shape(&df, path)?;
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded sample survey data"
    );
    Ok(df)
}

/// Load a user-supplied file.
///
/// Only CSV is accepted; anything else is rejected from the file
/// extension before any content is read. Every column is read as text,
/// null-marker tokens become true missing values, column names are
/// trimmed, and numeric-indicator columns are coerced to Float64 with
/// per-cell fallback to missing.
pub fn load_upload(path: &Path, roles: &RoleMap) -> Result<DataFrame> {
    require_csv_extension(path)?;

    let metadata = std::fs::metadata(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => IngestError::SourceUnavailable {
            path: path.to_path_buf(),
        },
        _ => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyData {
            path: path.to_path_buf(),
        });
    }

    // Schema inference off: every column arrives as text, matching the
    // "read as string first, coerce later" contract.
    let mut df = read_csv(path, Some(0))?;

    replace_null_markers(&mut df)?;
    trim_column_names(&mut df)?;
    coerce_numeric_columns(&mut df, roles)?;
    validate_shape(&df, path)?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded uploaded survey data"
    );
    Ok(df)
}

/// Reject anything that is not a `.csv` upload, without reading content.
fn require_csv_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_string();
    if extension.eq_ignore_ascii_case("csv") {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// Validate table shape after loading: zero rows or zero columns is
/// terminal "no valid data".
pub fn validate_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 || df.width() == 0 {
        return Err(IngestError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn read_csv(path: &Path, infer_schema_length: Option<usize>) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Trim leading/trailing whitespace from every column name.
fn trim_column_names(df: &mut DataFrame) -> Result<()> {
    let trimmed: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();
    df.set_column_names(trimmed)?;
    Ok(())
}

/// Replace literal null-marker cells in text columns with missing values.
fn replace_null_markers(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    for name in names {
        let replacement = {
            let column = df.column(name.as_str())?;
            if column.dtype() != &DataType::String {
                continue;
            }
            let strings = column.as_materialized_series().str()?;
            if !strings
                .into_iter()
                .any(|cell| cell.is_some_and(|v| NULL_MARKERS.contains(&v)))
            {
                continue;
            }
            let scrubbed: StringChunked = strings
                .into_iter()
                .map(|cell| cell.filter(|v| !NULL_MARKERS.contains(v)))
                .collect();
            scrubbed.with_name(column.name().clone()).into_series()
        };
        df.with_column(replacement)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        write!(file, "{}", content).expect("write csv");
        file
    }

    #[test]
    fn upload_reads_text_and_coerces_indicators() {
        let file = create_temp_csv("Age (Years),Company\n25,Acme\n30,Beta\nabc,Acme\n40,Acme\n");
        let df = load_upload(file.path(), &RoleMap::default()).expect("load upload");

        let ages = df.column("Age (Years)").expect("ages");
        assert_eq!(ages.dtype(), &DataType::Float64);
        assert_eq!(ages.null_count(), 1);
        let mean = ages.as_materialized_series().mean().expect("mean");
        assert!((mean - 31.666666666666668).abs() < 1e-9);

        // Company has no numeric indicator in its name and stays text.
        assert_eq!(
            df.column("Company").expect("company").dtype(),
            &DataType::String
        );
    }

    #[test]
    fn upload_trims_column_names() {
        let file = create_temp_csv("  Company  ,City\nAcme,Cairo\n");
        let df = load_upload(file.path(), &RoleMap::default()).expect("load upload");
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Company", "City"]);
    }

    #[test]
    fn upload_replaces_null_markers() {
        let file = create_temp_csv("Company\nAcme\nnan\n<NA>\nBeta\n");
        let df = load_upload(file.path(), &RoleMap::default()).expect("load upload");
        let company = df.column("Company").expect("company");
        assert_eq!(company.null_count(), 2);
    }

    #[test]
    fn upload_header_only_is_empty_data() {
        let file = create_temp_csv("A,B,C\n");
        let result = load_upload(file.path(), &RoleMap::default());
        assert!(matches!(result, Err(IngestError::EmptyData { .. })));
    }

    #[test]
    fn upload_zero_byte_file_is_empty_data() {
        let file = create_temp_csv("");
        let result = load_upload(file.path(), &RoleMap::default());
        assert!(matches!(result, Err(IngestError::EmptyData { .. })));
    }

    #[test]
    fn upload_rejects_non_csv_without_reading() {
        let dir = TempDir::new().expect("temp dir");
        // The file never exists; rejection happens on the extension alone.
        let path = dir.path().join("survey.xlsx");
        let result = load_upload(&path, &RoleMap::default());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedFormat { extension, .. }) if extension == "xlsx"
        ));
    }

    #[test]
    fn upload_rejects_extensionless_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("survey");
        let result = load_upload(&path, &RoleMap::default());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn default_missing_file_is_source_unavailable() {
        let dir = TempDir::new().expect("temp dir");
        let result = load_default(&dir.path().join("sample.csv"));
        assert!(matches!(result, Err(IngestError::SourceUnavailable { .. })));
    }

    #[test]
    fn default_reads_with_inference() {
        let file = create_temp_csv("Age (Years),Company\n25,Acme\n30,Beta\n");
        let df = load_default(file.path()).expect("load default");
        assert_eq!(df.height(), 2);
        // Inferred numerically without any coercion pass.
        assert!(df
            .column("Age (Years)")
            .expect("ages")
            .dtype()
            .is_primitive_numeric());
    }
}

//! Survey data ingestion.
//!
//! Loads the survey table into a Polars DataFrame from either the bundled
//! sample file or a user-supplied CSV upload.
//!
//! # Upload pipeline
//!
//! 1. Reject anything that is not a `.csv` from the extension alone
//! 2. Read every column as text (no schema inference)
//! 3. Replace literal null-marker cells ("nan", "<NA>") with missing
//! 4. Trim whitespace from column names
//! 5. Coerce numeric-indicator columns to Float64, per-cell, non-fatal
//! 6. Reject tables with zero rows or zero columns
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use vdash_ingest::{load_default, load_upload};
//! use vdash_model::RoleMap;
//!
//! let roles = RoleMap::default();
//! let df = match load_default(Path::new("vans_survey_clean.csv")) {
//!     Ok(df) => df,
//!     Err(_) => load_upload(Path::new("my_survey.csv"), &roles)?,
//! };
//! ```

mod coerce;
mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use loader::{NULL_MARKERS, load_default, load_upload, validate_shape};

// === Numeric Coercion ===
pub use coerce::{coerce_numeric_columns, is_numeric, parse_numeric};

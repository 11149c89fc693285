//! KPI computation and display preparation for the survey dashboard.
//!
//! Consumes the DataFrame produced by `vdash-ingest` and yields:
//!
//! - a [`vdash_model::KpiSet`] of descriptive statistics,
//! - four headline [`MetricCard`]s selected by a fixed priority chain,
//! - a text-only, display-safe preview excerpt.

pub mod cards;
pub mod display;
pub mod error;
pub mod kpi;

pub use cards::{MetricCard, group_thousands, select_cards};
pub use display::{display_safe, preview};
pub use error::{ReportError, Result};
pub use kpi::compute_kpis;

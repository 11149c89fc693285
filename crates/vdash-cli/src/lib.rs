//! CLI library components for the survey dashboard.

pub mod logging;

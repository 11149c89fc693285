//! Core types for the survey KPI dashboard.
//!
//! This crate defines the vocabulary shared by ingestion, KPI computation,
//! and rendering: the fixed KPI enumeration with its computed values, the
//! declarative column-role mapping that replaces ad-hoc header matching,
//! and the session/password-gate types.

pub mod error;
pub mod kpi;
pub mod roles;
pub mod session;

pub use error::{ModelError, Result};
pub use kpi::{Kpi, KpiKey, KpiSet, KpiValue};
pub use roles::{ColumnRole, RoleMap, RoleSpec};
pub use session::{AccessPolicy, LoginOutcome, PASSWORD_ENV, Session};

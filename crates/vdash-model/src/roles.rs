//! Declarative column-role mapping.
//!
//! Which survey column feeds which KPI is configuration data, not string
//! literals scattered through the calculator. The default mapping matches
//! the bundled delivery-operations survey; deployments with different
//! questionnaires override it from a JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Semantic field a survey column can play in KPI computation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnRole {
    Age,
    DeliveriesPerDay,
    SuccessRate,
    FixedIncome,
    Company,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 5] = [
        ColumnRole::Age,
        ColumnRole::DeliveriesPerDay,
        ColumnRole::SuccessRate,
        ColumnRole::FixedIncome,
        ColumnRole::Company,
    ];

    /// Stable name matching the JSON configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::DeliveriesPerDay => "deliveries-per-day",
            Self::SuccessRate => "success-rate",
            Self::FixedIncome => "fixed-income",
            Self::Company => "company",
        }
    }
}

/// Expected column name for a role, plus accepted synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    /// Exact header text as it appears in the source file.
    pub column: String,
    /// Alternate headers, matched case-insensitively.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl RoleSpec {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            synonyms: Vec::new(),
        }
    }
}

/// Complete column-role configuration for one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    #[serde(default = "default_roles")]
    pub roles: BTreeMap<ColumnRole, RoleSpec>,
    /// Substrings that mark an uploaded text column for numeric coercion,
    /// matched case-insensitively against the column name.
    #[serde(default = "default_numeric_indicators")]
    pub numeric_indicators: Vec<String>,
}

fn default_roles() -> BTreeMap<ColumnRole, RoleSpec> {
    BTreeMap::from([
        (ColumnRole::Age, RoleSpec::new("Age (Years)")),
        (
            ColumnRole::DeliveriesPerDay,
            RoleSpec::new("Average number of deliveries per day: ______"),
        ),
        (
            ColumnRole::SuccessRate,
            RoleSpec::new("Approximate delivery success rate (orders deliv..."),
        ),
        (
            ColumnRole::FixedIncome,
            RoleSpec::new("Please mention your Fixed Monthly Pay (if any):..."),
        ),
        (ColumnRole::Company, RoleSpec::new("Company")),
    ])
}

fn default_numeric_indicators() -> Vec<String> {
    [
        "age",
        "year",
        "egp",
        "days",
        "hours",
        "deliveries",
        "income",
        "salary",
        "allowance",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for RoleMap {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            numeric_indicators: default_numeric_indicators(),
        }
    }
}

impl RoleMap {
    /// Load an override mapping from a JSON file.
    ///
    /// Missing fields fall back to the built-in defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::RoleMapRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ModelError::RoleMapParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a role against the table's column names.
    ///
    /// The primary name must match exactly; synonyms match
    /// case-insensitively. Returns the actual column name from `columns`.
    pub fn resolve<'a>(&self, role: ColumnRole, columns: &'a [String]) -> Option<&'a str> {
        let spec = self.roles.get(&role)?;
        if let Some(name) = columns.iter().find(|c| **c == spec.column) {
            return Some(name.as_str());
        }
        columns
            .iter()
            .find(|c| {
                spec.synonyms
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(c.as_str()))
            })
            .map(String::as_str)
    }

    /// True when a column name marks its content as numeric.
    pub fn is_numeric_indicator(&self, column: &str) -> bool {
        let lower = column.to_lowercase();
        self.numeric_indicators
            .iter()
            .any(|indicator| lower.contains(indicator.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_map_resolves_exact_names() {
        let map = RoleMap::default();
        let columns = vec![
            "Company".to_string(),
            "Age (Years)".to_string(),
            "City".to_string(),
        ];
        assert_eq!(map.resolve(ColumnRole::Age, &columns), Some("Age (Years)"));
        assert_eq!(map.resolve(ColumnRole::Company, &columns), Some("Company"));
        assert_eq!(map.resolve(ColumnRole::SuccessRate, &columns), None);
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let map = RoleMap::default();
        let columns = vec!["age (years)".to_string()];
        assert_eq!(map.resolve(ColumnRole::Age, &columns), None);
    }

    #[test]
    fn synonyms_match_case_insensitively() {
        let mut map = RoleMap::default();
        map.roles
            .get_mut(&ColumnRole::Company)
            .expect("company role")
            .synonyms
            .push("Employer".to_string());
        let columns = vec!["EMPLOYER".to_string()];
        assert_eq!(map.resolve(ColumnRole::Company, &columns), Some("EMPLOYER"));
    }

    #[test]
    fn numeric_indicators_match_substrings() {
        let map = RoleMap::default();
        assert!(map.is_numeric_indicator("Age (Years)"));
        assert!(map.is_numeric_indicator("Fixed Monthly Pay in EGP"));
        assert!(map.is_numeric_indicator("Working HOURS per week"));
        assert!(!map.is_numeric_indicator("Company"));
        assert!(!map.is_numeric_indicator("City of residence"));
    }

    #[test]
    fn json_round_trip() {
        let map = RoleMap::default();
        let json = serde_json::to_string(&map).expect("serialize role map");
        let round: RoleMap = serde_json::from_str(&json).expect("deserialize role map");
        assert_eq!(round, map);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let round: RoleMap =
            serde_json::from_str(r#"{"numeric_indicators": ["score"]}"#).expect("parse override");
        assert_eq!(round.numeric_indicators, vec!["score".to_string()]);
        assert_eq!(round.roles, RoleMap::default().roles);
    }

    #[test]
    fn from_json_file_reads_override() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"roles": {{"age": {{"column": "Driver Age"}}}}, "numeric_indicators": ["age"]}}"#
        )
        .expect("write override");
        let map = RoleMap::from_json_file(file.path()).expect("load override");
        let columns = vec!["Driver Age".to_string()];
        assert_eq!(map.resolve(ColumnRole::Age, &columns), Some("Driver Age"));
        assert_eq!(map.resolve(ColumnRole::Company, &columns), None);
    }

    #[test]
    fn from_json_file_missing_path_errors() {
        let result = RoleMap::from_json_file(Path::new("/does/not/exist.json"));
        assert!(matches!(result, Err(ModelError::RoleMapRead { .. })));
    }
}

//! KPI set produced by one load of the survey table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed set of KPIs the dashboard knows how to compute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum KpiKey {
    AverageAge,
    AverageDeliveries,
    SuccessRate,
    AverageIncome,
    UniqueCompanies,
    TopCompany,
    RespondentCount,
    AnswerDensity,
}

impl KpiKey {
    /// Human-readable label used by the rendering layer.
    pub fn label(self) -> &'static str {
        match self {
            Self::AverageAge => "Average Age",
            Self::AverageDeliveries => "Avg Deliveries",
            Self::SuccessRate => "Success Rate",
            Self::AverageIncome => "Fixed Monthly Pay",
            Self::UniqueCompanies => "Companies",
            Self::TopCompany => "Top Company",
            Self::RespondentCount => "Total Responses",
            Self::AnswerDensity => "Data Quality",
        }
    }
}

/// Computed scalar for a single KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum KpiValue {
    /// Arithmetic mean of the contributing values.
    Mean(f64),
    /// Distinct-count, row-count, or cell-count style metric.
    Count(u64),
    /// Modal value of a text column.
    Text(String),
}

/// A computed KPI plus the number of rows that contributed to it.
///
/// The respondent count is retained for sub-label display
/// ("56 respondents"), not for further computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub value: KpiValue,
    pub respondents: usize,
}

impl Kpi {
    pub fn mean(value: f64, respondents: usize) -> Self {
        Self {
            value: KpiValue::Mean(value),
            respondents,
        }
    }

    pub fn count(value: u64, respondents: usize) -> Self {
        Self {
            value: KpiValue::Count(value),
            respondents,
        }
    }

    pub fn text(value: impl Into<String>, respondents: usize) -> Self {
        Self {
            value: KpiValue::Text(value.into()),
            respondents,
        }
    }
}

/// Mapping from KPI key to computed value, rebuilt on every table load.
///
/// A key is present only when its source column exists in the table and
/// carries at least one non-missing value; whole-table KPIs
/// (`RespondentCount`, `AnswerDensity`) are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSet(BTreeMap<KpiKey, Kpi>);

impl KpiSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: KpiKey, kpi: Kpi) {
        self.0.insert(key, kpi);
    }

    pub fn get(&self, key: KpiKey) -> Option<&Kpi> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: KpiKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KpiKey, &Kpi)> {
        self.0.iter()
    }

    /// The mean value for a key, when present and mean-valued.
    pub fn mean_of(&self, key: KpiKey) -> Option<f64> {
        match self.get(key)?.value {
            KpiValue::Mean(value) => Some(value),
            _ => None,
        }
    }

    /// The count value for a key, when present and count-valued.
    pub fn count_of(&self, key: KpiKey) -> Option<u64> {
        match self.get(key)?.value {
            KpiValue::Count(value) => Some(value),
            _ => None,
        }
    }

    /// The text value for a key, when present and text-valued.
    pub fn text_of(&self, key: KpiKey) -> Option<&str> {
        match &self.get(key)?.value {
            KpiValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

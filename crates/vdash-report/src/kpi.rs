//! KPI computation over a loaded survey table.
//!
//! Every KPI is computed independently in a single pass over its source
//! column. A KPI whose column is absent or entirely missing is omitted
//! from the result, never reported as NaN or zero, and never an error.

use std::collections::BTreeMap;

use polars::prelude::*;
use vdash_ingest::parse_numeric;
use vdash_model::{ColumnRole, Kpi, KpiKey, KpiSet, RoleMap};

use crate::error::Result;

/// Compute the full KPI set for a table.
///
/// `RespondentCount` and `AnswerDensity` are always present; all other
/// keys depend on their source column resolving through the role map.
pub fn compute_kpis(df: &DataFrame, roles: &RoleMap) -> Result<KpiSet> {
    let mut kpis = KpiSet::new();
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    for (role, key) in [
        (ColumnRole::Age, KpiKey::AverageAge),
        (ColumnRole::DeliveriesPerDay, KpiKey::AverageDeliveries),
        (ColumnRole::SuccessRate, KpiKey::SuccessRate),
        (ColumnRole::FixedIncome, KpiKey::AverageIncome),
    ] {
        if let Some(name) = roles.resolve(role, &columns)
            && let Some(kpi) = mean_kpi(df, name)?
        {
            kpis.insert(key, kpi);
        }
    }

    if let Some(name) = roles.resolve(ColumnRole::Company, &columns) {
        let stats = company_stats(df, name)?;
        kpis.insert(
            KpiKey::UniqueCompanies,
            Kpi::count(stats.distinct, stats.respondents),
        );
        if let Some(top) = stats.top {
            kpis.insert(KpiKey::TopCompany, Kpi::text(top, stats.respondents));
        }
    }

    kpis.insert(
        KpiKey::RespondentCount,
        Kpi::count(df.height() as u64, df.height()),
    );
    kpis.insert(
        KpiKey::AnswerDensity,
        Kpi::count(answered_cells(df), df.height()),
    );

    tracing::debug!(kpis = kpis.len(), rows = df.height(), "computed KPI set");
    Ok(kpis)
}

/// Arithmetic mean of a column's non-missing values.
///
/// Numeric columns use their values directly (non-finite treated as
/// missing); text columns contribute only cells that parse as numbers.
fn mean_kpi(df: &DataFrame, column: &str) -> Result<Option<Kpi>> {
    let values = numeric_cells(df.column(column)?)?;
    if values.is_empty() {
        return Ok(None);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Ok(Some(Kpi::mean(mean, values.len())))
}

fn numeric_cells(column: &Column) -> Result<Vec<f64>> {
    let series = column.as_materialized_series();
    let values = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .flatten()
            .filter_map(parse_numeric)
            .collect(),
        dtype if dtype.is_primitive_numeric() => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect(),
        _ => Vec::new(),
    };
    Ok(values)
}

struct CompanyStats {
    distinct: u64,
    respondents: usize,
    /// Most frequent value; ties resolve to the lexicographically
    /// smallest, matching the original dashboard's sorted mode.
    top: Option<String>,
}

fn company_stats(df: &DataFrame, column: &str) -> Result<CompanyStats> {
    let series = df.column(column)?.as_materialized_series();
    let strings = series.cast(&DataType::String)?;
    let strings = strings.str()?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut respondents = 0usize;
    for cell in strings.into_iter().flatten() {
        *counts.entry(cell.to_string()).or_insert(0) += 1;
        respondents += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for (value, count) in &counts {
        // Strict comparison keeps the first (smallest) key on ties.
        if top.is_none_or(|(_, best)| *count > best) {
            top = Some((value.as_str(), *count));
        }
    }

    Ok(CompanyStats {
        distinct: counts.len() as u64,
        respondents,
        top: top.map(|(value, _)| value.to_string()),
    })
}

/// Total non-missing cells across all columns.
fn answered_cells(df: &DataFrame) -> u64 {
    df.get_columns()
        .iter()
        .map(|column| (column.len() - column.null_count()) as u64)
        .sum()
}

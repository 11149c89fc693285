//! Display-slot selection for the four headline metric cards.
//!
//! Slot contents follow a fixed priority chain: deliveries-per-day wins
//! over fixed income for slot 3, success rate wins over company count for
//! slot 4, and a generic coverage count fills in when neither is
//! available.

use vdash_model::{KpiKey, KpiSet};

/// One rendered metric: a label, a formatted value, and an optional
/// sub-label ("56 respondents").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl MetricCard {
    fn new(label: impl Into<String>, value: impl Into<String>, delta: Option<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            delta,
        }
    }
}

/// Select and format the four headline cards.
///
/// `questions` is the table's column count, used by the coverage
/// fallback.
pub fn select_cards(kpis: &KpiSet, questions: usize) -> Vec<MetricCard> {
    vec![
        respondents_card(kpis),
        age_card(kpis),
        deliveries_card(kpis, questions),
        success_card(kpis),
    ]
}

fn respondents_card(kpis: &KpiSet) -> MetricCard {
    let total = kpis.count_of(KpiKey::RespondentCount).unwrap_or(0);
    MetricCard::new(
        KpiKey::RespondentCount.label(),
        group_thousands(total),
        Some(format!("of {} total", group_thousands(total))),
    )
}

fn age_card(kpis: &KpiSet) -> MetricCard {
    match (
        kpis.mean_of(KpiKey::AverageAge),
        kpis.get(KpiKey::AverageAge),
    ) {
        (Some(mean), Some(kpi)) => MetricCard::new(
            KpiKey::AverageAge.label(),
            format!("{mean:.1} years"),
            Some(format!("{} respondents", kpi.respondents)),
        ),
        _ => MetricCard::new(KpiKey::AverageAge.label(), "No data", None),
    }
}

fn deliveries_card(kpis: &KpiSet, questions: usize) -> MetricCard {
    if let (Some(mean), Some(kpi)) = (
        kpis.mean_of(KpiKey::AverageDeliveries),
        kpis.get(KpiKey::AverageDeliveries),
    ) {
        return MetricCard::new(
            KpiKey::AverageDeliveries.label(),
            format!("{mean:.1}/day"),
            Some(format!("{} drivers", kpi.respondents)),
        );
    }
    if let (Some(mean), Some(kpi)) = (
        kpis.mean_of(KpiKey::AverageIncome),
        kpis.get(KpiKey::AverageIncome),
    ) {
        return MetricCard::new(
            KpiKey::AverageIncome.label(),
            format!("{} EGP", group_thousands(mean.round() as u64)),
            Some(format!("{} responses", kpi.respondents)),
        );
    }
    MetricCard::new("Data Coverage", format!("{questions} questions"), None)
}

fn success_card(kpis: &KpiSet) -> MetricCard {
    if let (Some(mean), Some(kpi)) = (
        kpis.mean_of(KpiKey::SuccessRate),
        kpis.get(KpiKey::SuccessRate),
    ) {
        return MetricCard::new(
            KpiKey::SuccessRate.label(),
            format!("{mean:.1}%"),
            Some(format!("{} drivers", kpi.respondents)),
        );
    }
    if let Some(distinct) = kpis.count_of(KpiKey::UniqueCompanies) {
        let top = kpis.text_of(KpiKey::TopCompany).unwrap_or("N/A");
        return MetricCard::new(
            KpiKey::UniqueCompanies.label(),
            distinct.to_string(),
            Some(format!("Top: {top}")),
        );
    }
    let answers = kpis.count_of(KpiKey::AnswerDensity).unwrap_or(0);
    MetricCard::new(
        KpiKey::AnswerDensity.label(),
        format!("{} answers", group_thousands(answers)),
        None,
    )
}

/// Format an integer with comma thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

//! Side-by-side comparison of saved scenarios.

mod metrics;
pub mod views;

pub use metrics::{select_best_value, DerivedMetrics};
pub use views::{ComparisonColumn, ComparisonRow, ComparisonTable, ScenarioSummary};

use super::domain::SlotId;
use super::engine::PricingResult;
use super::format::{format_percentage, format_rate, format_usd};
use super::store::SavedScenarioSet;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("nothing to compare: save at least one scenario before generating a comparison")]
    EmptyComparison,
}

/// Rows of the parameter table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonParameter {
    Location,
    NodeType,
    NumSystems,
    TotalCards,
    TermLength,
    HourlyRate,
    DownPaymentPercentage,
    DownPayment,
    MonthlyPayment,
    TotalContractValue,
}

impl ComparisonParameter {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Location,
            Self::NodeType,
            Self::NumSystems,
            Self::TotalCards,
            Self::TermLength,
            Self::HourlyRate,
            Self::DownPaymentPercentage,
            Self::DownPayment,
            Self::MonthlyPayment,
            Self::TotalContractValue,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "IDC Location",
            Self::NodeType => "Node Type",
            Self::NumSystems => "Number of Systems",
            Self::TotalCards => "Total Cards",
            Self::TermLength => "Term Length (months)",
            Self::HourlyRate => "Hourly Rate per Card",
            Self::DownPaymentPercentage => "Down Payment %",
            Self::DownPayment => "Down Payment",
            Self::MonthlyPayment => "Monthly Payment",
            Self::TotalContractValue => "Total Contract Value",
        }
    }

    pub fn display(self, result: &PricingResult) -> String {
        let input = &result.input;
        match self {
            Self::Location => input.location.clone(),
            Self::NodeType => input.node_type.clone(),
            Self::NumSystems => input.num_systems.to_string(),
            Self::TotalCards => result.total_cards.to_string(),
            Self::TermLength => input.term_length_months.to_string(),
            Self::HourlyRate => format_rate(input.hourly_rate_per_card),
            Self::DownPaymentPercentage => format_percentage(input.down_payment_percentage),
            Self::DownPayment => format_usd(result.down_payment_amount),
            Self::MonthlyPayment => format_usd(result.monthly_payment_amount),
            Self::TotalContractValue => format_usd(result.total_contract_value),
        }
    }
}

/// Tabulates every occupied slot, in slot order, and flags the best value.
pub fn compare(saved: &SavedScenarioSet) -> Result<ComparisonTable, ComparisonError> {
    let entries: Vec<(SlotId, &PricingResult)> = saved.occupied().collect();
    if entries.is_empty() {
        return Err(ComparisonError::EmptyComparison);
    }

    let columns = entries
        .iter()
        .map(|(slot, result)| ComparisonColumn {
            slot: *slot,
            scenario_name: result.input.name.clone(),
        })
        .collect();

    let parameters = ComparisonParameter::ordered()
        .into_iter()
        .map(|parameter| ComparisonRow {
            label: parameter.label().to_string(),
            cells: entries
                .iter()
                .map(|(_, result)| parameter.display(result))
                .collect(),
        })
        .collect();

    let mut metrics: Vec<DerivedMetrics> = entries
        .iter()
        .map(|(slot, result)| DerivedMetrics::for_result(*slot, result))
        .collect();
    let best_value = select_best_value(&metrics);
    for entry in &mut metrics {
        entry.best_value = Some(entry.slot) == best_value;
    }

    let summaries = entries
        .iter()
        .map(|(slot, result)| ScenarioSummary {
            slot: *slot,
            scenario_name: result.input.name.clone(),
            summary: result.summary.clone(),
        })
        .collect();

    debug!(
        scenarios = entries.len(),
        best_value = ?best_value.map(SlotId::get),
        "generated comparison"
    );

    Ok(ComparisonTable {
        columns,
        parameters,
        metrics,
        best_value,
        summaries,
    })
}

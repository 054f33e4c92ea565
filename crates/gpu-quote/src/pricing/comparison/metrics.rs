use super::super::domain::{SlotId, CARDS_PER_SYSTEM, HOURS_PER_MONTH};
use super::super::engine::PricingResult;
use serde::Serialize;

/// Compute-only cost figures used to rank saved scenarios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub slot: SlotId,
    pub monthly_cost_per_card: f64,
    pub monthly_cost_per_system: f64,
    pub total_monthly_cost: f64,
    pub cost_per_card_full_term: f64,
    pub best_value: bool,
}

impl DerivedMetrics {
    pub fn for_result(slot: SlotId, result: &PricingResult) -> Self {
        let monthly_cost_per_card = result.input.hourly_rate_per_card * HOURS_PER_MONTH;
        let monthly_cost_per_system = monthly_cost_per_card * f64::from(CARDS_PER_SYSTEM);

        Self {
            slot,
            monthly_cost_per_card,
            monthly_cost_per_system,
            total_monthly_cost: monthly_cost_per_system * f64::from(result.input.num_systems),
            cost_per_card_full_term: monthly_cost_per_card
                * f64::from(result.input.term_length_months),
            best_value: false,
        }
    }
}

/// Picks the slot with the lowest full-term cost per card. The scan keeps
/// the first minimum it sees, so ties go to the earliest slot.
pub fn select_best_value(metrics: &[DerivedMetrics]) -> Option<SlotId> {
    let mut lowest = f64::INFINITY;
    let mut best = None;

    for entry in metrics {
        if entry.cost_per_card_full_term < lowest {
            lowest = entry.cost_per_card_full_term;
            best = Some(entry.slot);
        }
    }

    best
}

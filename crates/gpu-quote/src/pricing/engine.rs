use super::domain::{
    PricingError, ScenarioInput, CARDS_PER_SYSTEM, GB_PER_TB, HOURS_PER_MONTH, MONTHS_PER_YEAR,
};
use super::summary::render_pricing_summary;
use super::tiers::{StorageTier, StorageTierTable, TierTableId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The storage tier a capacity fell into, copied out of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTier {
    pub label: String,
    pub sku: String,
    pub cost_per_gb_month: f64,
}

impl From<&StorageTier> for MatchedTier {
    fn from(tier: &StorageTier) -> Self {
        Self {
            label: tier.label.clone(),
            sku: tier.sku.clone(),
            cost_per_gb_month: tier.cost_per_gb_month,
        }
    }
}

/// Fully derived pricing for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Inputs as priced, with the hourly rate already clamped.
    #[serde(flatten)]
    pub input: ScenarioInput,
    pub total_cards: u64,
    pub tier_table: TierTableId,
    pub matched_tier: Option<MatchedTier>,
    pub cost_per_gb_month: f64,
    pub monthly_compute_cost: f64,
    pub monthly_storage_cost: f64,
    pub annual_storage_cost: f64,
    pub total_contract_value: f64,
    pub down_payment_amount: f64,
    pub monthly_payment_amount: f64,
    pub summary: String,
}

impl PricingResult {
    pub fn has_storage(&self) -> bool {
        self.input.storage_capacity_tb > 0
    }

    /// Contract value left after the down payment.
    pub fn remaining_amount(&self) -> f64 {
        self.total_contract_value - self.down_payment_amount
    }

    pub fn total_gpu_hours(&self) -> f64 {
        HOURS_PER_MONTH * f64::from(self.input.term_length_months) * self.total_cards as f64
    }
}

/// Prices a scenario against the supplied storage tier table.
pub fn price_scenario(
    input: &ScenarioInput,
    tiers: &StorageTierTable,
) -> Result<PricingResult, PricingError> {
    let input = validated(input)?;
    let term = f64::from(input.term_length_months);
    let total_cards = input.total_cards();

    let monthly_compute_cost = input.hourly_rate_per_card
        * HOURS_PER_MONTH
        * f64::from(CARDS_PER_SYSTEM)
        * f64::from(input.num_systems);
    let mut total_contract_value = monthly_compute_cost * term;

    let capacity = input.storage_capacity_tb;
    let mut matched_tier = None;
    let mut monthly_storage_cost = 0.0;
    let mut annual_storage_cost = 0.0;
    if capacity > 0 {
        let tier = tiers
            .lookup(capacity)
            .ok_or_else(|| PricingError::NoMatchingTier {
                capacity_tb: capacity,
                table: tiers.id().clone(),
            })?;
        debug!(capacity_tb = capacity, tier = %tier.label, table = %tiers.id(), "matched storage tier");

        monthly_storage_cost = f64::from(capacity) * GB_PER_TB * tier.cost_per_gb_month;
        annual_storage_cost = monthly_storage_cost * MONTHS_PER_YEAR;
        total_contract_value += monthly_storage_cost * term;
        matched_tier = Some(MatchedTier::from(tier));
    }

    let down_payment_amount = total_contract_value * input.down_payment_percentage / 100.0;
    let monthly_payment_amount = (total_contract_value - down_payment_amount) / term;
    let cost_per_gb_month = matched_tier
        .as_ref()
        .map_or(0.0, |tier| tier.cost_per_gb_month);

    let mut result = PricingResult {
        input,
        total_cards,
        tier_table: tiers.id().clone(),
        matched_tier,
        cost_per_gb_month,
        monthly_compute_cost,
        monthly_storage_cost,
        annual_storage_cost,
        total_contract_value,
        down_payment_amount,
        monthly_payment_amount,
        summary: String::new(),
    };
    result.summary = render_pricing_summary(&result);

    debug!(
        scenario = %result.input.name,
        total_contract_value = result.total_contract_value,
        monthly_payment = result.monthly_payment_amount,
        "priced scenario"
    );

    Ok(result)
}

fn validated(input: &ScenarioInput) -> Result<ScenarioInput, PricingError> {
    if input.num_systems == 0 {
        return Err(PricingError::invalid(
            "number of systems",
            "must be at least 1",
        ));
    }
    if input.term_length_months == 0 {
        return Err(PricingError::DivisionByZero {
            context: "monthly payment for a 0 month term",
        });
    }
    if !input.down_payment_percentage.is_finite() {
        return Err(PricingError::invalid(
            "down payment percentage",
            format!("{} is not a number", input.down_payment_percentage),
        ));
    }

    Ok(ScenarioInput {
        hourly_rate_per_card: input.clamped_hourly_rate(),
        ..input.clone()
    })
}

use super::domain::{PricingError, ScenarioInput};
use super::engine::{price_scenario, PricingResult};
use super::summary::render_margin_profile;
use super::tiers::StorageTierTable;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_MARKUP_PERCENTAGE: f64 = 20.0;

/// Reseller margin derived from a transfer price and markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerMarginResult {
    pub transfer_price: f64,
    pub markup_percentage: f64,
    pub selling_price: f64,
    pub margin_amount: f64,
    pub margin_percentage: f64,
    pub total_gpu_hours: f64,
    pub transfer_price_per_gpu_hour: f64,
    pub selling_price_per_gpu_hour: f64,
    pub summary: String,
}

/// Transfer price offered when the caller does not set one.
pub fn suggested_transfer_price(result: &PricingResult) -> f64 {
    result.total_contract_value
}

pub fn compute_margin(
    result: &PricingResult,
    transfer_price: f64,
    markup_percentage: f64,
) -> Result<PartnerMarginResult, PricingError> {
    if !transfer_price.is_finite() {
        return Err(PricingError::invalid(
            "transfer price",
            format!("{transfer_price} is not a number"),
        ));
    }
    if !markup_percentage.is_finite() {
        return Err(PricingError::invalid(
            "partner markup",
            format!("{markup_percentage} is not a number"),
        ));
    }

    let selling_price = transfer_price * (1.0 + markup_percentage / 100.0);
    if selling_price == 0.0 {
        return Err(PricingError::DivisionByZero {
            context: "margin percentage for a zero selling price",
        });
    }
    let margin_amount = selling_price - transfer_price;
    let margin_percentage = margin_amount / selling_price * 100.0;

    let total_gpu_hours = result.total_gpu_hours();
    if total_gpu_hours == 0.0 {
        return Err(PricingError::DivisionByZero {
            context: "per GPU-hour price for zero GPU-hours",
        });
    }

    let mut margin = PartnerMarginResult {
        transfer_price,
        markup_percentage,
        selling_price,
        margin_amount,
        margin_percentage,
        total_gpu_hours,
        transfer_price_per_gpu_hour: transfer_price / total_gpu_hours,
        selling_price_per_gpu_hour: selling_price / total_gpu_hours,
        summary: String::new(),
    };
    margin.summary = render_margin_profile(&margin);

    debug!(
        scenario = %result.input.name,
        selling_price,
        margin_percentage,
        "computed partner margin"
    );

    Ok(margin)
}

/// Partner-mode pricing paired with its margin profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerQuote {
    pub pricing: PricingResult,
    pub margin: PartnerMarginResult,
}

impl PartnerQuote {
    pub fn summary(&self) -> String {
        format!("{}\n\n{}", self.pricing.summary, self.margin.summary)
    }
}

/// Prices against the partner tiers, then applies the markup. Without an
/// explicit transfer price the suggested one is used.
pub fn price_partner(
    input: &ScenarioInput,
    partner_tiers: &StorageTierTable,
    transfer_price: Option<f64>,
    markup_percentage: f64,
) -> Result<PartnerQuote, PricingError> {
    let pricing = price_scenario(input, partner_tiers)?;
    let transfer_price = transfer_price.unwrap_or_else(|| suggested_transfer_price(&pricing));
    let margin = compute_margin(&pricing, transfer_price, markup_percentage)?;
    Ok(PartnerQuote { pricing, margin })
}

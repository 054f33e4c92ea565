//! Contract pricing for GPU cloud deployments.
//!
//! Scenarios are priced against an explicit storage tier table so direct and
//! partner quotes share one engine. Saved results can then be compared side
//! by side to find the best value per card.

pub mod comparison;
pub mod domain;
mod engine;
pub mod format;
mod margin;
mod store;
mod summary;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use comparison::{compare, ComparisonError, ComparisonTable};
pub use domain::{
    clamp_hourly_rate, resolve_choice, PricingError, ScenarioInput, SlotError, SlotId,
};
pub use engine::{price_scenario, MatchedTier, PricingResult};
pub use margin::{
    compute_margin, price_partner, suggested_transfer_price, PartnerMarginResult, PartnerQuote,
    DEFAULT_MARKUP_PERCENTAGE,
};
pub use store::SavedScenarioSet;
pub use summary::{MARGIN_HEADING, SUMMARY_HEADING};
pub use tiers::{StorageTier, StorageTierTable, TierCeiling, TierTableError, TierTableId};

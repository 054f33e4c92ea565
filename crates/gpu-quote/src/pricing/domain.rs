use super::tiers::TierTableId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cards installed in every system being priced.
pub const CARDS_PER_SYSTEM: u32 = 8;
/// Average hours in a billing month.
pub const HOURS_PER_MONTH: f64 = 730.0;
pub const GB_PER_TB: f64 = 1024.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// Floor applied to the hourly card rate before any arithmetic.
pub const MIN_HOURLY_RATE: f64 = 0.01;

pub const OTHER_CHOICE: &str = "Other";
pub const CUSTOM_LOCATION: &str = "Custom Location";
pub const CUSTOM_NODE: &str = "Custom Node";

/// One of the fixed scenario positions a saved result can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotId(u8);

impl SlotId {
    pub const COUNT: u8 = 4;

    pub fn new(value: u8) -> Result<Self, SlotError> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SlotError::OutOfRange(value))
        }
    }

    pub const fn first() -> Self {
        Self(1)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT).map(Self)
    }
}

impl TryFrom<u8> for SlotId {
    type Error = SlotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotId> for u8 {
    fn from(value: SlotId) -> Self {
        value.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("scenario slot {0} is out of range (expected 1-4)")]
    OutOfRange(u8),
    #[error("scenario 1 can only be cloned into slots 2-4, not slot {0}")]
    NotCloneTarget(SlotId),
}

/// Raw parameters for one pricing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub name: String,
    pub location: String,
    pub node_type: String,
    pub hourly_rate_per_card: f64,
    pub down_payment_percentage: f64,
    pub num_systems: u32,
    pub term_length_months: u32,
    pub storage_capacity_tb: u32,
}

impl ScenarioInput {
    pub fn total_cards(&self) -> u64 {
        u64::from(self.num_systems) * u64::from(CARDS_PER_SYSTEM)
    }

    pub fn clamped_hourly_rate(&self) -> f64 {
        clamp_hourly_rate(self.hourly_rate_per_card)
    }

    /// Copies these inputs into another slot, suffixing the name with the
    /// clone's sequence number (slot 2 gets " 1", slot 4 gets " 3").
    pub fn clone_into_slot(&self, target: SlotId) -> Result<Self, SlotError> {
        if target == SlotId::first() {
            return Err(SlotError::NotCloneTarget(target));
        }

        Ok(Self {
            name: format!("{} {}", self.name, target.get() - 1),
            ..self.clone()
        })
    }
}

/// Non-finite or too-small rates fall back to the floor rather than erroring.
pub fn clamp_hourly_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.max(MIN_HOURLY_RATE)
    } else {
        MIN_HOURLY_RATE
    }
}

/// Resolves a select-list value, substituting the free-text override when
/// the "Other" entry was chosen.
pub fn resolve_choice(selected: &str, custom: Option<&str>, fallback: &str) -> String {
    if selected.trim() != OTHER_CHOICE {
        return selected.trim().to_string();
    }

    match custom.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("cannot compute {context}: division by zero")]
    DivisionByZero { context: &'static str },
    #[error("no storage tier in table {table} covers {capacity_tb} TB")]
    NoMatchingTier { capacity_tb: u32, table: TierTableId },
}

impl PricingError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_ids_are_limited_to_four_positions() {
        assert!(SlotId::new(0).is_err());
        assert_eq!(SlotId::new(4).map(SlotId::get), Ok(4));
        assert_eq!(SlotId::new(5), Err(SlotError::OutOfRange(5)));
        assert_eq!(SlotId::all().count(), 4);
    }

    #[test]
    fn hourly_rate_is_floored() {
        assert_eq!(clamp_hourly_rate(0.0), MIN_HOURLY_RATE);
        assert_eq!(clamp_hourly_rate(-3.5), MIN_HOURLY_RATE);
        assert_eq!(clamp_hourly_rate(f64::NAN), MIN_HOURLY_RATE);
        assert_eq!(clamp_hourly_rate(2.25), 2.25);
    }

    #[test]
    fn other_choice_uses_custom_text_or_fallback() {
        assert_eq!(resolve_choice("US-West", None, CUSTOM_LOCATION), "US-West");
        assert_eq!(
            resolve_choice("Other", Some("  Taipei 3 "), CUSTOM_LOCATION),
            "Taipei 3"
        );
        assert_eq!(resolve_choice("Other", Some("   "), CUSTOM_NODE), CUSTOM_NODE);
        assert_eq!(resolve_choice("Other", None, CUSTOM_NODE), CUSTOM_NODE);
    }

    #[test]
    fn cloning_renames_by_target_slot() {
        let input = ScenarioInput {
            name: "Baseline".to_string(),
            location: "US-West".to_string(),
            node_type: "H200".to_string(),
            hourly_rate_per_card: 2.0,
            down_payment_percentage: 10.0,
            num_systems: 2,
            term_length_months: 12,
            storage_capacity_tb: 0,
        };

        let slot_three = SlotId::new(3).expect("valid slot");
        let cloned = input.clone_into_slot(slot_three).expect("clone allowed");
        assert_eq!(cloned.name, "Baseline 2");
        assert_eq!(cloned.num_systems, input.num_systems);

        assert_eq!(
            input.clone_into_slot(SlotId::first()),
            Err(SlotError::NotCloneTarget(SlotId::first()))
        );
    }
}

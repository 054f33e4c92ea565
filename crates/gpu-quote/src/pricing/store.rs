use super::domain::{PricingError, ScenarioInput, SlotId};
use super::engine::{price_scenario, PricingResult};
use super::tiers::StorageTierTable;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

/// Saved results keyed by slot. Owned by whoever drives the session; saving
/// overwrites and nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SavedScenarioSet {
    slots: BTreeMap<SlotId, PricingResult>,
}

impl SavedScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a result, returning whatever the slot held before.
    pub fn save(&mut self, slot: SlotId, result: PricingResult) -> Option<PricingResult> {
        debug!(%slot, scenario = %result.input.name, "saved scenario");
        self.slots.insert(slot, result)
    }

    /// Prices the input and saves it in one step.
    pub fn price_and_save(
        &mut self,
        slot: SlotId,
        input: &ScenarioInput,
        tiers: &StorageTierTable,
    ) -> Result<&PricingResult, PricingError> {
        let result = price_scenario(input, tiers)?;
        debug!(%slot, scenario = %result.input.name, "saved scenario");
        let saved = match self.slots.entry(slot) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(result);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(result),
        };
        Ok(saved)
    }

    pub fn get(&self, slot: SlotId) -> Option<&PricingResult> {
        self.slots.get(&slot)
    }

    /// Occupied slots in ascending slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotId, &PricingResult)> + '_ {
        self.slots.iter().map(|(slot, result)| (*slot, result))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

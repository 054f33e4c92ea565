//! Scenario sheets: CSV files holding one scenario per slot, so a whole
//! comparison can be priced in a single session.

mod parser;

use crate::pricing::{
    PricingError, SavedScenarioSet, ScenarioInput, SlotError, SlotId, StorageTierTable,
};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioImportError {
    #[error("failed to read scenario sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario sheet data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Slot { row: usize, source: SlotError },
    #[error("row {row}: '{column}' is required")]
    MissingField { row: usize, column: &'static str },
}

/// Scenario rows keyed by the slot they should be saved into.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSheet {
    rows: Vec<(SlotId, ScenarioInput)>,
}

impl ScenarioSheet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScenarioImportError> {
        let rows = parser::parse_rows(reader)?;
        debug!(rows = rows.len(), "imported scenario sheet");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[(SlotId, ScenarioInput)] {
        &self.rows
    }

    /// Prices every row and saves it into its slot. Later rows for the same
    /// slot overwrite earlier ones, like re-saving a scenario.
    pub fn price_into(
        &self,
        saved: &mut SavedScenarioSet,
        tiers: &StorageTierTable,
    ) -> Result<(), PricingError> {
        for (slot, input) in &self.rows {
            saved.price_and_save(*slot, input, tiers)?;
        }
        Ok(())
    }
}

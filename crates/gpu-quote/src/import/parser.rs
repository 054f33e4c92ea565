use super::ScenarioImportError;
use crate::pricing::domain::{
    clamp_hourly_rate, resolve_choice, ScenarioInput, SlotId, CUSTOM_LOCATION, CUSTOM_NODE,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_rows<R: Read>(
    reader: R,
) -> Result<Vec<(SlotId, ScenarioInput)>, ScenarioImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (idx, record) in csv_reader.deserialize::<ScenarioRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        let line = idx + 2;
        let slot = SlotId::new(row.slot)
            .map_err(|source| ScenarioImportError::Slot { row: line, source })?;
        rows.push((slot, row.into_input(line)?));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct ScenarioRow {
    #[serde(rename = "Slot")]
    slot: u8,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(
        rename = "Other Location",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    other_location: Option<String>,
    #[serde(rename = "Node Type")]
    node_type: String,
    #[serde(
        rename = "Other Node",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    other_node: Option<String>,
    #[serde(rename = "Hourly Rate", default, deserialize_with = "lenient_rate")]
    hourly_rate: Option<f64>,
    #[serde(rename = "Down Payment %", default)]
    down_payment_percentage: Option<f64>,
    #[serde(rename = "Systems")]
    num_systems: u32,
    #[serde(rename = "Term Months")]
    term_length_months: u32,
    #[serde(rename = "Storage TB", default)]
    storage_capacity_tb: Option<u32>,
}

impl ScenarioRow {
    fn into_input(self, line: usize) -> Result<ScenarioInput, ScenarioImportError> {
        let down_payment_percentage = self
            .down_payment_percentage
            .ok_or(ScenarioImportError::MissingField {
                row: line,
                column: "Down Payment %",
            })?;

        Ok(ScenarioInput {
            location: resolve_choice(
                &self.location,
                self.other_location.as_deref(),
                CUSTOM_LOCATION,
            ),
            node_type: resolve_choice(&self.node_type, self.other_node.as_deref(), CUSTOM_NODE),
            name: self.name,
            hourly_rate_per_card: clamp_hourly_rate(self.hourly_rate.unwrap_or(0.0)),
            down_payment_percentage,
            num_systems: self.num_systems,
            term_length_months: self.term_length_months,
            storage_capacity_tb: self.storage_capacity_tb.unwrap_or(0),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Unparseable rates become `None` and are floored later, mirroring how the
/// rate field is clamped rather than rejected.
fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|value| value.trim().trim_start_matches('$').parse::<f64>().ok()))
}

use crate::pricing::domain::{ScenarioInput, SlotId};

pub(super) const TOLERANCE: f64 = 1e-6;

pub(super) fn scenario(name: &str) -> ScenarioInput {
    ScenarioInput {
        name: name.to_string(),
        location: "US-West Santa Clara".to_string(),
        node_type: "HGX H200".to_string(),
        hourly_rate_per_card: 2.0,
        down_payment_percentage: 10.0,
        num_systems: 1,
        term_length_months: 12,
        storage_capacity_tb: 0,
    }
}

pub(super) fn with_storage(name: &str, storage_capacity_tb: u32) -> ScenarioInput {
    ScenarioInput {
        storage_capacity_tb,
        ..scenario(name)
    }
}

pub(super) fn slot(value: u8) -> SlotId {
    SlotId::new(value).expect("valid slot")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

//! Banded storage pricing tables.
//!
//! A table is an ordered list of tiers whose capacity bands partition the
//! positive integers. Each tier carries its own upper-bound rule so tables
//! with inclusive and exclusive boundaries can coexist without special cases
//! in the pricing engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name and revision of a tier table, echoed on every pricing result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierTableId {
    pub name: String,
    pub version: u32,
}

impl TierTableId {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for TierTableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Upper edge of a capacity band, in TB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tb", rename_all = "snake_case")]
pub enum TierCeiling {
    Inclusive(u32),
    Exclusive(u32),
    Unbounded,
}

impl TierCeiling {
    pub const fn admits(self, capacity_tb: u32) -> bool {
        match self {
            Self::Inclusive(max) => capacity_tb <= max,
            Self::Exclusive(max) => capacity_tb < max,
            Self::Unbounded => true,
        }
    }

    /// Smallest capacity above this ceiling; `None` when nothing is.
    fn next_floor(self) -> Option<u32> {
        match self {
            Self::Inclusive(max) => max.checked_add(1),
            Self::Exclusive(max) => Some(max),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for TierCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inclusive(max) => write!(f, "<= {max} TB"),
            Self::Exclusive(max) => write!(f, "< {max} TB"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTier {
    pub label: String,
    pub sku: String,
    /// Inclusive lower edge of the band, in TB.
    pub min_tb: u32,
    pub ceiling: TierCeiling,
    pub cost_per_gb_month: f64,
}

impl StorageTier {
    fn new(label: &str, sku: &str, min_tb: u32, ceiling: TierCeiling, rate: f64) -> Self {
        Self {
            label: label.to_string(),
            sku: sku.to_string(),
            min_tb,
            ceiling,
            cost_per_gb_month: rate,
        }
    }

    pub fn covers(&self, capacity_tb: u32) -> bool {
        capacity_tb >= self.min_tb && self.ceiling.admits(capacity_tb)
    }

    fn is_empty_band(&self) -> bool {
        match self.ceiling {
            TierCeiling::Inclusive(max) => max < self.min_tb,
            TierCeiling::Exclusive(max) => max <= self.min_tb,
            TierCeiling::Unbounded => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierTableError {
    #[error("tier table {0} has no tiers")]
    Empty(TierTableId),
    #[error("first tier must start at 1 TB, found {found} TB")]
    MustStartAtOne { found: u32 },
    #[error("tier '{label}' has an empty capacity band")]
    EmptyBand { label: String },
    #[error("capacities {from}..{to} TB fall between '{after}' and '{before}'")]
    Gap {
        after: String,
        before: String,
        from: u32,
        to: u32,
    },
    #[error("tiers '{after}' and '{before}' overlap")]
    Overlap { after: String, before: String },
    #[error("tier '{label}' is unbounded but is not the last tier")]
    UnboundedBeforeLast { label: String },
    #[error("last tier '{label}' must be unbounded")]
    BoundedLastTier { label: String },
    #[error("tier '{label}' has an invalid rate {rate}")]
    InvalidRate { label: String, rate: f64 },
}

#[derive(Debug, Clone, Deserialize)]
struct TierTableSpec {
    id: TierTableId,
    tiers: Vec<StorageTier>,
}

impl TryFrom<TierTableSpec> for StorageTierTable {
    type Error = TierTableError;

    fn try_from(spec: TierTableSpec) -> Result<Self, Self::Error> {
        Self::new(spec.id, spec.tiers)
    }
}

/// Validated, ordered storage tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierTableSpec")]
pub struct StorageTierTable {
    id: TierTableId,
    tiers: Vec<StorageTier>,
}

impl StorageTierTable {
    pub fn new(id: TierTableId, tiers: Vec<StorageTier>) -> Result<Self, TierTableError> {
        let (first, last) = match (tiers.first(), tiers.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TierTableError::Empty(id)),
        };

        if first.min_tb != 1 {
            return Err(TierTableError::MustStartAtOne {
                found: first.min_tb,
            });
        }

        for tier in &tiers {
            if !tier.cost_per_gb_month.is_finite() || tier.cost_per_gb_month < 0.0 {
                return Err(TierTableError::InvalidRate {
                    label: tier.label.clone(),
                    rate: tier.cost_per_gb_month,
                });
            }
            if tier.is_empty_band() {
                return Err(TierTableError::EmptyBand {
                    label: tier.label.clone(),
                });
            }
        }

        for pair in tiers.windows(2) {
            let [current, next] = pair else { continue };
            let Some(floor) = current.ceiling.next_floor() else {
                return Err(TierTableError::UnboundedBeforeLast {
                    label: current.label.clone(),
                });
            };

            if next.min_tb > floor {
                return Err(TierTableError::Gap {
                    after: current.label.clone(),
                    before: next.label.clone(),
                    from: floor,
                    to: next.min_tb,
                });
            }
            if next.min_tb < floor {
                return Err(TierTableError::Overlap {
                    after: current.label.clone(),
                    before: next.label.clone(),
                });
            }
        }

        if last.ceiling != TierCeiling::Unbounded {
            return Err(TierTableError::BoundedLastTier {
                label: last.label.clone(),
            });
        }

        Ok(Self { id, tiers })
    }

    /// Rates used for direct customer quotes.
    ///
    /// Bands: `<= 100` Tier 1, `< 500` Tier 2, `< 1500` Tier 3, otherwise Tier 4.
    pub fn standard() -> Self {
        Self {
            id: TierTableId::new("standard", 1),
            tiers: vec![
                StorageTier::new(
                    "Tier 1 (1 TB - 99 TB)",
                    "GMI-STORAGE-T1 1TB-100TB",
                    1,
                    TierCeiling::Inclusive(100),
                    0.08,
                ),
                StorageTier::new(
                    "Tier 2 (100 TB - 499 TB)",
                    "GMI-STORAGE-T1 100 TB - 499 TB",
                    101,
                    TierCeiling::Exclusive(500),
                    0.07,
                ),
                StorageTier::new(
                    "Tier 3 (500+ TB)",
                    "GMI-STORAGE-T1-500 TB - 1.49 PB",
                    500,
                    TierCeiling::Exclusive(1500),
                    0.06,
                ),
                StorageTier::new(
                    "Tier 4 (1500+ TB)",
                    "GMI-STORAGE-T1-1.5 PB - 5 PB",
                    1500,
                    TierCeiling::Unbounded,
                    0.05,
                ),
            ],
        }
    }

    /// Rates used when pricing for a reseller.
    ///
    /// Rates follow `< 100` Tier 1, `< 500` Tier 2, otherwise Tier 3, while
    /// SKUs keep the standard `<= 100`, `< 500`, `< 1500` bands, so the
    /// partner tiers are split where the two disagree.
    pub fn partner() -> Self {
        Self {
            id: TierTableId::new("partner", 1),
            tiers: vec![
                StorageTier::new(
                    "Tier 1 (1 TB - 99 TB)",
                    "GMI-STORAGE-T1 1TB-100TB",
                    1,
                    TierCeiling::Exclusive(100),
                    0.10,
                ),
                StorageTier::new(
                    "Tier 2 (100 TB - 499 TB)",
                    "GMI-STORAGE-T1 1TB-100TB",
                    100,
                    TierCeiling::Inclusive(100),
                    0.07,
                ),
                StorageTier::new(
                    "Tier 2 (100 TB - 499 TB)",
                    "GMI-STORAGE-T1 100 TB - 499 TB",
                    101,
                    TierCeiling::Exclusive(500),
                    0.07,
                ),
                StorageTier::new(
                    "Tier 3 (500+ TB)",
                    "GMI-STORAGE-T1-500 TB - 1.49 PB",
                    500,
                    TierCeiling::Exclusive(1500),
                    0.05,
                ),
                StorageTier::new(
                    "Tier 3 (500+ TB)",
                    "GMI-STORAGE-T1-1.5 PB - 5 PB",
                    1500,
                    TierCeiling::Unbounded,
                    0.05,
                ),
            ],
        }
    }

    pub fn id(&self) -> &TierTableId {
        &self.id
    }

    pub fn tiers(&self) -> &[StorageTier] {
        &self.tiers
    }

    /// Capacity 0 has no storage line item and therefore no tier.
    pub fn lookup(&self, capacity_tb: u32) -> Option<&StorageTier> {
        if capacity_tb == 0 {
            return None;
        }
        self.tiers.iter().find(|tier| tier.covers(capacity_tb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_for(table: &StorageTierTable, capacity: u32) -> Option<&str> {
        table.lookup(capacity).map(|tier| tier.label.as_str())
    }

    #[test]
    fn built_in_tables_pass_validation() {
        for table in [StorageTierTable::standard(), StorageTierTable::partner()] {
            let rebuilt = StorageTierTable::new(table.id().clone(), table.tiers().to_vec());
            assert_eq!(rebuilt.as_ref(), Ok(&table));
        }
    }

    #[test]
    fn standard_table_boundaries() {
        let table = StorageTierTable::standard();
        assert_eq!(label_for(&table, 0), None);
        assert_eq!(label_for(&table, 1), Some("Tier 1 (1 TB - 99 TB)"));
        assert_eq!(label_for(&table, 100), Some("Tier 1 (1 TB - 99 TB)"));
        assert_eq!(label_for(&table, 101), Some("Tier 2 (100 TB - 499 TB)"));
        assert_eq!(label_for(&table, 499), Some("Tier 2 (100 TB - 499 TB)"));
        assert_eq!(label_for(&table, 500), Some("Tier 3 (500+ TB)"));
        assert_eq!(label_for(&table, 1499), Some("Tier 3 (500+ TB)"));
        assert_eq!(label_for(&table, 1500), Some("Tier 4 (1500+ TB)"));
        assert_eq!(label_for(&table, u32::MAX), Some("Tier 4 (1500+ TB)"));
    }

    #[test]
    fn standard_rates_follow_banding_for_every_capacity() {
        let table = StorageTierTable::standard();
        for capacity in 1..=2_000u32 {
            let expected = if capacity <= 100 {
                0.08
            } else if capacity < 500 {
                0.07
            } else if capacity < 1500 {
                0.06
            } else {
                0.05
            };
            let tier = table.lookup(capacity).expect("every capacity has a tier");
            assert_eq!(tier.cost_per_gb_month, expected, "capacity {capacity}");
        }
    }

    #[test]
    fn partner_table_boundaries() {
        let table = StorageTierTable::partner();
        let rate = |capacity| table.lookup(capacity).map(|tier| tier.cost_per_gb_month);
        assert_eq!(rate(99), Some(0.10));
        assert_eq!(rate(100), Some(0.07));
        assert_eq!(rate(499), Some(0.07));
        assert_eq!(rate(500), Some(0.05));
        assert_eq!(rate(1500), Some(0.05));
    }

    #[test]
    fn partner_skus_follow_standard_bands() {
        let table = StorageTierTable::partner();
        let sku = |capacity| table.lookup(capacity).map(|tier| tier.sku.as_str());
        assert_eq!(sku(99), Some("GMI-STORAGE-T1 1TB-100TB"));
        assert_eq!(sku(100), Some("GMI-STORAGE-T1 1TB-100TB"));
        assert_eq!(sku(101), Some("GMI-STORAGE-T1 100 TB - 499 TB"));
        assert_eq!(sku(1000), Some("GMI-STORAGE-T1-500 TB - 1.49 PB"));
        assert_eq!(sku(1500), Some("GMI-STORAGE-T1-1.5 PB - 5 PB"));

        assert_eq!(label_for(&table, 100), Some("Tier 2 (100 TB - 499 TB)"));
        assert_eq!(label_for(&table, 1500), Some("Tier 3 (500+ TB)"));
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        let id = TierTableId::new("custom", 1);
        let gap = StorageTierTable::new(
            id.clone(),
            vec![
                StorageTier::new("A", "A", 1, TierCeiling::Inclusive(10), 0.1),
                StorageTier::new("B", "B", 20, TierCeiling::Unbounded, 0.1),
            ],
        );
        assert!(matches!(
            gap,
            Err(TierTableError::Gap { from: 11, to: 20, .. })
        ));

        let overlap = StorageTierTable::new(
            id.clone(),
            vec![
                StorageTier::new("A", "A", 1, TierCeiling::Inclusive(10), 0.1),
                StorageTier::new("B", "B", 10, TierCeiling::Unbounded, 0.1),
            ],
        );
        assert!(matches!(overlap, Err(TierTableError::Overlap { .. })));

        let bounded = StorageTierTable::new(
            id,
            vec![StorageTier::new("A", "A", 1, TierCeiling::Exclusive(10), 0.1)],
        );
        assert!(matches!(
            bounded,
            Err(TierTableError::BoundedLastTier { .. })
        ));
    }

    #[test]
    fn rejects_unbounded_middle_tier_and_bad_rates() {
        let id = TierTableId::new("custom", 2);
        let middle = StorageTierTable::new(
            id.clone(),
            vec![
                StorageTier::new("A", "A", 1, TierCeiling::Unbounded, 0.1),
                StorageTier::new("B", "B", 5, TierCeiling::Unbounded, 0.1),
            ],
        );
        assert!(matches!(
            middle,
            Err(TierTableError::UnboundedBeforeLast { .. })
        ));

        let negative = StorageTierTable::new(
            id.clone(),
            vec![StorageTier::new("A", "A", 1, TierCeiling::Unbounded, -0.1)],
        );
        assert!(matches!(negative, Err(TierTableError::InvalidRate { .. })));

        assert!(matches!(
            StorageTierTable::new(id, Vec::new()),
            Err(TierTableError::Empty(_))
        ));
    }

    #[test]
    fn deserialization_validates_the_table() {
        let json = serde_json::to_string(&StorageTierTable::partner()).expect("serializes");
        let parsed: StorageTierTable = serde_json::from_str(&json).expect("round trips");
        assert_eq!(parsed, StorageTierTable::partner());

        let broken = r#"{
            "id": {"name": "broken", "version": 1},
            "tiers": [
                {"label": "A", "sku": "A", "min_tb": 2, "ceiling": {"kind": "unbounded"}, "cost_per_gb_month": 0.1}
            ]
        }"#;
        let err = serde_json::from_str::<StorageTierTable>(broken).expect_err("must start at 1 TB");
        assert!(err.to_string().contains("must start at 1 TB"));
    }
}

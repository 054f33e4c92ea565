use gpu_quote::error::AppError;
use gpu_quote::pricing::format::format_rate;
use gpu_quote::pricing::{StorageTierTable, TierCeiling};
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_tier_table(table: &StorageTierTable) -> String {
    let mut lines = vec![format!("Storage tiers ({})", table.id())];
    for tier in table.tiers() {
        let band = match tier.ceiling {
            TierCeiling::Inclusive(max) => format!("{} TB - {} TB", tier.min_tb, max),
            TierCeiling::Exclusive(max) => {
                format!("{} TB - {} TB", tier.min_tb, max.saturating_sub(1))
            }
            TierCeiling::Unbounded => format!("{}+ TB", tier.min_tb),
        };
        lines.push(format!(
            "- {}: {} | {}/GB-month | {}",
            tier.label,
            band,
            format_rate(tier.cost_per_gb_month),
            tier.sku
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_standard_bands() {
        let rendered = render_tier_table(&StorageTierTable::standard());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Storage tiers (standard v1)");
        assert_eq!(
            lines[1],
            "- Tier 1 (1 TB - 99 TB): 1 TB - 100 TB | $0.08/GB-month | GMI-STORAGE-T1 1TB-100TB"
        );
        assert_eq!(
            lines[2],
            "- Tier 2 (100 TB - 499 TB): 101 TB - 499 TB | $0.07/GB-month | GMI-STORAGE-T1 100 TB - 499 TB"
        );
        assert!(lines[4].contains("1500+ TB | $0.05/GB-month"));
    }

    #[test]
    fn renders_partner_bands() {
        let rendered = render_tier_table(&StorageTierTable::partner());
        assert!(rendered.starts_with("Storage tiers (partner v1)"));
        assert!(rendered.contains("1 TB - 99 TB | $0.10/GB-month"));
        assert!(rendered.contains("100 TB - 100 TB | $0.07/GB-month | GMI-STORAGE-T1 1TB-100TB"));
        assert!(rendered.contains("1500+ TB | $0.05/GB-month | GMI-STORAGE-T1-1.5 PB - 5 PB"));
    }
}

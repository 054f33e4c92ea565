use super::engine::PricingResult;
use super::format::{format_count, format_percentage, format_rate, format_usd};
use super::margin::PartnerMarginResult;

pub const SUMMARY_HEADING: &str = "GMI Cloud Spec Summary:";
pub const MARGIN_HEADING: &str = "Partner Margin Profile:";
pub(crate) const MARGIN_SEPARATOR: &str = "\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}\u{2014}";

pub(crate) fn render_pricing_summary(result: &PricingResult) -> String {
    let input = &result.input;
    let mut lines = vec![
        SUMMARY_HEADING.to_string(),
        format!("- Scenario Name: {}", input.name),
        format!("- IDC Location: {}", input.location),
        format!("- Node Type: {}", input.node_type),
        format!(
            "- Number of Systems: {} (Total Cards: {})",
            format_count(input.num_systems),
            format_count(result.total_cards)
        ),
        format!("- Term Length: {} months", input.term_length_months),
    ];

    let storage = result
        .matched_tier
        .as_ref()
        .filter(|_| result.has_storage());

    if let Some(tier) = storage {
        let capacity = format_count(input.storage_capacity_tb);
        lines.extend([
            format!("- Storage Capacity: {capacity} TB External Storage"),
            format!("- Storage SKU: {}", tier.sku),
            format!("- Storage Qty: {capacity} TB"),
            format!("- Cost per GB/Month: {}", format_rate(tier.cost_per_gb_month)),
            format!(
                "- Monthly Storage Cost: {}",
                format_usd(result.monthly_storage_cost)
            ),
            format!(
                "- Annual Storage Cost: {}",
                format_usd(result.annual_storage_cost)
            ),
        ]);
    }

    lines.push(String::new());
    lines.push("Solution Pricing:".to_string());
    lines.push(format!(
        "- Hourly Rate per Card: {}",
        format_rate(input.hourly_rate_per_card)
    ));

    if let Some(tier) = storage {
        lines.push(format!(
            "- Storage {} Monthly Cost: {}",
            tier.label,
            format_usd(result.monthly_storage_cost)
        ));
    }

    lines.extend([
        format!(
            "- {} Down Payment: {}",
            format_percentage(input.down_payment_percentage),
            format_usd(result.down_payment_amount)
        ),
        format!(
            "- Adjusted Monthly Payment: {}",
            format_usd(result.monthly_payment_amount)
        ),
        format!(
            "- Total Contract Value: {}",
            format_usd(result.total_contract_value)
        ),
    ]);

    lines.join("\n")
}

pub(crate) fn render_margin_profile(margin: &PartnerMarginResult) -> String {
    [
        MARGIN_SEPARATOR.to_string(),
        String::new(),
        MARGIN_HEADING.to_string(),
        String::new(),
        format!(
            "- Transfer Price to Partner: {}",
            format_usd(margin.transfer_price)
        ),
        format!(
            "- Transfer Price to Partner: {} GPU/HR",
            format_rate(margin.transfer_price_per_gpu_hour)
        ),
        format!(
            "- Partner Markup: {}",
            format_percentage(margin.markup_percentage)
        ),
        format!(
            "- Partner Selling Price: {}",
            format_usd(margin.selling_price)
        ),
        format!(
            "- Partner Selling Price: {} per GPU/HR",
            format_rate(margin.selling_price_per_gpu_hour)
        ),
        format!(
            "- Partner Margin: {} ({:.2}%)",
            format_usd(margin.margin_amount),
            margin.margin_percentage
        ),
        format!("- Total Margin: {}", format_usd(margin.margin_amount)),
    ]
    .join("\n")
}

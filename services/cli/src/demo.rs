use clap::Args;
use gpu_quote::config::PricingConfig;
use gpu_quote::error::AppError;
use gpu_quote::pricing::{
    compare, price_partner, ComparisonTable, SavedScenarioSet, ScenarioInput, SlotId,
};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Markup applied in the partner portion (defaults to APP_DEFAULT_MARKUP_PCT)
    #[arg(long)]
    pub(crate) markup: Option<f64>,
    /// Skip the partner margin portion of the demo
    #[arg(long)]
    pub(crate) skip_partner: bool,
}

fn baseline() -> ScenarioInput {
    ScenarioInput {
        name: "Santa Clara H200".to_string(),
        location: "US-West Santa Clara".to_string(),
        node_type: "HGX H200".to_string(),
        hourly_rate_per_card: 2.10,
        down_payment_percentage: 10.0,
        num_systems: 4,
        term_length_months: 12,
        storage_capacity_tb: 200,
    }
}

/// Saves the baseline in slot 1 and three clones with varied terms into the
/// remaining slots, then compares them.
pub(crate) fn build_demo_comparison(
    pricing: &PricingConfig,
) -> Result<(SavedScenarioSet, ComparisonTable), AppError> {
    let base = baseline();
    let mut saved = SavedScenarioSet::new();
    saved.price_and_save(SlotId::first(), &base, &pricing.standard_tiers)?;

    for slot in SlotId::all().skip(1) {
        let mut variant = base.clone_into_slot(slot)?;
        match slot.get() {
            2 => {
                variant.term_length_months = 24;
                variant.hourly_rate_per_card = 1.95;
            }
            3 => {
                variant.term_length_months = 36;
                variant.hourly_rate_per_card = 1.80;
                variant.storage_capacity_tb = 600;
            }
            _ => {
                variant.location = "Taipei 3".to_string();
                variant.num_systems = 8;
                variant.hourly_rate_per_card = 2.00;
            }
        }
        saved.price_and_save(slot, &variant, &pricing.standard_tiers)?;
    }

    let table = compare(&saved)?;
    Ok((saved, table))
}

pub(crate) fn run_demo(args: DemoArgs, pricing: &PricingConfig) -> Result<(), AppError> {
    let (saved, table) = build_demo_comparison(pricing)?;
    info!(scenarios = saved.len(), "demo comparison ready");

    println!("GPU contract pricing demo\n");
    println!("{}", table.render_text());

    if let Some(slot) = table.best_value {
        let name = saved
            .get(slot)
            .map(|result| result.input.name.as_str())
            .unwrap_or_default();
        println!("\nBest value: Scenario {slot} ({name})");
    }

    if args.skip_partner {
        return Ok(());
    }

    let markup = args.markup.unwrap_or(pricing.default_markup_percentage);
    let quote = price_partner(&baseline(), &pricing.partner_tiers, None, markup)?;
    println!("\nPartner view of Scenario 1\n");
    println!("{}", quote.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fills_all_slots_with_numbered_clones() {
        let (saved, table) =
            build_demo_comparison(&PricingConfig::default()).expect("demo comparison builds");

        assert_eq!(saved.len(), usize::from(SlotId::COUNT));
        let headings: Vec<String> = table.columns.iter().map(|c| c.heading()).collect();
        assert_eq!(
            headings,
            vec![
                "Scenario 1: Santa Clara H200",
                "Scenario 2: Santa Clara H200 1",
                "Scenario 3: Santa Clara H200 2",
                "Scenario 4: Santa Clara H200 3",
            ]
        );
    }

    #[test]
    fn shortest_cheapest_term_is_best_value() {
        let (_, table) =
            build_demo_comparison(&PricingConfig::default()).expect("demo comparison builds");

        // 2.00/hr over 12 months undercuts every longer or pricier variant.
        assert_eq!(table.best_value, SlotId::new(4).ok());
        let slot3 = &table.metrics[2];
        assert!(!slot3.best_value);
    }
}

use crate::infra::{print_json, render_tier_table};
use clap::Args;
use gpu_quote::config::PricingConfig;
use gpu_quote::error::AppError;
use gpu_quote::import::ScenarioSheet;
use gpu_quote::pricing::domain::{CUSTOM_LOCATION, CUSTOM_NODE};
use gpu_quote::pricing::{
    clamp_hourly_rate, compare, price_partner, price_scenario, resolve_choice, SavedScenarioSet,
    ScenarioInput,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

/// Scenario inputs shared by the pricing subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct ScenarioArgs {
    /// Scenario name shown in summaries
    #[arg(long, default_value = "Scenario 1")]
    pub(crate) name: String,
    /// IDC location, or "Other" together with --other-location
    #[arg(long, default_value = "US-West Santa Clara")]
    pub(crate) location: String,
    #[arg(long)]
    pub(crate) other_location: Option<String>,
    /// Node type, or "Other" together with --other-node
    #[arg(long, default_value = "HGX H200")]
    pub(crate) node_type: String,
    #[arg(long)]
    pub(crate) other_node: Option<String>,
    /// Hourly rate per card in USD (floored at $0.01)
    #[arg(long, default_value_t = 2.0)]
    pub(crate) hourly_rate: f64,
    /// Down payment as a percentage of the contract value
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down_payment: f64,
    /// Number of 8-card systems
    #[arg(long, default_value_t = 1)]
    pub(crate) systems: u32,
    #[arg(long, default_value_t = 12)]
    pub(crate) term_months: u32,
    /// External storage in TB (0 for none)
    #[arg(long, default_value_t = 0)]
    pub(crate) storage_tb: u32,
}

impl ScenarioArgs {
    pub(crate) fn to_input(&self) -> ScenarioInput {
        ScenarioInput {
            name: self.name.trim().to_string(),
            location: resolve_choice(
                &self.location,
                self.other_location.as_deref(),
                CUSTOM_LOCATION,
            ),
            node_type: resolve_choice(&self.node_type, self.other_node.as_deref(), CUSTOM_NODE),
            hourly_rate_per_card: clamp_hourly_rate(self.hourly_rate),
            down_payment_percentage: self.down_payment,
            num_systems: self.systems,
            term_length_months: self.term_months,
            storage_capacity_tb: self.storage_tb,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    pub(crate) scenario: ScenarioArgs,
    /// Print the full pricing result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PartnerArgs {
    #[command(flatten)]
    pub(crate) scenario: ScenarioArgs,
    /// Transfer price in USD (defaults to the quoted contract value)
    #[arg(long)]
    pub(crate) transfer_price: Option<f64>,
    /// Partner markup percentage (defaults to APP_DEFAULT_MARKUP_PCT)
    #[arg(long)]
    pub(crate) markup: Option<f64>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Scenario sheet to import (one row per slot)
    #[arg(long)]
    pub(crate) sheet: PathBuf,
    /// Also export the comparison table to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Price storage against the partner tiers
    #[arg(long)]
    pub(crate) partner: bool,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TiersArgs {
    /// Show the partner table instead of the standard one
    #[arg(long)]
    pub(crate) partner: bool,
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quote(args: QuoteArgs, pricing: &PricingConfig) -> Result<(), AppError> {
    let result = price_scenario(&args.scenario.to_input(), &pricing.standard_tiers)?;

    if args.json {
        return print_json(&result);
    }
    println!("{}", result.summary);
    Ok(())
}

pub(crate) fn run_partner(args: PartnerArgs, pricing: &PricingConfig) -> Result<(), AppError> {
    let markup = args.markup.unwrap_or(pricing.default_markup_percentage);
    let quote = price_partner(
        &args.scenario.to_input(),
        &pricing.partner_tiers,
        args.transfer_price,
        markup,
    )?;

    if args.json {
        return print_json(&quote);
    }
    println!("{}", quote.summary());
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs, pricing: &PricingConfig) -> Result<(), AppError> {
    let sheet = ScenarioSheet::from_path(&args.sheet)?;
    info!(sheet = %args.sheet.display(), rows = sheet.rows().len(), "loaded scenario sheet");

    let mut saved = SavedScenarioSet::new();
    sheet.price_into(&mut saved, pricing.tiers(args.partner))?;
    let table = compare(&saved)?;

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        table.write_csv(BufWriter::new(file))?;
        info!(path = %path.display(), "exported comparison");
    }

    if args.json {
        return print_json(&table);
    }
    println!("{}", table.render_text());
    Ok(())
}

pub(crate) fn run_tiers(args: TiersArgs, pricing: &PricingConfig) -> Result<(), AppError> {
    let table = pricing.tiers(args.partner);
    if args.json {
        return print_json(table);
    }
    println!("{}", render_tier_table(table));
    Ok(())
}

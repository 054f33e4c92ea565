use crate::commands::{
    run_compare, run_partner, run_quote, run_tiers, CompareArgs, PartnerArgs, QuoteArgs,
    TiersArgs,
};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use gpu_quote::config::AppConfig;
use gpu_quote::error::AppError;
use gpu_quote::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "gpu-quote",
    about = "Price GPU cluster leases, model partner margins, and compare scenarios",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Price one scenario against the standard storage tiers
    Quote(QuoteArgs),
    /// Price against partner tiers and show the margin profile
    Partner(PartnerArgs),
    /// Import a scenario sheet and compare the saved slots
    Compare(CompareArgs),
    /// Print the active storage tier table
    Tiers(TiersArgs),
    /// Run a canned four-slot comparison plus a partner profile
    Demo(DemoArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Quote(_) => "quote",
            Command::Partner(_) => "partner",
            Command::Compare(_) => "compare",
            Command::Tiers(_) => "tiers",
            Command::Demo(_) => "demo",
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(
        ?config.environment,
        command = cli.command.name(),
        standard_tiers = %config.pricing.standard_tiers.id(),
        partner_tiers = %config.pricing.partner_tiers.id(),
        "gpu-quote starting"
    );

    match cli.command {
        Command::Quote(args) => run_quote(args, &config.pricing),
        Command::Partner(args) => run_partner(args, &config.pricing),
        Command::Compare(args) => run_compare(args, &config.pricing),
        Command::Tiers(args) => run_tiers(args, &config.pricing),
        Command::Demo(args) => run_demo(args, &config.pricing),
    }
}

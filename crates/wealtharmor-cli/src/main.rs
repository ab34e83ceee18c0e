mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::crisis::CrisisArgs;
use commands::fx::FxArgs;
use commands::growth::ProjectArgs;
use commands::market::MarketArgs;
use commands::portfolio::PortfolioArgs;
use commands::radar::RadarArgs;
use commands::tax::TaxArgs;
use commands::tiers::{BriefArgs, TierArgs};

/// Personal wealth calculators
#[derive(Parser)]
#[command(
    name = "wealtharmor",
    version,
    about = "Personal wealth calculators with decimal precision",
    long_about = "Wealth tier classification, portfolio shares, capital gains tax, \
                  compound growth projections and crisis shocks for a Peruvian \
                  retail investor. Inputs come from flags, a JSON/YAML file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify total wealth into a tier
    Tier(TierArgs),
    /// Sentinel briefing (armor, threats, tactics) for a wealth level
    Brief(BriefArgs),
    /// Portfolio total, shares and expected return
    Portfolio(PortfolioArgs),
    /// Estimate capital gains tax
    Tax(TaxArgs),
    /// Project compound growth with monthly contributions
    Project(ProjectArgs),
    /// Apply a crisis scenario to an investment
    Crisis(CrisisArgs),
    /// List crisis scenarios and their impacts
    Scenarios,
    /// Compare listed investment opportunities
    Radar(RadarArgs),
    /// Quote and simulated history for a currency pair
    Market(MarketArgs),
    /// Fetch an exchange rate and convert an amount for display
    Fx(FxArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Tier(_) => "tier",
            Commands::Brief(_) => "brief",
            Commands::Portfolio(_) => "portfolio",
            Commands::Tax(_) => "tax",
            Commands::Project(_) => "project",
            Commands::Crisis(_) => "crisis",
            Commands::Scenarios => "scenarios",
            Commands::Radar(_) => "radar",
            Commands::Market(_) => "market",
            Commands::Fx(_) => "fx",
            Commands::Version => "version",
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!(command = cli.command.name(), "dispatching command");
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Tier(args) => commands::tiers::run_tier(args),
        Commands::Brief(args) => commands::tiers::run_brief(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Project(args) => commands::growth::run_project(args),
        Commands::Crisis(args) => commands::crisis::run_crisis(args),
        Commands::Scenarios => commands::crisis::run_scenarios(),
        Commands::Radar(args) => commands::radar::run_radar(args),
        Commands::Market(args) => commands::market::run_market(args),
        Commands::Fx(args) => commands::fx::run_fx(args),
        Commands::Version => {
            println!("wealtharmor {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

//! Mortgage Simulator CLI
//!
//! Reads a JSON request file, runs one calculation and prints the JSON result

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use mortgage_sim::api::{Api, AmortizeRequest, CompareRequest, Operation};
use mortgage_sim::export::{export_comparison_tables, export_loan_tables};
use mortgage_sim::{LoanComparator, SimulationConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mortgage-sim")]
#[command(about = "Loan amortization, loan comparison and insurance premium calculator", long_about = None)]
struct Cli {
    /// Engine configuration (JSON); defaults apply to missing fields
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortize one loan
    Amortize {
        /// Loan request (JSON)
        input: PathBuf,

        /// Also write monthly/annual CSV tables into this directory
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Price credit life insurance
    Life {
        /// Life insurance parameters (JSON)
        input: PathBuf,
    },
    /// Quote home insurance
    Home {
        /// Home insurance parameters (JSON)
        input: PathBuf,
    },
    /// Compare a reference loan with an alternative loan
    Compare {
        /// Comparison request (JSON)
        input: PathBuf,

        /// Also write both loans' tables and the investment table as CSV
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Run many loan scenarios and an optional rate sweep
    Batch {
        /// Batch request (JSON)
        input: PathBuf,
    },
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SimulationConfig::default()),
    }
}

fn run(cli: Cli) -> Result<Value> {
    let config = load_config(cli.config.as_deref())?;
    let api = Api::new(config.clone());

    let value = match cli.command {
        Commands::Amortize { input, csv_dir } => {
            let request: AmortizeRequest = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("Invalid loan request in {}", input.display()))?;
            let response = api.amortize(&request)?;
            if let Some(dir) = csv_dir {
                export_loan_tables(&dir, "loan", &response.result).context("CSV export failed")?;
            }
            serde_json::to_value(response)?
        }
        Commands::Life { input } => api.handle(Operation::LifeInsurance, &read_input(&input)?)?,
        Commands::Home { input } => api.handle(Operation::HomeInsurance, &read_input(&input)?)?,
        Commands::Compare { input, csv_dir } => {
            let request: CompareRequest = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("Invalid comparison request in {}", input.display()))?;
            let result = LoanComparator::new(config).compare(
                &request.reference_loan,
                &request.alternative_loan,
                request.investment_params.as_ref(),
                request.modular_schedule.as_ref(),
            )?;
            if let Some(dir) = csv_dir {
                let written = export_comparison_tables(&dir, &result).context("CSV export failed")?;
                info!("Exported {} CSV tables", written.len());
            }
            serde_json::to_value(result)?
        }
        Commands::Batch { input } => api.handle(Operation::Batch, &read_input(&input)?)?,
    };

    Ok(value)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let pretty = cli.pretty;
    let value = run(cli)?;

    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", output);
    Ok(())
}

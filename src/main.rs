//! loanflow - loan application pipeline
//!
//! CLI binary that submits loan applications to an agentic lending backend
//! and renders the intake, validation and decision stages.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loanflow::config::Settings;
use loanflow::form::Field;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "LOANFLOW_LOG";

#[derive(Parser)]
#[command(name = "loanflow")]
#[command(about = "Submit loan applications to an agentic lending backend")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides LOANFLOW_BACKEND_URL)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Skip the visual stage delays
    #[arg(long, global = true)]
    no_pacing: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an application through the three-stage pipeline
    Apply(ApplyFlags),

    /// Show processed-application statistics
    Dashboard {
        /// Maximum number of applications to list
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Print the raw dashboard data as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Default)]
struct ApplyFlags {
    /// Applicant first name
    #[arg(long)]
    first_name: Option<String>,

    /// Applicant last name
    #[arg(long)]
    last_name: Option<String>,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Gross annual income
    #[arg(long)]
    annual_income: Option<String>,

    /// Requested loan amount
    #[arg(long)]
    loan_amount: Option<String>,

    /// Credit score
    #[arg(long)]
    credit_score: Option<String>,

    /// Employment status: 0 unemployed, 1 self-employed, 2 employed
    #[arg(long)]
    employment_status: Option<String>,

    /// Housing status: 0 other, 1 rent, 2 own
    #[arg(long)]
    housing_status: Option<String>,

    /// Loan term in months (12, 36 or 60)
    #[arg(long)]
    loan_term: Option<String>,

    /// Identity document to upload
    #[arg(long)]
    identity_document: Option<PathBuf>,

    /// Income proof to upload
    #[arg(long)]
    income_proof: Option<PathBuf>,

    /// Never prompt; fail when a field is missing
    #[arg(long)]
    no_input: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

impl ApplyFlags {
    fn into_args(self) -> cli::ApplyArgs {
        let values = [
            (Field::FirstName, self.first_name),
            (Field::LastName, self.last_name),
            (Field::Email, self.email),
            (Field::AnnualIncome, self.annual_income),
            (Field::LoanAmount, self.loan_amount),
            (Field::CreditScore, self.credit_score),
            (Field::EmploymentStatus, self.employment_status),
            (Field::HousingStatus, self.housing_status),
            (Field::LoanTerm, self.loan_term),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect();

        cli::ApplyArgs {
            values,
            identity_document: self.identity_document,
            income_proof: self.income_proof,
            interactive: !self.no_input && std::io::stdin().is_terminal(),
            json: self.json,
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(fallback))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialise logging: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = Settings::resolve(cli.backend.as_deref(), cli.no_pacing)
        .context("invalid configuration")?;

    match cli.command {
        None => {
            // Default: interactive application
            cli::run_apply(&settings, ApplyFlags::default().into_args()).await?;
        }
        Some(Commands::Apply(flags)) => {
            cli::run_apply(&settings, flags.into_args()).await?;
        }
        Some(Commands::Dashboard { limit, json }) => {
            cli::run_dashboard(&settings, limit, json).await?;
        }
    }

    Ok(())
}

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use amortization_core::calendar::{self, DateConvention};
use amortization_core::schedule::{self, LoanParameters};
use amortization_core::MoneyRounding;

use crate::input;

/// Payment-date convention
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConventionArg {
    /// First of every month
    MonthStart,
    /// The start date's day of month
    AnchorDay,
}

impl From<ConventionArg> for DateConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::MonthStart => DateConvention::MonthStart,
            ConventionArg::AnchorDay => DateConvention::AnchorDay,
        }
    }
}

/// Midpoint rule for cent rounding
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    HalfEven,
    HalfAwayFromZero,
}

impl From<RoundingArg> for MoneyRounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfEven => MoneyRounding::HalfEven,
            RoundingArg::HalfAwayFromZero => MoneyRounding::HalfAwayFromZero,
        }
    }
}

/// Loan terms, given as flags or as a JSON/YAML document
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual interest rate as a decimal (e.g. 0.0325)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Number of payments per year
    #[arg(long, default_value_t = 12)]
    pub payments_per_year: u32,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Extra principal paid every period
    #[arg(long, default_value = "0")]
    pub additional: Decimal,

    /// Loan start date (YYYY-MM-DD), defaults to the first of next month
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "month-start")]
    pub date_convention: ConventionArg,

    #[arg(long, value_enum, default_value = "half-even")]
    pub rounding: RoundingArg,
}

impl LoanArgs {
    fn into_parameters(self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_input(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }

        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let years = self.years.ok_or("--years is required (or provide --input)")?;
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;

        Ok(
            LoanParameters::new(rate, years, self.payments_per_year, principal)
                .with_additional_payment(self.additional)
                .with_start_date(self.start_date.unwrap_or_else(calendar::default_start_date))
                .with_date_convention(self.date_convention.into())
                .with_rounding(self.rounding.into()),
        )
    }
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.into_parameters()?;
    info!(principal = %params.principal, periods = params.total_periods(), "building schedule");
    let result = schedule::analyze_loan(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_interest_by_year(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.into_parameters()?;
    info!(principal = %params.principal, "grouping interest by year");
    let result = schedule::analyze_annual_interest(&params)?;
    Ok(serde_json::to_value(result)?)
}

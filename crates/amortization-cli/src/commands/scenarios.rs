use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;
use tracing::{debug, info};

use amortization_core::calendar;
use amortization_core::scenarios::{self, ScenarioSetInput};

use crate::input;

/// Arguments for scenario comparison
#[derive(Args)]
pub struct ScenariosArgs {
    /// Path to JSON or YAML scenario set (defaults to the three built-in scenarios)
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario to expand with its balance timeline and annual interest
    #[arg(long)]
    pub select: Option<String>,

    /// Scenario the others are compared against (defaults to the first)
    #[arg(long)]
    pub baseline: Option<String>,

    /// Start date for the built-in scenarios (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut set_input: ScenarioSetInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let start = args
            .start_date
            .unwrap_or_else(calendar::default_start_date);
        debug!(%start, "using built-in scenarios");
        ScenarioSetInput {
            scenarios: scenarios::default_scenarios(start),
            baseline: None,
            selected: None,
        }
    };

    if args.baseline.is_some() {
        set_input.baseline = args.baseline;
    }
    if args.select.is_some() {
        set_input.selected = args.select;
    }

    info!(scenarios = set_input.scenarios.len(), "comparing scenarios");
    let result = scenarios::analyze_scenarios(&set_input)?;
    Ok(serde_json::to_value(result)?)
}

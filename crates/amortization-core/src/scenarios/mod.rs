//! Named loan scenarios computed side by side.
//!
//! Every scenario owns its schedule; nothing is shared between them, so a
//! set is built in parallel and kept in input order. Selecting a scenario is
//! a lookup by name for whichever presentation layer displays the set.

pub mod comparison;

use std::collections::HashSet;

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::AmortizationError;
use crate::schedule::{
    build_schedule, group_interest_by_year, AnnualInterestAggregate, LoanParameters, Schedule,
    SummaryStats,
};
use crate::types::Money;
use crate::AmortizationResult;

pub use comparison::{
    analyze_scenarios, compare_to_baseline, ScenarioComparison, ScenarioSetInput,
    ScenarioSetOutput, ScenarioView,
};

/// A loan under a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub name: String,
    pub loan: LoanParameters,
}

impl LoanScenario {
    pub fn new(name: impl Into<String>, loan: LoanParameters) -> Self {
        LoanScenario {
            name: name.into(),
            loan,
        }
    }
}

/// Outstanding balance after a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub payment_date: NaiveDate,
    pub balance: Money,
}

/// Everything computed for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub summary: SummaryStats,
    pub annual_interest: AnnualInterestAggregate,
    pub schedule: Schedule,
}

impl ScenarioResult {
    fn compute(scenario: &LoanScenario) -> AmortizationResult<Self> {
        trace!(scenario = %scenario.name, "computing scenario");
        let (schedule, summary) = build_schedule(&scenario.loan)?;
        let annual_interest = group_interest_by_year(&schedule);
        Ok(ScenarioResult {
            name: scenario.name.clone(),
            summary,
            annual_interest,
            schedule,
        })
    }

    /// Payment date and remaining balance of every period.
    pub fn balance_timeline(&self) -> Vec<BalancePoint> {
        self.schedule
            .iter()
            .map(|p| BalancePoint {
                payment_date: p.payment_date,
                balance: p.balance,
            })
            .collect()
    }
}

/// Computed scenarios, in input order.
#[derive(Debug, Clone)]
pub struct ScenarioSet {
    results: Vec<ScenarioResult>,
}

impl ScenarioSet {
    /// Validate and compute every scenario.
    pub fn compute(scenarios: &[LoanScenario]) -> AmortizationResult<Self> {
        validate_scenarios(scenarios)?;

        let results = scenarios
            .par_iter()
            .map(ScenarioResult::compute)
            .collect::<AmortizationResult<Vec<_>>>()?;

        Ok(ScenarioSet { results })
    }

    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }

    /// Look up a scenario by name.
    pub fn select(&self, name: &str) -> AmortizationResult<&ScenarioResult> {
        self.results
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| AmortizationError::UnknownScenario(name.to_string()))
    }
}

fn validate_scenarios(scenarios: &[LoanScenario]) -> AmortizationResult<()> {
    if scenarios.is_empty() {
        return Err(AmortizationError::InsufficientData(
            "at least one scenario is required".into(),
        ));
    }

    let mut seen = HashSet::new();
    for scenario in scenarios {
        if scenario.name.trim().is_empty() {
            return Err(AmortizationError::invalid(
                "scenarios.name",
                "Scenario name cannot be empty",
            ));
        }
        if !seen.insert(scenario.name.as_str()) {
            return Err(AmortizationError::invalid(
                "scenarios.name",
                format!("Duplicate scenario name '{}'", scenario.name),
            ));
        }
    }
    Ok(())
}

/// The three stock scenarios: 94,000 at 3.25% over 30 years, paid monthly,
/// with 0, 75 and 200 of additional principal each month.
pub fn default_scenarios(start_date: NaiveDate) -> Vec<LoanScenario> {
    [Decimal::ZERO, dec!(75), dec!(200)]
        .into_iter()
        .enumerate()
        .map(|(idx, additional)| {
            LoanScenario::new(
                format!("scenario {}", idx + 1),
                LoanParameters::new(dec!(0.0325), 30, 12, dec!(94000))
                    .with_additional_payment(additional)
                    .with_start_date(start_date),
            )
        })
        .collect()
}

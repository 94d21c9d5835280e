use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::{AnnualInterestAggregate, SummaryStats};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::AmortizationResult;

use super::{BalancePoint, LoanScenario, ScenarioResult, ScenarioSet};

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// A set of scenarios, the one the others are measured against, and the
/// one to display in detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSetInput {
    pub scenarios: Vec<LoanScenario>,
    /// Defaults to the first scenario.
    #[serde(default)]
    pub baseline: Option<String>,
    #[serde(default)]
    pub selected: Option<String>,
}

/// Headline numbers of one scenario against the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub name: String,
    pub payment: Money,
    pub additional_payment: Money,
    pub payoff_date: NaiveDate,
    pub number_of_payments: u32,
    pub total_interest: Money,
    /// Baseline payments minus this scenario's payments.
    pub periods_saved: i64,
    /// Baseline interest minus this scenario's interest.
    pub interest_saved: Money,
}

/// Detail for the selected scenario: the balance timeline and annual
/// interest series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioView {
    pub name: String,
    pub summary: SummaryStats,
    pub balance_timeline: Vec<BalancePoint>,
    pub annual_interest: AnnualInterestAggregate,
}

impl From<&ScenarioResult> for ScenarioView {
    fn from(result: &ScenarioResult) -> Self {
        ScenarioView {
            name: result.name.clone(),
            summary: result.summary.clone(),
            balance_timeline: result.balance_timeline(),
            annual_interest: result.annual_interest.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSetOutput {
    pub baseline: String,
    pub comparisons: Vec<ScenarioComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<ScenarioView>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare every scenario of `set` with the one named `baseline`.
pub fn compare_to_baseline(
    set: &ScenarioSet,
    baseline: &str,
) -> AmortizationResult<Vec<ScenarioComparison>> {
    let base = set.select(baseline)?;

    Ok(set
        .results()
        .iter()
        .map(|result| {
            let summary = &result.summary;
            ScenarioComparison {
                name: result.name.clone(),
                payment: summary.payment,
                additional_payment: summary.additional_payment,
                payoff_date: summary.payoff_date,
                number_of_payments: summary.number_of_payments,
                total_interest: summary.total_interest,
                periods_saved: i64::from(base.summary.number_of_payments)
                    - i64::from(summary.number_of_payments),
                interest_saved: base.summary.total_interest - summary.total_interest,
            }
        })
        .collect())
}

/// Compute a scenario set, compare it with its baseline and expand the
/// selected scenario.
pub fn analyze_scenarios(
    input: &ScenarioSetInput,
) -> AmortizationResult<ComputationOutput<ScenarioSetOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let set = ScenarioSet::compute(&input.scenarios)?;

    let baseline = match &input.baseline {
        Some(name) => name.clone(),
        None => set.results()[0].name.clone(),
    };
    let comparisons = compare_to_baseline(&set, &baseline)?;

    let base_principal = set.select(&baseline)?.summary.principal;
    for result in set.results() {
        if result.summary.principal != base_principal {
            warnings.push(format!(
                "Scenario '{}' borrows {} against a baseline of {}; savings are not like-for-like",
                result.name, result.summary.principal, base_principal
            ));
        }
    }

    let selected = input
        .selected
        .as_deref()
        .map(|name| set.select(name).map(ScenarioView::from))
        .transpose()?;

    let output = ScenarioSetOutput {
        baseline,
        comparisons,
        selected,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario comparison of level-payment amortization schedules",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use amortization_core::scenarios::{
    analyze_scenarios, compare_to_baseline, default_scenarios, ScenarioSet, ScenarioSetInput,
};
use amortization_core::AmortizationError;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
}

// ===========================================================================
// Stock scenarios: 0 / 75 / 200 additional principal per month
// ===========================================================================

#[test]
fn test_stock_scenarios_payoff() {
    let set = ScenarioSet::compute(&default_scenarios(start())).unwrap();
    let rows: Vec<(u32, Decimal)> = set
        .results()
        .iter()
        .map(|r| (r.summary.number_of_payments, r.summary.total_interest))
        .collect();
    assert_eq!(
        rows,
        vec![
            (360, dec!(53274.83)),
            (276, dec!(39581.85)),
            (201, dec!(27886.67)),
        ]
    );
}

#[test]
fn test_stock_scenarios_share_level_payment() {
    let set = ScenarioSet::compute(&default_scenarios(start())).unwrap();
    assert!(set.results().iter().all(|r| r.summary.payment == dec!(409.09)));
}

#[test]
fn test_comparison_against_first_scenario() {
    let set = ScenarioSet::compute(&default_scenarios(start())).unwrap();
    let comparisons = compare_to_baseline(&set, "scenario 1").unwrap();
    let savings: Vec<(i64, Decimal)> = comparisons
        .iter()
        .map(|c| (c.periods_saved, c.interest_saved))
        .collect();
    assert_eq!(
        savings,
        vec![
            (0, Decimal::ZERO),
            (84, dec!(13692.98)),
            (159, dec!(25388.16)),
        ]
    );
}

#[test]
fn test_selected_scenario_series_consistent() {
    let set = ScenarioSet::compute(&default_scenarios(start())).unwrap();
    for result in set.results() {
        let timeline = result.balance_timeline();
        assert_eq!(timeline.len(), result.schedule.len());
        assert_eq!(timeline.last().unwrap().balance, Decimal::ZERO);
        assert_eq!(result.annual_interest.total(), result.summary.total_interest);
    }
}

#[test]
fn test_unknown_scenario() {
    let set = ScenarioSet::compute(&default_scenarios(start())).unwrap();
    let err = compare_to_baseline(&set, "scenario 7").unwrap_err();
    assert!(matches!(err, AmortizationError::UnknownScenario(ref name) if name == "scenario 7"));
}

// ===========================================================================
// Serialized scenario sets
// ===========================================================================

#[test]
fn test_scenario_set_from_yaml() {
    let yaml = r#"
baseline: no extra
selected: aggressive
scenarios:
  - name: no extra
    loan:
      interest_rate: "0.0325"
      years: 30
      payments_per_year: 12
      principal: "94000"
      start_date: "2017-01-01"
  - name: aggressive
    loan:
      interest_rate: "0.0325"
      years: 30
      payments_per_year: 12
      principal: "94000"
      additional_payment: "200"
      start_date: "2017-01-01"
"#;
    let input: ScenarioSetInput = serde_yaml::from_str(yaml).unwrap();
    let output = analyze_scenarios(&input).unwrap();
    assert_eq!(output.result.baseline, "no extra");
    assert_eq!(output.result.comparisons[1].periods_saved, 159);
    let view = output.result.selected.unwrap();
    assert_eq!(view.name, "aggressive");
    assert_eq!(view.summary.total_interest, dec!(27886.67));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_scenario_set_json_omits_missing_selection() {
    let input = ScenarioSetInput {
        scenarios: default_scenarios(start()),
        baseline: None,
        selected: None,
    };
    let output = analyze_scenarios(&input).unwrap();
    let value = serde_json::to_value(&output).unwrap();
    assert!(value["result"].get("selected").is_none());
    assert_eq!(value["result"]["comparisons"].as_array().unwrap().len(), 3);
    assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit");
}

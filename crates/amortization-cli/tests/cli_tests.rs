use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn amort() -> Command {
    let mut cmd = Command::cargo_bin("amort").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

const REFERENCE_LOAN: [&str; 9] = [
    "--rate",
    "0.0325",
    "--years",
    "30",
    "--principal",
    "94000",
    "--start-date",
    "2017-01-01",
    "--payments-per-year=12",
];

fn sample_path() -> String {
    format!("{}/samples/scenarios.yaml", env!("CARGO_MANIFEST_DIR"))
}

// ===========================================================================
// schedule
// ===========================================================================

#[test]
fn test_schedule_minimal_prints_payment() {
    amort()
        .arg("schedule")
        .args(REFERENCE_LOAN)
        .args(["--output", "minimal"])
        .assert()
        .success()
        .stdout("409.09\n");
}

#[test]
fn test_schedule_json_envelope() {
    let output = amort()
        .arg("schedule")
        .args(REFERENCE_LOAN)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["result"]["summary"]["total_interest"], "53274.83");
    assert_eq!(value["result"]["summary"]["payoff_date"], "2046-12-01");
    assert_eq!(value["result"]["schedule"].as_array().unwrap().len(), 360);
    assert!(value["methodology"].is_string());
}

#[test]
fn test_schedule_csv_rows() {
    let output = amort()
        .arg("schedule")
        .args(REFERENCE_LOAN)
        .args(["--additional", "200", "--output", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 202);
    assert_eq!(
        lines[0],
        "period,payment_date,principal,interest,additional_payment,total_payment,cumulative_principal,balance"
    );
    assert!(lines[1].starts_with("1,2017-01-01,354.51,254.58,200,609.09,"));
}

#[test]
fn test_schedule_table_output() {
    amort()
        .arg("schedule")
        .args(REFERENCE_LOAN)
        .args(["--output", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("summary:"))
        .stdout(predicate::str::contains("Methodology:"))
        .stdout(predicate::str::contains("rounding residual"));
}

#[test]
fn test_schedule_requires_flags() {
    amort()
        .args(["schedule", "--years", "30", "--principal", "94000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rate is required"));
}

#[test]
fn test_schedule_invalid_term() {
    amort()
        .args(["schedule", "--rate", "0.03", "--years", "0", "--principal", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid loan parameters"));
}

#[test]
fn test_schedule_from_stdin() {
    let json = r#"{"interest_rate":"0.0325","years":30,"payments_per_year":12,"principal":"94000","start_date":"2017-01-01"}"#;
    amort()
        .args(["schedule", "--output", "minimal"])
        .write_stdin(json)
        .assert()
        .success()
        .stdout("409.09\n");
}

#[test]
fn test_schedule_from_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "interest_rate: \"0.0325\"\nyears: 30\npayments_per_year: 12\nprincipal: \"94000\"\nadditional_payment: \"75\"\nstart_date: \"2017-01-01\""
    )
    .unwrap();

    let output = amort()
        .arg("schedule")
        .arg("--input")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["result"]["summary"]["number_of_payments"], 276);
    assert_eq!(value["result"]["summary"]["total_interest"], "39581.85");
}

#[test]
fn test_missing_input_file() {
    amort()
        .args(["schedule", "--input", "/nonexistent/loan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_directory_input_rejected() {
    let dir = tempfile::tempdir().unwrap();
    amort()
        .arg("schedule")
        .arg("--input")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a file"));
}

#[test]
fn test_overflowing_loan_reports_error() {
    amort()
        .args(["schedule", "--rate", "0.5", "--years", "140", "--payments-per-year", "1"])
        .args(["--principal", "1000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Financial impossibility"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    amort()
        .arg("schedule")
        .args(REFERENCE_LOAN)
        .args(["--output", "minimal", "--verbose"])
        .assert()
        .success()
        .stdout("409.09\n")
        .stderr(predicate::str::contains("built amortization schedule"));
}

// ===========================================================================
// interest-by-year
// ===========================================================================

#[test]
fn test_interest_by_year_csv() {
    let output = amort()
        .arg("interest-by-year")
        .args(REFERENCE_LOAN)
        .args(["--output", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "year,interest");
    assert_eq!(lines[1], "2017,3027.13");
    assert_eq!(lines.len(), 31);
}

#[test]
fn test_interest_by_year_minimal_total() {
    amort()
        .arg("interest-by-year")
        .args(REFERENCE_LOAN)
        .args(["--output", "minimal"])
        .assert()
        .success()
        .stdout("53274.83\n");
}

// ===========================================================================
// scenarios
// ===========================================================================

#[test]
fn test_builtin_scenarios_minimal() {
    amort()
        .args(["scenarios", "--start-date", "2017-01-01", "--output", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scenario 2: 13692.98"))
        .stdout(predicate::str::contains("scenario 3: 25388.16"));
}

#[test]
fn test_scenarios_select_expands_view() {
    let output = amort()
        .args(["scenarios", "--start-date", "2017-01-01", "--select", "scenario 2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let selected = &value["result"]["selected"];
    assert_eq!(selected["name"], "scenario 2");
    assert_eq!(selected["balance_timeline"].as_array().unwrap().len(), 276);
}

#[test]
fn test_scenarios_from_sample_file() {
    let output = amort()
        .args(["scenarios", "--input", &sample_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["result"]["baseline"], "scenario 1");
    assert_eq!(value["result"]["selected"]["name"], "scenario 3");
    assert_eq!(value["result"]["comparisons"][2]["periods_saved"], 159);
}

#[test]
fn test_scenarios_unknown_selection() {
    amort()
        .args(["scenarios", "--start-date", "2017-01-01", "--select", "scenario 9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario: scenario 9"));
}

#[test]
fn test_version() {
    amort()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("amort "));
}

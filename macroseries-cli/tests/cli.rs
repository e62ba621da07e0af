use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

const COLLECTION: &str = r#"
title = "Korea Data"
start_year = 2000
end_year = 2001
frequency = "Q"
interval = 2

[[series]]
title = "Korea GDP"
frequency = "Q"
country = "KR"
indicator = "NGDP_SA_XDC"
aggregation = "sum"

[[series]]
title = "Korea CPI"
frequency = "M"
country = "KR"
indicator = "PCPI_IX"
"#;

fn macroseries() -> Command {
    let mut cmd = Command::cargo_bin("macroseries").expect("binary built");
    cmd.env("MACROSERIES_USE_MOCK", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn show_prints_label_value_lines() {
    let out = macroseries()
        .args([
            "show", "-f", "A", "-c", "KR", "-i", "LUR_PT", "--start", "2000", "--end", "2002",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("2000\t"));
    assert!(lines[2].starts_with("2002\t"));
}

#[test]
fn show_resamples_to_json() {
    let out = macroseries()
        .args([
            "show", "-f", "A", "-c", "KR", "-i", "NGDP_SA_XDC", "--start", "2000", "--end",
            "2000", "--to", "q", "-a", "sum", "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["frequency"], "Q");
    assert_eq!(json["key"], "A.KR.NGDP_SA_XDC");
    assert_eq!(json["labels"][0], "2000-Q1");
    assert_eq!(json["data"]["time"].as_array().unwrap().len(), 4);
}

#[test]
fn show_reports_source_failure() {
    macroseries()
        .args([
            "show", "-f", "A", "-c", "FAIL", "-i", "LUR_PT", "--start", "2000", "--end", "2000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("forced failure"));
}

#[test]
fn unknown_frequency_is_rejected_by_argument_parsing() {
    macroseries()
        .args([
            "show", "-f", "W", "-c", "KR", "-i", "X", "--start", "2000", "--end", "2000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported frequency"));
}

#[test]
fn export_writes_csv_table() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("korea.toml");
    fs::write(&cfg, COLLECTION).unwrap();
    let target = dir.path().join("korea.csv");

    macroseries()
        .arg("export")
        .arg("--config")
        .arg(&cfg)
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("korea.csv"));

    let body = fs::read_to_string(&target).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("time:Q,2000-Q1,"));
    assert!(lines[1].starts_with("Korea GDP,"));
    assert!(lines[4].starts_with("Korea CPI,"));
}

#[test]
fn chart_prints_spec_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("korea.toml");
    fs::write(&cfg, COLLECTION).unwrap();

    let out = macroseries()
        .arg("chart")
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["title"], "Korea Data");
    let ticks: Vec<&str> = json["ticks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["label"].as_str().unwrap())
        .collect();
    assert_eq!(ticks, vec!["2000-Q1", "2000-Q3", "2001-Q1"]);
    assert_eq!(json["panels"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_config_file_fails_with_context() {
    macroseries()
        .args(["export", "--config", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

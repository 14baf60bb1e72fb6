//! CLI Tests
//!
//! Drive the `sora` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sora(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sora"))
        .current_dir(dir)
        .env_remove("SORA_LOG")
        .args(args)
        .output()
        .expect("failed to run sora")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_template_is_valid_input() {
    let dir = TempDir::new().unwrap();
    let output = sora(dir.path(), &["template"]);
    assert!(output.status.success());
    fs::write(dir.path().join("site.json"), &output.stdout).unwrap();

    let output = sora(dir.path(), &["evaluate", "site.json", "--format", "json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["sail"], "III");
}

#[test]
fn test_multiple_sites_keep_argument_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"population": "controlled"}"#).unwrap();
    fs::write(
        dir.path().join("b.json"),
        r#"{"population": "assembly", "ua_characteristic": "40m_200ms"}"#,
    )
    .unwrap();

    let output = sora(
        dir.path(),
        &["evaluate", "a.json", "b.json", "--format", "json"],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let sites = value.as_array().unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0]["population"], "controlled");
    assert_eq!(sites[1]["out_of_scope"], true);
}

#[test]
fn test_fail_on_noncompliant_exits_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("site.json"), "{}").unwrap();
    let output = sora(
        dir.path(),
        &["evaluate", "site.json", "--fail-on-noncompliant"],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("NOT COMPLIANT"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = sora(dir.path(), &["evaluate", "missing.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
}

#[test]
fn test_config_format_applies_without_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".sorarc.json"), r#"{"format": "json"}"#).unwrap();
    fs::write(dir.path().join("site.json"), "{}").unwrap();

    let output = sora(dir.path(), &["evaluate", "site.json"]);
    assert!(output.status.success());
    assert!(serde_json::from_str::<serde_json::Value>(&stdout(&output)).is_ok());
}

#[test]
fn test_oso_listing_for_sail() {
    let dir = TempDir::new().unwrap();
    let output = sora(dir.path(), &["oso", "--sail", "VI"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("SAIL VI"));
    assert!(text.contains("OSO#24"));

    let output = sora(dir.path(), &["oso", "--sail", "VII"]);
    assert!(!output.status.success());
}

#[test]
fn test_tables_validate_rejects_broken_file() {
    let dir = TempDir::new().unwrap();
    let output = sora(dir.path(), &["tables", "validate"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Tables valid: SORA 2.5"));

    fs::write(dir.path().join("tables.json"), "{}").unwrap();
    let output = sora(dir.path(), &["tables", "validate", "--path", "tables.json"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".sorarc.json"),
        r#"{"adjacent_area": {"min_distance_m": -1.0}}"#,
    )
    .unwrap();
    let output = sora(dir.path(), &["config", "validate"]);
    assert_eq!(output.status.code(), Some(1));
}

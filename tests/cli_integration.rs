//! Integration tests for the metadv binary.
//!
//! These tests run the compiled CLI against temporary dbt projects and
//! check exit status, stdout, and stderr.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

fn project(yaml: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("models/metadv/metadv.yml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, yaml).unwrap();
    dir
}

fn metadv(args: &[&str], project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("metadv").unwrap();
    cmd.env_remove("METADV_CONFIG").args(args).arg(project);
    cmd
}

const VALID: &str = r#"
metadv:
  targets:
    - name: customer
  sources:
    - name: stg_customers
      columns:
        - name: customer_id
          target: [{target_name: customer}]
        - name: customer_name
          target: [{attribute_of: customer}]
        - name: loaded_at
"#;

const DUPLICATES: &str = r#"
metadv:
  targets:
    - name: customer
    - name: customer
"#;

// =============================================================================
// validate
// =============================================================================

#[test]
fn validate_passes_with_warnings() {
    let dir = project(VALID);
    metadv(&["validate"], dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Checked 1 targets, 3 columns (2 connected): 0 errors, 1 warnings",
        ))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn validate_verbose_lists_warnings() {
    let dir = project(VALID);
    metadv(&["validate", "--verbose"], dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARN]"))
        .stdout(predicate::str::contains("loaded_at"));
}

#[test]
fn validate_fails_on_errors() {
    let dir = project(DUPLICATES);
    metadv(&["validate"], dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR]"))
        .stderr(predicate::str::contains("validation failed with 1 error(s)"));
}

#[test]
fn validate_json_report() {
    let dir = project(VALID);
    let output = metadv(&["validate", "--json"], dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["errors"].as_array().unwrap().len(), 0);
    assert_eq!(report["warnings"][0]["code"], "column_no_connection");
    assert_eq!(report["summary"]["total_columns"], 3);
}

#[test]
fn validate_missing_document() {
    let dir = TempDir::new().unwrap();
    metadv(&["validate"], dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("metadv.yml not found"));
}

#[test]
fn validate_missing_project() {
    let dir = TempDir::new().unwrap();
    metadv(&["validate"], &dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project path does not exist"));
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_prints_summary() {
    let dir = project(VALID);
    metadv(&["resolve"], dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("### Artifacts (automate_dv)"))
        .stdout(predicate::str::contains("| hub | `hub_customer` |"))
        .stderr(predicate::str::contains("warning:"));
}

#[test]
fn resolve_json_to_file() {
    let dir = project(VALID);
    let out = dir.path().join("target/metadv.json");

    metadv(
        &["resolve", "--json", "--package", "datavault4dbt", "--output", out.to_str().unwrap()],
        dir.path(),
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote 3 artifacts to"));

    let resolved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(resolved["prefix"], "datavault4dbt");
    assert_eq!(resolved["stages"][0]["hashed_columns"]["customer_hk"][0], "customer_id");
    assert_eq!(resolved["hubs"][0]["contributing_sources"][0], "stg_customers");
}

#[test]
fn resolve_blocked_prints_every_error() {
    let dir = project(DUPLICATES);
    metadv(&["resolve", "--json"], dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Target 'customer' is declared more than once"));
}

#[test]
fn resolve_rejects_unknown_package() {
    let dir = project(VALID);
    metadv(&["resolve", "--package", "dbt_utils"], dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported package"));
}

#[test]
fn quiet_suppresses_warnings() {
    let dir = project(VALID);
    metadv(&["--quiet", "resolve"], dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:").not());
}

// =============================================================================
// completion
// =============================================================================

#[test]
fn completion_bash() {
    Command::cargo_bin("metadv")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("metadv"));
}

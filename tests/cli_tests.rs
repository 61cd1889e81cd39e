//! CLI integration tests

mod common;

use assert_cmd::Command;
use common::Fixture;
use predicates::prelude::*;
use std::fs;
use tray_wear_dashboard::cli::commands;
use tray_wear_dashboard::config::DashboardConfig;
use tray_wear_dashboard::view::RenderContext;

fn tray_wear() -> Command {
    let mut cmd = Command::cargo_bin("tray-wear").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("TRAY_WEAR_CONFIG")
        .env_remove("TRAY_WEAR_LATEST")
        .env_remove("TRAY_WEAR_DATABASE");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// STATUS COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_status_lists_every_sensor() {
    let fixture = Fixture::new();

    tray_wear()
        .arg("--database")
        .arg(&fixture.database)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acceptable thickness, use as normal"))
        .stdout(predicate::str::contains("Actual thickness is between 19 and 25"))
        .stdout(predicate::str::contains("Replace"))
        .stdout(predicate::str::contains("No Wear Data Received"));
}

#[test]
fn test_status_verbose_lists_sensor_names() {
    let fixture = Fixture::new();

    tray_wear()
        .args(["status", "--verbose", "--database"])
        .arg(&fixture.database)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 sensors: S1, S2, S3"));
}

#[test]
fn test_status_missing_database_fails() {
    tray_wear()
        .args(["--database", "/nonexistent/db.xlsx", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_status_reads_config_file() {
    let fixture = Fixture::new();
    let config_path = fixture.dir.path().join("dashboard.yaml");
    fs::write(
        &config_path,
        format!("database_file: {}\n", fixture.database.display()),
    )
    .unwrap();

    tray_wear()
        .arg("--config")
        .arg(&config_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("S2"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_writes_workbook() {
    let fixture = Fixture::new();
    let output = fixture.dir.path().join("normalized.xlsx");

    tray_wear()
        .arg("--database")
        .arg(&fixture.database)
        .arg("export")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Complete!"));

    assert!(output.exists());
}

#[test]
fn test_export_command_function() {
    let fixture = Fixture::new();
    let output = fixture.dir.path().join("out.xlsx");
    let context = RenderContext::from(&DashboardConfig {
        database_file: fixture.database.clone(),
        ..DashboardConfig::default()
    });

    let result = commands::export(&context, output.clone(), true);
    assert!(result.is_ok(), "Export should succeed on a valid database");
    assert!(output.exists());
}

#[test]
fn test_status_command_function_missing_file() {
    let context = RenderContext::from(&DashboardConfig {
        database_file: "/nonexistent/db.xlsx".into(),
        ..DashboardConfig::default()
    });

    assert!(commands::status(&context, false).is_err());
}

#[test]
fn test_help_lists_commands() {
    tray_wear()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("export"));
}

// ═══════════════════════════════════════════════════════════════════════════
// SERVER BINARY TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_server_help_lists_workbook_overrides() {
    Command::cargo_bin("tray-wear-server")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--latest"))
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("TRAY_WEAR_DATABASE"));
}

#[test]
fn test_status_database_env_override() {
    let fixture = Fixture::new();

    let mut cmd = Command::cargo_bin("tray-wear").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("TRAY_WEAR_CONFIG")
        .env("TRAY_WEAR_DATABASE", &fixture.database)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("S3"));
}

//! End-to-end tests for the `nexora` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated in temporary data and runtime directories
fn nexora(data: &TempDir, runtime: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nexora").unwrap();
    cmd.env("NEXORA_CLI_DATA_DIR", data.path())
        .env("NEXORA_CLI_RUNTIME_DIR", runtime.path())
        .env_remove("NEXORA_API_URL")
        .env_remove("NEXORA_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let (data, runtime) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    nexora(&data, &runtime)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("transaction"));
}

#[test]
fn test_config_set_and_show() {
    let (data, runtime) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    nexora(&data, &runtime)
        .args(["config", "set", "locale", "fr"])
        .assert()
        .success();
    nexora(&data, &runtime)
        .args(["config", "set", "api_base_url", "https://nexora.test/api"])
        .assert()
        .success();

    nexora(&data, &runtime)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://nexora.test/api"))
        .stdout(predicate::str::contains("Locale:           fr"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let (data, runtime) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    nexora(&data, &runtime)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_dashboard_requires_login() {
    let (data, runtime) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    nexora(&data, &runtime)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nexora login"));
}

#[test]
fn test_status_without_session() {
    let (data, runtime) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    nexora(&data, &runtime)
        .arg("status")
        .assert()
        .success();
}

//! CLI options interaction tests
//!
//! These tests validate flag parsing, help output and exit codes of the
//! `dsb` binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

/// Command running in an empty directory with no `DSB_*` variables, so a
/// local `.env` or the caller's environment cannot leak in
fn create_test_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dsb").unwrap();
    cmd.current_dir(dir.path());
    for var in [
        "DSB_RESULTS_DIR",
        "DSB_DATA_SIZES",
        "DSB_DATA_STORES",
        "DSB_TESTS",
        "DSB_BASELINE",
        "DSB_ENABLE_COLOR",
        "DSB_LOG_LEVEL",
        "DSB_LOG_FORMAT",
        "FORCE_COLOR",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_no_operation_prints_help() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("--analyze"));
}

#[test]
fn test_clap_help_and_version() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--results-dir"));

    create_test_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_exits_with_usage_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_missing_flag_value_exits_with_usage_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir).args(["-a", "--sizes"]).assert().code(2);
}

#[test]
fn test_conflicting_color_flags() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["-a", "--color", "--no-color"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--color and --no-color"));
}

#[test]
fn test_help_topics() {
    let dir = TempDir::new().unwrap();
    for (topic, expected) in [
        ("layout", "<store>_<test>.csv"),
        ("env", "DSB_RESULTS_DIR"),
        ("examples", "EXAMPLES:"),
        ("about", "commit:"),
    ] {
        create_test_cmd(&dir)
            .args(["--no-color", "--help-topic", topic])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }

    create_test_cmd(&dir)
        .args(["--no-color", "--help-topic", "dns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown help topic: 'dns'"));
}

#[test]
fn test_invalid_size_is_config_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["-a", "--no-color", "-d", "ten"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_store_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["-a", "--no-color", "-e", "../etc"])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_env_value_is_config_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["-a", "--no-color"])
        .env("DSB_LOG_LEVEL", "chatty")
        .assert()
        .code(1);
}

#[test]
fn test_env_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("42")).unwrap();
    std::fs::write(dir.path().join("42").join("sqlite_count.csv"), "500\n").unwrap();
    std::fs::write(dir.path().join(".env"), "DSB_DATA_SIZES=42\nDSB_DATA_STORES=sqlite\nDSB_TESTS=count\n").unwrap();

    create_test_cmd(&dir)
        .args(["-a", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing size,42"))
        .stdout(predicate::str::contains("sqlite,count,20000000.0"));
}

#[test]
fn test_missing_results_dir_warns_but_succeeds() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["-a", "--no-color", "-d", "10", "-r", "does-not-exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing size,10"))
        .stderr(predicate::str::contains("Results directory 'does-not-exist' does not exist"));
}

#[test]
fn test_redirected_output_has_no_color_by_default() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("10")).unwrap();
    std::fs::write(dir.path().join("10").join("sqlite_count.csv"), "500\n").unwrap();
    std::fs::write(dir.path().join("10").join("realm_count.csv"), "0\n").unwrap();

    // neither --color nor --no-color: stdout and stderr are pipes here
    create_test_cmd(&dir)
        .args(["-a", "--table", "-d", "10", "-e", "sqlite,realm", "-t", "count", "-r", "missing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[WARNING] Results directory 'missing' does not exist"))
        .stderr(predicate::str::contains("\u{1b}").not())
        .stdout(predicate::str::contains("\u{1b}").not());

    create_test_cmd(&dir)
        .args(["-a", "-d", "10", "-e", "realm", "-t", "count"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No valid samples, row skipped"))
        .stderr(predicate::str::contains("\u{1b}").not());
}

#[test]
fn test_json_log_format() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("10")).unwrap();
    std::fs::write(dir.path().join("10").join("realm_count.csv"), "0\n-1\n").unwrap();

    let output = create_test_cmd(&dir)
        .args(["-a", "--no-color", "-d", "10", "-e", "realm", "-t", "count"])
        .env("DSB_LOG_FORMAT", "json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let entry: serde_json::Value = stderr
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .find(|entry: &serde_json::Value| entry["message"] == "No valid samples, row skipped")
        .unwrap();
    assert_eq!(entry["level"], "Warn");
    assert_eq!(entry["fields"]["store"], "realm");
    assert_eq!(entry["fields"]["bogus"], 2);
}

#[test]
fn test_invalid_log_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["-a", "--no-color"])
        .env("DSB_LOG_FORMAT", "xml")
        .assert()
        .code(1);
}

//! Tests for error handling and suggestions.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sprout(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sprout").unwrap();
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env("SPROUT_SOURCES__API_BASE", "http://127.0.0.1:9")
        .env("SPROUT_SOURCES__ARCHIVE_BASE", "http://127.0.0.1:9")
        .env("SPROUT_SOURCES__RAW_BASE", "http://127.0.0.1:9");
    cmd
}

#[test]
fn test_error_invalid_template_reference() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .args(["my-app", "--template=just-a-repo", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_error_missing_explicit_config() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .args(["--config", "does-not-exist.toml", "my-app", "--dry-run"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("config file not found"))
        .stderr(predicate::str::contains("sprout init"));
}

#[test]
fn test_error_invalid_endpoint_scheme() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .env("SPROUT_SOURCES__API_BASE", "ftp://example.com")
        .args(["my-app", "--dry-run"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ftp://example.com"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_error_conflicting_flags() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .args(["my-app", "--skip-install", "--no-commit"])
        .assert()
        .code(2);
}

#[test]
fn test_error_download_failure_suggests_network_check() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .args(["my-app", "--skip-install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check your network connection"));
}

#[test]
fn test_error_project_name_with_subcommand() {
    let temp = TempDir::new().unwrap();
    sprout(&temp)
        .args(["my-app", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined with a subcommand"));

    assert!(!temp.path().join("my-app").exists());
}

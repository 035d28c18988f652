//! CLI tests for the paths that never reach AWS.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("secrets-init").unwrap();
    // Keep the SDK away from any real credentials or metadata endpoints
    cmd.env("AWS_EC2_METADATA_DISABLED", "true")
        .env_remove("SECRETS_INIT_LOG");
    cmd
}

#[test]
fn test_no_arguments_is_a_noop() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets to be mounted, exiting"));
}

#[test]
fn test_empty_secret_list_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["", dir.path().to_str().unwrap(), "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets to be mounted"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_blank_entries_only_is_a_noop() {
    cmd()
        .arg(" , ,")
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets to be mounted"));
}

#[test]
fn test_secrets_without_directory_is_usage_error() {
    cmd()
        .arg("db/password")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("output directory"));
}

#[test]
fn test_secrets_without_format_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["db/password", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(2);

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_help_lists_positionals() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SECRETS"))
        .stdout(predicate::str::contains("OUTPUT_DIR"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_unresolvable_region_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["db/password", dir.path().to_str().unwrap(), "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("region"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_blank_region_override_falls_back_to_metadata() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["db/password", dir.path().to_str().unwrap(), "yaml", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("instance metadata"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

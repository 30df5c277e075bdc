//! CLI end-to-end tests that invoke the compiled `xpr` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use xpr_test_utils::TestRepo;

fn xpr() -> Command {
    Command::cargo_bin("xpr").expect("xpr binary builds")
}

#[test]
fn help_exits_zero_and_mentions_commands() {
    xpr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("checkin"))
        .stdout(predicate::str::contains("checkout"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn no_command_shows_hint() {
    xpr()
        .assert()
        .success()
        .stdout(predicate::str::contains("xpr --help"));
}

#[test]
fn list_shows_workspace_projects() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    xpr()
        .arg("list")
        .current_dir(repo.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("not checked in"));
}

#[test]
fn list_json_is_parseable() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    let output = xpr()
        .args(["list", "--json"])
        .current_dir(repo.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "demo");
    assert_eq!(parsed[0]["in_workspace"], true);
    assert_eq!(parsed[0]["checked_in"], false);
}

#[test]
fn checkin_without_config_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();

    xpr()
        .args(["checkin", "--skip-version-check"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("xpr.toml"));
}

#[test]
fn checkin_rejects_wrong_vivado_version() {
    let repo = TestRepo::with_config("[vivado]\nversion = \"2099.9\"\n");
    repo.add_project("demo");

    xpr()
        .arg("checkin")
        .current_dir(repo.root())
        .env("PATH", std::env::var("PATH").unwrap_or_default())
        .assert()
        .failure()
        .stderr(predicate::str::contains("2099.9"));
}

#[test]
fn completions_generate_for_bash() {
    xpr()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xpr"));
}

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("agent-relay")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("agent-relay")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-relay"));
}

#[test]
fn test_run_rejects_malformed_header() {
    Command::cargo_bin("agent-relay")
        .unwrap()
        .args(["run", "hello", "--header", "no-equals"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_run_requires_a_prompt() {
    Command::cargo_bin("agent-relay")
        .unwrap()
        .arg("run")
        .assert()
        .failure();
}

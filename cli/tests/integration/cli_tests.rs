//! Integration tests for the gonut CLI skeleton: help, version and list.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn gonut() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gonut"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    gonut().assert().code(2).stderr(predicate::str::contains(
        "Push sample apps to Cloud Foundry",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    gonut()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_command_shows_version() {
    gonut()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("gonut {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_flag_shows_version() {
    gonut()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    gonut()
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// --- list ---

#[test]
fn test_list_prints_catalog_in_order() {
    let output = gonut().arg("list").output().expect("run gonut list");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let order = [
        "golang",
        "python",
        "php",
        "staticfile",
        "swift",
        "nodejs",
        "ruby",
        "dotnet",
        "binary",
        "java",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|s| {
            stdout
                .find(&format!("  {s} "))
                .unwrap_or_else(|| panic!("{s} missing from:\n{stdout}"))
        })
        .collect();
    assert!(positions.is_sorted(), "catalog out of order:\n{stdout}");
}

#[test]
fn test_list_shows_aliases_and_buildpacks() {
    gonut()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(go)"))
        .stdout(predicate::str::contains("(node)"))
        .stdout(predicate::str::contains("[dotnet-core]"))
        .stdout(predicate::str::contains("[staticfile_buildpack]"));
}

#[test]
fn test_list_output_is_deterministic() {
    let first = gonut().arg("list").output().expect("first run");
    let second = gonut().arg("list").output().expect("second run");
    assert_eq!(first.stdout, second.stdout);
}

// --- environment switches ---

#[test]
fn test_numeric_no_color_is_accepted() {
    gonut()
        .arg("list")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("golang"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_empty_no_color_is_accepted() {
    gonut()
        .arg("version")
        .env("NO_COLOR", "")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gonut "));
}

// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use prdash::cli::global::GlobalOptions;
use prdash::cli::{ActionArg, Cli, Command};
use prdash::cmd::config::config_loader;
use std::path::PathBuf;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["prdash", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["prdash", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["prdash"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Fetch commands
// =============================================================================

#[test]
fn cli_issues_json() {
    let cli = Cli::try_parse_from(["prdash", "issues", "--json", "-n", "50"]).unwrap();
    let Some(Command::Issues(args)) = cli.command else {
        panic!("expected issues");
    };
    assert!(args.json);
    assert_eq!(args.limit, Some(50));
    assert!(args.query.is_empty());
}

#[test]
fn cli_pr_requires_url() {
    assert!(Cli::try_parse_from(["prdash", "pr"]).is_err());
    let cli = Cli::try_parse_from(["prdash", "pr", "https://github.com/acme/core/pull/7"]).unwrap();
    let Some(Command::Pr(args)) = cli.command else {
        panic!("expected pr");
    };
    assert_eq!(args.url, "https://github.com/acme/core/pull/7");
}

#[test]
fn cli_detect() {
    let cli = Cli::try_parse_from(["prdash", "detect", "git@github.com:acme/core.git"]).unwrap();
    let Some(Command::Detect(args)) = cli.command else {
        panic!("expected detect");
    };
    assert_eq!(args.url, "git@github.com:acme/core.git");
}

// =============================================================================
// Command builder
// =============================================================================

#[test]
fn cli_command_defaults_to_print() {
    let cli = Cli::try_parse_from(["prdash", "command", "checkout", "7", "acme/core"]).unwrap();
    let Some(Command::Command(args)) = cli.command else {
        panic!("expected command");
    };
    assert_eq!(args.action, ActionArg::Checkout);
    assert!(!args.run);
}

#[test]
fn cli_command_rejects_non_numeric_pr() {
    assert!(Cli::try_parse_from(["prdash", "command", "merge", "abc", "acme/core"]).is_err());
}

// =============================================================================
// Config loading from global options
// =============================================================================

#[test]
fn cli_ini_files_load_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    std::fs::write(&first, "[global]\nlimit = 5\n").unwrap();
    std::fs::write(&second, "[global]\nlimit = 7\n").unwrap();

    let global = GlobalOptions {
        inis: vec![first, second],
        no_default_inis: true,
        ..GlobalOptions::default()
    };
    let config = config_loader(&global).unwrap().build().unwrap();
    assert_eq!(config.global.limit, 7);
}

#[test]
fn cli_missing_ini_is_error() {
    let global = GlobalOptions {
        inis: vec![PathBuf::from("/nonexistent/prdash/extra.toml")],
        no_default_inis: true,
        ..GlobalOptions::default()
    };
    assert!(config_loader(&global).unwrap().build().is_err());
}

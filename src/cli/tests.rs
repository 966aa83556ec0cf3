// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{ActionArg, Cli, Command};
use crate::config::loader::ConfigLoader;
use crate::logging::LogLevel;
use crate::provider::PrAction;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["prdash", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "prdash", "-l", "4", "-C", "/src/core", "-i", "a.toml", "-i", "b.toml", "info",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.repo_path(), Path::new("/src/core"));
    assert_eq!(
        cli.global.inis,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(matches!(cli.command, Some(Command::Info)));
}

#[test]
fn test_repo_path_defaults_to_current_dir() {
    let cli = Cli::try_parse_from(["prdash", "info"]).unwrap();
    assert_eq!(cli.global.repo_path(), Path::new("."));
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(Cli::try_parse_from(["prdash", "-l", "7", "info"]).is_err());
}

#[test]
fn test_parse_prs() {
    let cli = Cli::try_parse_from([
        "prdash", "prs", "author:@me", "label:bug", "--limit", "5", "--after", "Y3Vyc29y",
    ])
    .unwrap();
    let Some(Command::Prs(args)) = cli.command else {
        panic!("expected prs");
    };
    assert_eq!(args.query_string(), "author:@me label:bug");
    assert_eq!(args.limit, Some(5));
    assert_eq!(args.after.as_deref(), Some("Y3Vyc29y"));
    assert!(!args.json);
}

#[test]
fn test_parse_issues_zero_limit_rejected() {
    assert!(Cli::try_parse_from(["prdash", "issues", "--limit", "0"]).is_err());
}

#[test]
fn test_parse_command() {
    let cli = Cli::try_parse_from([
        "prdash",
        "command",
        "watch-checks",
        "42",
        "acme/core",
        "--run",
    ])
    .unwrap();
    let Some(Command::Command(args)) = cli.command else {
        panic!("expected command");
    };
    assert_eq!(args.action, ActionArg::WatchChecks);
    assert_eq!(PrAction::from(args.action), PrAction::WatchChecks);
    assert_eq!(args.number, 42);
    assert_eq!(args.repo, "acme/core");
    assert!(args.run);
}

#[test]
fn test_action_names_match_pr_actions() {
    let names: Vec<String> = ActionArg::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect();
    let expected: Vec<String> = PrAction::ALL.iter().map(|a| a.as_str().to_string()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_unknown_action_rejected() {
    assert!(Cli::try_parse_from(["prdash", "command", "rebase", "1", "acme/core"]).is_err());
}

#[test]
fn test_overrides_applied_over_files() {
    let cli = Cli::try_parse_from([
        "prdash",
        "-l",
        "3",
        "--log-file",
        "/tmp/prdash.log",
        "options",
    ])
    .unwrap();
    let loader = ConfigLoader::new().add_toml_str("[global]\noutput_log_level = 1\n");
    let config = cli.global.apply_overrides(loader).unwrap().build().unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    // file level follows --log-level when not given
    assert_eq!(config.global.file_log_level, LogLevel::INFO);
    assert_eq!(
        config.global.log_file,
        Some(PathBuf::from("/tmp/prdash.log"))
    );
}

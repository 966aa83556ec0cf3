// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(6).ok(), Some(LogLevel::DUMP));
    assert!(LogLevel::new(7).is_err());
}

#[test]
fn test_filter_scopes_debug_to_crate() {
    let filters: Vec<_> = (0..=6)
        .filter_map(|level| LogLevel::new(level).ok())
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_snapshot!(filters.join(" | "), @"off | error | warn | info | warn,prdash=debug | warn,prdash=trace | trace");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: Result<LogLevel, _> = serde_json::from_str("4");
    let err: Result<LogLevel, _> = serde_json::from_str("9");
    assert_eq!(ok.ok(), Some(LogLevel::DEBUG));
    assert!(err.is_err());
}

#[test]
fn test_log_config_keeps_file_path() {
    let config = LogConfig::builder()
        .with_file_level(LogLevel::DEBUG)
        .with_log_file("logs/prdash.log".into())
        .build();
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(
        config.log_file().map(|p| p.display().to_string()),
        Some("logs/prdash.log".to_string())
    );
}

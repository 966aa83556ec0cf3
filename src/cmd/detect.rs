// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `detect`: classify a remote URL without touching the network.

use crate::cli::DetectArgs;
use crate::provider::detection::{RemoteInfo, parse_git_remote_url};

use super::aligned;

/// Lines describing what `url` resolves to.
#[must_use]
pub fn format_remote_info(info: &RemoteInfo) -> Vec<String> {
    let mut pairs = vec![
        ("provider", info.provider.to_string()),
        ("organization", info.organization.clone()),
        ("project", info.project.clone()),
        ("repository", info.repository.clone()),
        ("base_url", info.base_url.clone()),
    ];
    if info.is_unknown() {
        pairs.push(("note", "unrecognised remote, defaulting to github".to_string()));
    } else {
        pairs.push(("name", info.name_with_owner()));
    }
    aligned(&pairs)
}

pub fn run_detect_command(args: &DetectArgs) {
    for line in format_remote_info(&parse_git_remote_url(&args.url)) {
        println!("{line}");
    }
}

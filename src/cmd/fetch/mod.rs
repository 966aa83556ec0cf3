// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only commands: `info`, `prs`, `issues`, `pr`.
//!
//! ```text
//! ListArgs --> ProviderSession::fetch_* --> render_* --> stdout
//!                (provider or legacy)        text | JSON
//! ```


use anyhow::Context;
use serde::Serialize;

use crate::cli::{ListArgs, PrArgs};
use crate::config::Config;
use crate::data::integration::ProviderSession;
use crate::data::{Issue, IssuesResponse, PageInfo, PullRequest, PullRequestsResponse};
use crate::error::Result;
use crate::provider::{AuthInfo, ProviderConfig, ProviderType};

use super::aligned;

/// Run `info`.
///
/// # Errors
///
/// Returns `NotInitialized` when no provider could be set up, or the
/// provider's error when the auth query fails.
pub async fn run_info_command(session: &ProviderSession) -> Result<()> {
    let (provider_type, auth) = session.provider_info().await?;
    let config = session.current_config();
    for line in render_info(provider_type, config.as_ref(), &auth) {
        println!("{line}");
    }
    Ok(())
}

/// Run `prs`.
///
/// # Errors
///
/// Returns the fetch error, or a serialization error with `--json`.
pub async fn run_prs_command(
    args: &ListArgs,
    config: &Config,
    session: &ProviderSession,
) -> Result<()> {
    let page = args.after.as_deref().map(PageInfo::after);
    let limit = args.limit.unwrap_or(config.global.limit);
    let response = session
        .fetch_pull_requests(&args.query_string(), limit, page.as_ref())
        .await?;
    if args.json {
        println!("{}", to_json(&response)?);
    } else {
        for line in render_pull_requests(&response) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Run `issues`.
///
/// # Errors
///
/// Returns the fetch error, or a serialization error with `--json`.
pub async fn run_issues_command(
    args: &ListArgs,
    config: &Config,
    session: &ProviderSession,
) -> Result<()> {
    let page = args.after.as_deref().map(PageInfo::after);
    let limit = args.limit.unwrap_or(config.global.limit);
    let response = session
        .fetch_issues(&args.query_string(), limit, page.as_ref())
        .await?;
    if args.json {
        println!("{}", to_json(&response)?);
    } else {
        for line in render_issues(&response) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Run `pr`.
///
/// # Errors
///
/// Returns the fetch error, or a serialization error with `--json`.
pub async fn run_pr_command(args: &PrArgs, session: &ProviderSession) -> Result<()> {
    let pr = session.fetch_pull_request(&args.url).await?;
    if args.json {
        println!("{}", to_json(&pr)?);
    } else {
        for line in render_pull_request(&pr) {
            println!("{line}");
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize response")
}

#[must_use]
pub fn render_info(
    provider_type: ProviderType,
    config: Option<&ProviderConfig>,
    auth: &AuthInfo,
) -> Vec<String> {
    let mut pairs = vec![("provider", provider_type.to_string())];
    if let Some(config) = config {
        pairs.push(("organization", config.organization.clone()));
        pairs.push(("project", config.project.clone()));
        pairs.push(("base_url", config.base_url.clone()));
    }
    pairs.push(("user", auth.username.clone()));
    pairs.push(("logged_in", auth.is_logged_in.to_string()));
    pairs.push(("token_source", auth.token_source.clone()));
    aligned(&pairs)
}

fn pr_line(pr: &PullRequest) -> String {
    let checks = pr.checks.map_or("-", |checks| checks.as_str());
    let draft = if pr.is_draft { " [draft]" } else { "" };
    format!(
        "{repo} #{number} {state} {checks} {title}{draft} (@{author})",
        repo = pr.repository.name_with_owner,
        number = pr.number,
        state = pr.state,
        title = pr.title,
        author = pr.author,
    )
}

fn issue_line(issue: &Issue) -> String {
    format!(
        "{repo} #{number} {state} {title} (@{author})",
        repo = issue.repository.name_with_owner,
        number = issue.number,
        state = issue.state,
        title = issue.title,
        author = issue.author,
    )
}

fn page_footer(shown: usize, total: u32, page: &PageInfo) -> String {
    let counted = if total == 0 {
        format!("{shown} shown")
    } else {
        format!("{shown} of {total} shown")
    };
    match page.cursor() {
        Some(cursor) if page.has_next_page => format!("{counted}, next page: --after {cursor}"),
        _ => counted,
    }
}

#[must_use]
pub fn render_pull_requests(response: &PullRequestsResponse) -> Vec<String> {
    let mut lines: Vec<String> = response.prs.iter().map(pr_line).collect();
    lines.push(page_footer(
        response.prs.len(),
        response.total_count,
        &response.page_info,
    ));
    lines
}

#[must_use]
pub fn render_issues(response: &IssuesResponse) -> Vec<String> {
    let mut lines: Vec<String> = response.issues.iter().map(issue_line).collect();
    lines.push(page_footer(
        response.issues.len(),
        response.total_count,
        &response.page_info,
    ));
    lines
}

#[must_use]
pub fn render_pull_request(pr: &PullRequest) -> Vec<String> {
    aligned(&[
        ("title", pr.title.clone()),
        ("url", pr.url.clone()),
        ("state", pr.state.to_string()),
        ("author", pr.author.clone()),
        ("branch", format!("{} -> {}", pr.head_ref_name, pr.base_ref_name)),
        ("changes", format!("+{} -{}", pr.additions, pr.deletions)),
        ("review", pr.review_decision.clone()),
        (
            "checks",
            pr.checks
                .map_or_else(|| "-".to_string(), |checks| checks.as_str().to_string()),
        ),
        ("updated", pr.updated_at.to_rfc3339()),
    ])
}

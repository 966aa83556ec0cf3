// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical pull request and issue records.
//!
//! ```text
//!  provider::types (raw strings, per platform)
//!            |
//!            | From<PullRequestData> / From<IssueData>
//!            v
//!  PullRequest / Issue (typed states, flattened counts)
//!            ^
//!            | legacy::LegacyGitHub (direct GraphQL)
//! ```
//!
//! Conversion is total: absent data becomes an empty, zero or default value.

pub mod integration;
pub mod legacy;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::provider::types::{
    ChangedFile, CheckContext, Comment, IssueData, IssuesResponse as NativeIssues, Label,
    PullRequestData, PullRequestsResponse as NativePullRequests, Review,
};

pub use crate::provider::types::{PageInfo, Repository};

/// Pull request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    #[default]
    Open,
    Closed,
    Merged,
}

impl PrState {
    /// Parse a platform state; anything unrecognised is open.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "merged" => Self::Merged,
            "closed" => Self::Closed,
            _ => Self::Open,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Merged => "merged",
        }
    }
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("closed") {
            Self::Closed
        } else {
            Self::Open
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GitHub's `mergeStateStatus`; platforms without it report `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeStateStatus {
    Behind,
    Blocked,
    Clean,
    Dirty,
    Draft,
    HasHooks,
    #[default]
    Unknown,
    Unstable,
}

impl MergeStateStatus {
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "BEHIND" => Self::Behind,
            "BLOCKED" => Self::Blocked,
            "CLEAN" => Self::Clean,
            "DIRTY" => Self::Dirty,
            "DRAFT" => Self::Draft,
            "HAS_HOOKS" => Self::HasHooks,
            "UNSTABLE" => Self::Unstable,
            _ => Self::Unknown,
        }
    }
}

/// Combined outcome of the last commit's checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksRollup {
    Success,
    Failure,
    Pending,
}

const FAILED_CONCLUSIONS: [&str; 5] = [
    "FAILURE",
    "TIMED_OUT",
    "CANCELLED",
    "ACTION_REQUIRED",
    "STARTUP_FAILURE",
];

impl ChecksRollup {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Pending => "pending",
        }
    }

    /// Fold check contexts; `None` when there are no checks.
    ///
    /// Any failure wins over pending, pending wins over success.
    #[must_use]
    pub fn from_contexts(contexts: &[CheckContext]) -> Option<Self> {
        let mut rollup = None;
        for context in contexts {
            let outcome = match context {
                CheckContext::CheckRun(run) => {
                    if FAILED_CONCLUSIONS.contains(&run.conclusion.as_str()) {
                        Self::Failure
                    } else if run.status != "COMPLETED" {
                        Self::Pending
                    } else {
                        Self::Success
                    }
                }
                CheckContext::StatusContext(status) => match status.state.as_str() {
                    "FAILURE" | "ERROR" => Self::Failure,
                    "PENDING" | "EXPECTED" => Self::Pending,
                    _ => Self::Success,
                },
                CheckContext::Unknown => continue,
            };
            rollup = Some(match (rollup, outcome) {
                (Some(Self::Failure), _) | (_, Self::Failure) => Self::Failure,
                (Some(Self::Pending), _) | (_, Self::Pending) => Self::Pending,
                _ => Self::Success,
            });
        }
        rollup
    }
}

/// Platform-neutral pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub author_association: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub state: PrState,
    pub is_draft: bool,
    pub mergeable: String,
    pub review_decision: String,
    pub additions: u32,
    pub deletions: u32,
    pub head_ref_name: String,
    pub base_ref_name: String,
    pub head_repository: String,
    pub repository: Repository,
    pub assignees: Vec<String>,
    pub comment_count: u32,
    pub comments: Vec<Comment>,
    pub review_count: u32,
    pub reviews: Vec<Review>,
    pub review_request_count: u32,
    pub changed_file_count: u32,
    pub files: Vec<ChangedFile>,
    pub labels: Vec<Label>,
    pub checks: Option<ChecksRollup>,
    pub merge_state_status: MergeStateStatus,
}

impl From<PullRequestData> for PullRequest {
    fn from(pr: PullRequestData) -> Self {
        let checks = ChecksRollup::from_contexts(pr.commits.last_contexts());
        Self {
            number: pr.number,
            title: pr.title,
            body: pr.body,
            author: pr.author.login,
            author_association: pr.author_association,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            url: pr.url,
            state: PrState::from_raw(&pr.state),
            is_draft: pr.is_draft,
            mergeable: pr.mergeable,
            review_decision: pr.review_decision,
            additions: pr.additions,
            deletions: pr.deletions,
            head_ref_name: pr.head_ref_name,
            base_ref_name: pr.base_ref_name,
            head_repository: pr.head_repository.name,
            repository: pr.repository,
            assignees: pr.assignees.nodes.into_iter().map(|a| a.login).collect(),
            comment_count: pr.comments.total_count,
            comments: pr.comments.nodes,
            review_count: pr.reviews.total_count,
            reviews: pr.reviews.nodes,
            review_request_count: pr.review_requests.total_count,
            changed_file_count: pr.files.total_count,
            files: pr.files.nodes,
            labels: pr.labels.nodes,
            checks,
            merge_state_status: MergeStateStatus::from_raw(&pr.merge_state_status),
        }
    }
}

/// Platform-neutral issue (work item on Azure DevOps).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: IssueState,
    pub author: String,
    pub author_association: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub repository: Repository,
    pub assignees: Vec<String>,
    pub comment_count: u32,
    pub comments: Vec<Comment>,
    pub reaction_count: u32,
    pub labels: Vec<Label>,
}

impl From<IssueData> for Issue {
    fn from(issue: IssueData) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body,
            state: IssueState::from_raw(&issue.state),
            author: issue.author.login,
            author_association: issue.author_association,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            url: issue.url,
            repository: issue.repository,
            assignees: issue.assignees.nodes.into_iter().map(|a| a.login).collect(),
            comment_count: issue.comments.total_count,
            comments: issue.comments.nodes,
            reaction_count: issue.reactions.total_count,
            labels: issue.labels.nodes,
        }
    }
}

/// One page of canonical pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullRequestsResponse {
    pub prs: Vec<PullRequest>,
    pub total_count: u32,
    pub page_info: PageInfo,
}

impl From<NativePullRequests> for PullRequestsResponse {
    fn from(response: NativePullRequests) -> Self {
        Self {
            prs: response.prs.into_iter().map(PullRequest::from).collect(),
            total_count: response.total_count,
            page_info: response.page_info,
        }
    }
}

/// One page of canonical issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssuesResponse {
    pub issues: Vec<Issue>,
    pub total_count: u32,
    pub page_info: PageInfo,
}

impl From<NativeIssues> for IssuesResponse {
    fn from(response: NativeIssues) -> Self {
        Self {
            issues: response.issues.into_iter().map(Issue::from).collect(),
            total_count: response.total_count,
            page_info: response.page_info,
        }
    }
}

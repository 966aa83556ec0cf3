// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider-native records.
//!
//! Field names follow the GitHub GraphQL schema (camelCase on the wire) so the
//! GitHub provider can deserialize responses directly. The Azure DevOps
//! provider fills the same shapes by conversion. State fields hold the raw
//! platform string; typed states live in [`crate::data`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as `T::default()`.
///
/// GraphQL marks many fields nullable (deleted authors, missing rollups).
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Actor {
    #[serde(deserialize_with = "null_default")]
    pub login: String,
}

impl Actor {
    #[must_use]
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    pub name: String,
    pub name_with_owner: String,
    pub is_archived: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignees {
    pub nodes: Vec<Actor>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    #[serde(deserialize_with = "null_default")]
    pub author: Actor,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comments {
    pub nodes: Vec<Comment>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    #[serde(deserialize_with = "null_default")]
    pub author: Actor,
    pub body: String,
    pub state: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reviews {
    pub total_count: u32,
    pub nodes: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewRequest {
    pub as_code_owner: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewRequests {
    pub total_count: u32,
    pub nodes: Vec<ReviewRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangedFile {
    pub additions: u32,
    pub deletions: u32,
    pub path: String,
    pub change_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangedFiles {
    pub total_count: u32,
    pub nodes: Vec<ChangedFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckRun {
    pub name: String,
    pub status: String,
    #[serde(deserialize_with = "null_default")]
    pub conclusion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusContext {
    pub context: String,
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub creator: Actor,
}

/// One entry of a commit's status-check rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum CheckContext {
    CheckRun(CheckRun),
    StatusContext(StatusContext),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckContexts {
    pub total_count: u32,
    pub nodes: Vec<CheckContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCheckRollup {
    pub contexts: CheckContexts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Commit {
    #[serde(deserialize_with = "null_default")]
    pub status_check_rollup: StatusCheckRollup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitNode {
    pub commit: Commit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Commits {
    pub nodes: Vec<CommitNode>,
    pub total_count: u32,
}

impl Commits {
    /// Check contexts of the most recent commit, if any.
    #[must_use]
    pub fn last_contexts(&self) -> &[CheckContext] {
        self.nodes
            .last()
            .map_or(&[], |node| &node.commit.status_check_rollup.contexts.nodes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Label {
    pub color: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub nodes: Vec<Label>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reactions {
    pub total_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamedRef {
    pub name: String,
}

/// Forward-only pagination cursor plus a has-more flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(deserialize_with = "null_default")]
    pub start_cursor: String,
    #[serde(deserialize_with = "null_default")]
    pub end_cursor: String,
}

impl PageInfo {
    /// Page info asking for the page after `cursor`.
    #[must_use]
    pub fn after(cursor: impl Into<String>) -> Self {
        Self {
            has_next_page: true,
            start_cursor: String::new(),
            end_cursor: cursor.into(),
        }
    }

    /// The cursor to resume from, if one was handed back.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        (!self.end_cursor.is_empty()).then_some(self.end_cursor.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequestData {
    pub number: u64,
    pub title: String,
    pub body: String,
    #[serde(deserialize_with = "null_default")]
    pub author: Actor,
    pub author_association: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub state: String,
    pub mergeable: String,
    #[serde(deserialize_with = "null_default")]
    pub review_decision: String,
    pub additions: u32,
    pub deletions: u32,
    pub head_ref_name: String,
    pub base_ref_name: String,
    #[serde(deserialize_with = "null_default")]
    pub head_repository: NamedRef,
    pub repository: Repository,
    pub assignees: Assignees,
    pub comments: Comments,
    pub reviews: Reviews,
    pub review_requests: ReviewRequests,
    #[serde(deserialize_with = "null_default")]
    pub files: ChangedFiles,
    pub is_draft: bool,
    pub commits: Commits,
    #[serde(deserialize_with = "null_default")]
    pub labels: Labels,
    pub merge_state_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueData {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub author: Actor,
    pub author_association: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub repository: Repository,
    pub assignees: Assignees,
    pub comments: Comments,
    pub reactions: Reactions,
    #[serde(deserialize_with = "null_default")]
    pub labels: Labels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestsResponse {
    pub prs: Vec<PullRequestData>,
    pub total_count: u32,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesResponse {
    pub issues: Vec<IssueData>,
    /// Matches across all pages; 0 when the backend cannot tell.
    pub total_count: u32,
    pub page_info: PageInfo,
}

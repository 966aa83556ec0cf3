// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Azure DevOps REST payloads and their conversion to provider records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::provider::types::{
    Actor, Assignees, Comments, IssueData, Label, Labels, NamedRef, PullRequestData, Repository,
    Review, ReviewRequests, Reviews, null_default,
};

/// Work-item states treated as closed.
pub const CLOSED_WORK_ITEM_STATES: [&str; 4] = ["Closed", "Done", "Removed", "Resolved"];

const HEADS_PREFIX: &str = "refs/heads/";

/// Azure's fixed association; it has no GitHub-style author roles.
const AUTHOR_ASSOCIATION: &str = "MEMBER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityRef {
    pub display_name: String,
    pub unique_name: String,
}

/// Work-item identity fields: an object on current API versions, a
/// `"Name <email>"` string on older servers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdentityField {
    Identity(IdentityRef),
    Plain(String),
}

impl Default for IdentityField {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl IdentityField {
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Identity(identity) => &identity.display_name,
            Self::Plain(raw) => raw.split(" <").next().unwrap_or(raw).trim(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureProjectRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureRepository {
    pub name: String,
    pub web_url: String,
    pub project: AzureProjectRef,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureReviewer {
    pub display_name: String,
    pub unique_name: String,
    /// 10 approved, 5 approved with suggestions, 0 none, -5 waiting, -10 rejected.
    pub vote: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureLabel {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzurePullRequest {
    pub pull_request_id: u64,
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    pub status: String,
    pub created_by: IdentityRef,
    pub creation_date: DateTime<Utc>,
    pub closed_date: Option<DateTime<Utc>>,
    pub source_ref_name: String,
    pub target_ref_name: String,
    pub is_draft: bool,
    pub merge_status: String,
    pub repository: AzureRepository,
    pub reviewers: Vec<AzureReviewer>,
    #[serde(deserialize_with = "null_default")]
    pub labels: Vec<AzureLabel>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureList<T> {
    pub value: Vec<T>,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkItemFields {
    #[serde(rename = "System.Title")]
    pub title: String,
    #[serde(rename = "System.State")]
    pub state: String,
    #[serde(rename = "System.WorkItemType")]
    pub work_item_type: String,
    #[serde(rename = "System.CreatedBy")]
    pub created_by: IdentityField,
    #[serde(rename = "System.AssignedTo")]
    pub assigned_to: Option<IdentityField>,
    #[serde(rename = "System.CreatedDate")]
    pub created_date: DateTime<Utc>,
    #[serde(rename = "System.ChangedDate")]
    pub changed_date: DateTime<Utc>,
    #[serde(rename = "System.Description", deserialize_with = "null_default")]
    pub description: String,
    #[serde(rename = "System.Tags", deserialize_with = "null_default")]
    pub tags: String,
    #[serde(rename = "System.CommentCount")]
    pub comment_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AzureWorkItem {
    pub id: u64,
    pub fields: WorkItemFields,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkItemRef {
    pub id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WiqlResult {
    pub work_items: Vec<WorkItemRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticatedUser {
    pub provider_display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionData {
    pub authenticated_user: AuthenticatedUser,
}

/// Map an Azure pull request status onto the canonical vocabulary.
#[must_use]
pub fn normalize_pr_status(status: &str) -> &'static str {
    match status {
        "completed" => "merged",
        "abandoned" => "closed",
        _ => "open",
    }
}

/// Map a work-item state onto the issue vocabulary.
#[must_use]
pub fn normalize_work_item_state(state: &str) -> &'static str {
    if CLOSED_WORK_ITEM_STATES
        .iter()
        .any(|closed| closed.eq_ignore_ascii_case(state))
    {
        "closed"
    } else {
        "open"
    }
}

fn strip_heads(reference: &str) -> String {
    reference
        .strip_prefix(HEADS_PREFIX)
        .unwrap_or(reference)
        .to_string()
}

fn mergeable(merge_status: &str) -> &'static str {
    match merge_status {
        "succeeded" => "MERGEABLE",
        "conflicts" => "CONFLICTING",
        _ => "UNKNOWN",
    }
}

/// Summarise reviewer votes the way GitHub reports a review decision.
fn review_decision(reviewers: &[AzureReviewer]) -> &'static str {
    if reviewers.iter().any(|r| r.vote <= -10) {
        "CHANGES_REQUESTED"
    } else if reviewers.iter().any(|r| r.vote >= 5) {
        "APPROVED"
    } else if reviewers.is_empty() {
        ""
    } else {
        "REVIEW_REQUIRED"
    }
}

fn vote_state(vote: i32) -> &'static str {
    match vote {
        10 | 5 => "APPROVED",
        -10 => "CHANGES_REQUESTED",
        -5 => "PENDING",
        _ => "COMMENTED",
    }
}

/// Convert one Azure pull request. Fields Azure does not report (line
/// counts, files, checks) stay at their defaults.
#[must_use]
pub fn convert_pull_request(pr: AzurePullRequest) -> PullRequestData {
    let repo = pr.repository;
    let url = if repo.web_url.is_empty() {
        pr.url
    } else {
        format!("{}/pullrequest/{}", repo.web_url, pr.pull_request_id)
    };
    let voted: Vec<Review> = pr
        .reviewers
        .iter()
        .filter(|r| r.vote != 0)
        .map(|r| Review {
            author: Actor::new(r.display_name.clone()),
            state: vote_state(r.vote).to_string(),
            ..Review::default()
        })
        .collect();

    PullRequestData {
        number: pr.pull_request_id,
        title: pr.title,
        body: pr.description,
        author: Actor::new(pr.created_by.display_name),
        author_association: AUTHOR_ASSOCIATION.to_string(),
        updated_at: pr.closed_date.unwrap_or(pr.creation_date),
        created_at: pr.creation_date,
        url,
        state: normalize_pr_status(&pr.status).to_string(),
        mergeable: mergeable(&pr.merge_status).to_string(),
        review_decision: review_decision(&pr.reviewers).to_string(),
        head_ref_name: strip_heads(&pr.source_ref_name),
        base_ref_name: strip_heads(&pr.target_ref_name),
        head_repository: NamedRef {
            name: repo.name.clone(),
        },
        repository: Repository {
            name_with_owner: format!("{}/{}", repo.project.name, repo.name),
            name: repo.name,
            is_archived: false,
        },
        reviews: Reviews {
            total_count: u32::try_from(voted.len()).unwrap_or(u32::MAX),
            nodes: voted,
        },
        review_requests: ReviewRequests {
            total_count: u32::try_from(pr.reviewers.len()).unwrap_or(u32::MAX),
            nodes: Vec::new(),
        },
        is_draft: pr.is_draft,
        labels: Labels {
            nodes: pr
                .labels
                .into_iter()
                .map(|label| Label {
                    name: label.name,
                    color: String::new(),
                })
                .collect(),
        },
        ..PullRequestData::default()
    }
}

/// Convert one work item into an issue record.
///
/// `web_base` is `{base}/{org}/{project}`; work items carry only an API URL.
#[must_use]
pub fn convert_work_item(
    item: AzureWorkItem,
    web_base: &str,
    org: &str,
    project: &str,
) -> IssueData {
    let fields = item.fields;
    let assignees: Vec<Actor> = fields
        .assigned_to
        .iter()
        .map(|identity| Actor::new(identity.display_name()))
        .collect();
    let labels = fields
        .tags
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| Label {
            name: tag.to_string(),
            color: String::new(),
        })
        .collect();

    IssueData {
        number: item.id,
        title: fields.title,
        body: fields.description,
        state: normalize_work_item_state(&fields.state).to_string(),
        author: Actor::new(fields.created_by.display_name()),
        author_association: AUTHOR_ASSOCIATION.to_string(),
        updated_at: fields.changed_date,
        created_at: fields.created_date,
        url: format!("{web_base}/_workitems/edit/{}", item.id),
        repository: Repository {
            name: project.to_string(),
            name_with_owner: format!("{org}/{project}"),
            is_archived: false,
        },
        assignees: Assignees {
            total_count: u32::try_from(assignees.len()).unwrap_or(u32::MAX),
            nodes: assignees,
        },
        comments: Comments {
            nodes: Vec::new(),
            total_count: fields.comment_count,
        },
        labels: Labels { nodes: labels },
        ..IssueData::default()
    }
}

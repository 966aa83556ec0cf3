// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub GraphQL client.
//!
//! Shared by [`super::GitHubProvider`] and the legacy GitHub backend; both
//! search with `search(type: ISSUE, ...)` and page with `endCursor`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{DashResult, NetworkError};
use crate::net::{decode_json, fetch_text, global_client, join_url};
use crate::provider::detection::GITHUB_BASE_URL;
use crate::provider::types::{
    IssueData, IssuesResponse, PageInfo, PullRequestData, PullRequestsResponse, null_default,
};

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Largest page the search API serves.
pub const MAX_PAGE_SIZE: u32 = 100;

const PR_FIELDS: &str = "
    number title body
    author { login } authorAssociation
    updatedAt createdAt url state mergeable reviewDecision
    additions deletions headRefName baseRefName
    headRepository { name }
    repository { name nameWithOwner isArchived }
    assignees(first: 3) { nodes { login } totalCount }
    comments(last: 5) { totalCount nodes { author { login } body updatedAt } }
    reviews(last: 3) { totalCount nodes { author { login } body state updatedAt } }
    reviewRequests(first: 10) { totalCount nodes { asCodeOwner } }
    files(first: 100) { totalCount nodes { additions deletions path changeType } }
    isDraft
    commits(last: 1) {
      totalCount
      nodes { commit { statusCheckRollup { contexts(last: 20) {
        totalCount
        nodes {
          __typename
          ... on CheckRun { name status conclusion }
          ... on StatusContext { context state creator { login } }
        }
      } } } }
    }
    labels(first: 20) { nodes { color name } }
    mergeStateStatus
";

const ISSUE_FIELDS: &str = "
    number title body state
    author { login } authorAssociation
    updatedAt createdAt url
    repository { name nameWithOwner isArchived }
    assignees(first: 3) { nodes { login } totalCount }
    comments(last: 5) { totalCount nodes { author { login } body updatedAt } }
    reactions(first: 1) { totalCount }
    labels(first: 20) { nodes { color name } }
";

const VIEWER_QUERY: &str = "query Viewer { viewer { login } }";

/// The GraphQL endpoint for a configured base URL.
///
/// Empty or `https://github.com` means github.com; anything else is treated as
/// a GitHub Enterprise host serving `/api/graphql`.
#[must_use]
pub fn graphql_endpoint(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() || base == GITHUB_BASE_URL {
        GITHUB_GRAPHQL_URL.to_string()
    } else {
        join_url(base, "api/graphql")
    }
}

/// `is:pr <query> sort:updated` with surrounding whitespace collapsed.
#[must_use]
pub fn search_string(kind: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        format!("is:{kind} sort:updated")
    } else {
        format!("is:{kind} {query} sort:updated")
    }
}

fn search_document(operation: &str, fragment: &str, fields: &str) -> String {
    format!(
        "query {operation}($query: String!, $limit: Int!, $endCursor: String) {{
  search(type: ISSUE, first: $limit, after: $endCursor, query: $query) {{
    issueCount
    pageInfo {{ hasNextPage startCursor endCursor }}
    nodes {{ ... on {fragment} {{ {fields} }} }}
  }}
}}"
    )
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope<T> {
    data: Option<T>,
    #[serde(default, deserialize_with = "null_default")]
    errors: Vec<GraphQlMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData<T> {
    search: SearchConnection<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchConnection<T> {
    issue_count: u32,
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ResourceData {
    resource: Option<PullRequestData>,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: String,
}

/// Thin GraphQL client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    endpoint: String,
}

impl GraphQlClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: graphql_endpoint(base_url),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one GraphQL document.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::HttpError` for non-200 responses,
    /// `NetworkError::GraphQl` when the response carries an `errors` array, and
    /// `NetworkError::Decode` when `data` does not match `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        token: &str,
        document: &str,
        variables: Value,
    ) -> DashResult<T> {
        let request = global_client()
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&json!({ "query": document, "variables": variables }));
        let body = fetch_text(request, &self.endpoint).await?;
        let envelope: GraphQlEnvelope<T> = decode_json(&body, &self.endpoint)?;

        if !envelope.errors.is_empty() {
            return Err(NetworkError::GraphQl {
                messages: envelope.errors.into_iter().map(|e| e.message).collect(),
            }
            .into());
        }
        envelope.data.ok_or_else(|| {
            NetworkError::Decode {
                url: self.endpoint.clone(),
                message: "response carried neither data nor errors".to_string(),
            }
            .into()
        })
    }

    async fn search<T: DeserializeOwned>(
        &self,
        token: &str,
        document: &str,
        search: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<SearchConnection<T>> {
        let variables = json!({
            "query": search,
            "limit": limit.clamp(1, MAX_PAGE_SIZE),
            "endCursor": page_info.and_then(PageInfo::cursor),
        });
        debug!(search, limit, endpoint = %self.endpoint, "github search");
        let data: SearchData<T> = self.execute(token, document, variables).await?;
        Ok(data.search)
    }

    /// Search pull requests; archived repositories are skipped.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn search_pull_requests(
        &self,
        token: &str,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse> {
        let document = search_document("SearchPullRequests", "PullRequest", PR_FIELDS);
        let search = search_string("pr", query);
        let connection: SearchConnection<PullRequestData> = self
            .search(token, &document, &search, limit, page_info)
            .await?;

        let prs: Vec<_> = connection
            .nodes
            .into_iter()
            .filter(|pr| pr.number != 0 && !pr.repository.is_archived)
            .collect();
        debug!(count = prs.len(), total = connection.issue_count, "github pull requests");
        Ok(PullRequestsResponse {
            prs,
            total_count: connection.issue_count,
            page_info: connection.page_info,
        })
    }

    /// Search issues; archived repositories are skipped.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn search_issues(
        &self,
        token: &str,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        let document = search_document("SearchIssues", "Issue", ISSUE_FIELDS);
        let search = search_string("issue", query);
        let connection: SearchConnection<IssueData> = self
            .search(token, &document, &search, limit, page_info)
            .await?;

        let issues: Vec<_> = connection
            .nodes
            .into_iter()
            .filter(|issue| issue.number != 0 && !issue.repository.is_archived)
            .collect();
        debug!(count = issues.len(), total = connection.issue_count, "github issues");
        Ok(IssuesResponse {
            issues,
            total_count: connection.issue_count,
            page_info: connection.page_info,
        })
    }

    /// Resolve one pull request by its web URL.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`]; a URL that is not a pull request yields
    /// `NetworkError::GraphQl`.
    pub async fn pull_request(&self, token: &str, url: &str) -> DashResult<PullRequestData> {
        let document = format!(
            "query PullRequest($url: URI!) {{
  resource(url: $url) {{ ... on PullRequest {{ {PR_FIELDS} }} }}
}}"
        );
        let data: ResourceData = self.execute(token, &document, json!({ "url": url })).await?;
        data.resource
            .filter(|pr| pr.number != 0)
            .ok_or_else(|| {
                NetworkError::GraphQl {
                    messages: vec![format!("no pull request found at {url}")],
                }
                .into()
            })
    }

    /// Login of the token's owner.
    ///
    /// # Errors
    ///
    /// See [`GraphQlClient::execute`].
    pub async fn viewer_login(&self, token: &str) -> DashResult<String> {
        let data: ViewerData = self.execute(token, VIEWER_QUERY, json!({})).await?;
        Ok(data.viewer.login)
    }
}

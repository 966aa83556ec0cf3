// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Azure DevOps provider.
//!
//! ```text
//! every fetch: organization + project? --no--> Configuration
//!              token?                  --no--> Authentication
//!
//! pull requests  GET  {base}/{org}/{project}/_apis/git/pullrequests
//!                     ?api-version=7.1&$top=N[&$skip=S][&searchCriteria.status=...]
//! work items     POST {base}/{org}/{project}/_apis/wit/wiql   (ids)
//!                GET  {base}/{org}/{project}/_apis/wit/workitems?ids=...
//! auth info      GET  {base}/{org}/_apis/connectionData
//!
//! Basic auth: empty user + PAT. Cursor = number of items already seen.
//! ```

pub mod models;


use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use self::models::{
    AzureList, AzurePullRequest, AzureWorkItem, ConnectionData, WiqlResult, convert_pull_request,
    convert_work_item,
};
use super::detection::AZURE_CLOUD_BASE_URL;
use super::types::{IssuesResponse, PageInfo, PullRequestData, PullRequestsResponse};
use super::{
    AuthInfo, Capabilities, GitProvider, PrAction, ProviderConfig, ProviderType,
    reject_unauthorized,
};
use crate::error::{DashResult, ProviderError};
use crate::net::{fetch_json, global_client, join_url};

/// Environment variables consulted for a PAT, in order.
pub const TOKEN_ENV_VARS: [&str; 3] = ["AZURE_DEVOPS_TOKEN", "ADO_PAT", "AZURE_PAT"];

pub const API_VERSION: &str = "7.1";

pub const TOKEN_SOURCE: &str = "Personal Access Token";

/// Largest id batch the work-items endpoint accepts.
pub const MAX_WORK_ITEMS: u32 = 200;

const WORK_ITEM_FIELDS: &str = "System.Id,System.Title,System.State,System.WorkItemType,\
System.CreatedBy,System.AssignedTo,System.CreatedDate,System.ChangedDate,\
System.Description,System.Tags,System.CommentCount";

fn auth_hint() -> String {
    format!(
        "set one of {} to a Personal Access Token",
        TOKEN_ENV_VARS.join(", ")
    )
}

/// State filter picked out of a free-text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    Open,
    Closed,
    Merged,
    All,
}

/// A free-text query split into its `is:` state qualifier and the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub state: Option<StateFilter>,
    pub text: String,
}

/// Split `is:open` / `is:closed` / `is:merged` / `is:all` out of `query`.
/// The last state qualifier wins; `is:pr` and `is:issue` are dropped.
#[must_use]
pub fn parse_query(query: &str) -> ParsedQuery {
    let mut state = None;
    let mut words = Vec::new();
    for word in query.split_whitespace() {
        match word.to_ascii_lowercase().as_str() {
            "is:open" => state = Some(StateFilter::Open),
            "is:closed" => state = Some(StateFilter::Closed),
            "is:merged" => state = Some(StateFilter::Merged),
            "is:all" => state = Some(StateFilter::All),
            "is:pr" | "is:issue" => {}
            _ => words.push(word),
        }
    }
    ParsedQuery {
        state,
        text: words.join(" "),
    }
}

/// `searchCriteria.status` value for a pull request state filter.
#[must_use]
pub const fn pr_status_criteria(state: StateFilter) -> &'static str {
    match state {
        StateFilter::Open => "active",
        StateFilter::Closed => "abandoned",
        StateFilter::Merged => "completed",
        StateFilter::All => "all",
    }
}

/// Escape a WIQL string literal.
fn wiql_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// The WIQL document selecting work items of `project`, newest change first.
#[must_use]
pub fn build_wiql(project: &str, query: &ParsedQuery) -> String {
    let closed = models::CLOSED_WORK_ITEM_STATES
        .iter()
        .map(|state| format!("'{state}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut clauses = vec![format!(
        "[System.TeamProject] = '{}'",
        wiql_literal(project)
    )];
    match query.state {
        Some(StateFilter::Open) => clauses.push(format!("[System.State] NOT IN ({closed})")),
        Some(StateFilter::Closed | StateFilter::Merged) => {
            clauses.push(format!("[System.State] IN ({closed})"));
        }
        Some(StateFilter::All) | None => {}
    }
    if !query.text.is_empty() {
        clauses.push(format!(
            "[System.Title] CONTAINS '{}'",
            wiql_literal(&query.text)
        ));
    }
    format!(
        "SELECT [System.Id] FROM workitems WHERE {} ORDER BY [System.ChangedDate] DESC",
        clauses.join(" AND ")
    )
}

/// Decode a skip cursor; an absent cursor is the first page.
fn skip_from(page_info: Option<&PageInfo>) -> DashResult<u32> {
    let Some(cursor) = page_info.and_then(PageInfo::cursor) else {
        return Ok(0);
    };
    cursor.parse().map_err(|_| {
        ProviderError::Configuration {
            provider: ProviderType::AzureDevOps,
            message: format!("invalid page cursor '{cursor}'"),
        }
        .into()
    })
}

fn next_page(skip: u32, returned: usize, limit: u32) -> PageInfo {
    let returned = u32::try_from(returned).unwrap_or(u32::MAX);
    PageInfo {
        has_next_page: returned >= limit,
        start_cursor: skip.to_string(),
        end_cursor: skip.saturating_add(returned).to_string(),
    }
}

/// Azure DevOps, backed by the Git and Work Item Tracking REST APIs.
#[derive(Debug)]
pub struct AzureDevOpsProvider {
    config: ProviderConfig,
    base_url: String,
}

impl AzureDevOpsProvider {
    /// Empty `base_url` means the cloud service at `https://dev.azure.com`.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        let base_url = if config.base_url.trim().is_empty() {
            AZURE_CLOUD_BASE_URL.to_string()
        } else {
            config.base_url.trim().trim_end_matches('/').to_string()
        };
        debug!(
            org = %config.organization,
            project = %config.project,
            base_url = %base_url,
            has_token = !config.token.is_empty(),
            "creating azure devops provider"
        );
        Self { config, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{org}`, as `az --org` expects.
    #[must_use]
    pub fn organization_url(&self) -> String {
        join_url(&self.base_url, &self.config.organization)
    }

    fn project_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url, self.config.organization, self.config.project
        )
    }

    /// Configuration first, then credential.
    fn validate(&self) -> DashResult<&str> {
        if self.config.organization.is_empty() || self.config.project.is_empty() {
            return Err(ProviderError::Configuration {
                provider: ProviderType::AzureDevOps,
                message: "organization and project are required".to_string(),
            }
            .into());
        }
        self.token()
    }

    fn token(&self) -> DashResult<&str> {
        if self.config.token.is_empty() {
            return Err(ProviderError::Authentication {
                provider: ProviderType::AzureDevOps,
                message: format!("no Personal Access Token; {}", auth_hint()),
            }
            .into());
        }
        Ok(&self.config.token)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &str) -> DashResult<T> {
        let request = global_client().get(url).basic_auth("", Some(token));
        fetch_json(request, url)
            .await
            .map_err(|err| reject_unauthorized(err, ProviderType::AzureDevOps, &auth_hint()))
    }

    async fn work_item_ids(&self, token: &str, wiql: String, top: u32) -> DashResult<Vec<u64>> {
        let url = format!(
            "{}/_apis/wit/wiql?api-version={API_VERSION}&$top={top}",
            self.project_url()
        );
        let request = global_client()
            .post(&url)
            .basic_auth("", Some(token))
            .json(&json!({ "query": wiql }));
        let result: WiqlResult = fetch_json(request, &url)
            .await
            .map_err(|err| reject_unauthorized(err, ProviderType::AzureDevOps, &auth_hint()))?;
        Ok(result.work_items.into_iter().map(|item| item.id).collect())
    }

    async fn work_items(&self, token: &str, ids: &[u64]) -> DashResult<Vec<AzureWorkItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/_apis/wit/workitems?ids={ids}&fields={WORK_ITEM_FIELDS}&api-version={API_VERSION}",
            self.project_url()
        );
        let list: AzureList<AzureWorkItem> = self.get_json(&url, token).await?;
        Ok(list.value)
    }
}

#[async_trait]
impl GitProvider for AzureDevOpsProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::AzureDevOps
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::PULL_REQUESTS | Capabilities::ISSUES
    }

    async fn fetch_pull_requests(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse> {
        let token = self.validate()?;
        let limit = limit.max(1);
        let skip = skip_from(page_info)?;
        let parsed = parse_query(query);

        let mut url = format!(
            "{}/_apis/git/pullrequests?api-version={API_VERSION}&$top={limit}",
            self.project_url()
        );
        if skip > 0 {
            url.push_str(&format!("&$skip={skip}"));
        }
        if let Some(state) = parsed.state {
            url.push_str("&searchCriteria.status=");
            url.push_str(pr_status_criteria(state));
        }
        if !parsed.text.is_empty() {
            debug!(text = %parsed.text, "azure pull request search ignores free text");
        }
        debug!(url = %url, limit, skip, "fetching azure devops pull requests");

        let list: AzureList<AzurePullRequest> = self.get_json(&url, token).await?;
        let page_info = next_page(skip, list.value.len(), limit);
        let prs: Vec<PullRequestData> = list.value.into_iter().map(convert_pull_request).collect();
        debug!(count = prs.len(), "fetched azure devops pull requests");
        Ok(PullRequestsResponse {
            total_count: list.count,
            prs,
            page_info,
        })
    }

    async fn fetch_issues(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        let token = self.validate()?;
        let limit = limit.clamp(1, MAX_WORK_ITEMS);
        let skip = skip_from(page_info)?;
        let wiql = build_wiql(&self.config.project, &parse_query(query));
        debug!(wiql = %wiql, limit, skip, "fetching azure devops work items");

        let ids = self
            .work_item_ids(token, wiql, skip.saturating_add(limit))
            .await?;
        let page: Vec<u64> = ids.into_iter().skip(skip as usize).collect();
        let items = self.work_items(token, &page).await?;

        let web_base = self.project_url();
        let issues: Vec<_> = items
            .into_iter()
            .map(|item| {
                convert_work_item(
                    item,
                    &web_base,
                    &self.config.organization,
                    &self.config.project,
                )
            })
            .collect();
        debug!(count = issues.len(), "fetched azure devops work items");
        // WIQL is capped at skip + limit ids, so the full match count is unknown.
        Ok(IssuesResponse {
            total_count: 0,
            page_info: next_page(skip, page.len(), limit),
            issues,
        })
    }

    async fn fetch_pull_request(&self, _url: &str) -> DashResult<PullRequestData> {
        Err(ProviderError::unavailable(
            ProviderType::AzureDevOps,
            "fetching a single pull request",
        )
        .into())
    }

    async fn auth_info(&self) -> DashResult<AuthInfo> {
        if self.config.token.is_empty() {
            return Ok(AuthInfo {
                token_source: TOKEN_SOURCE.to_string(),
                ..AuthInfo::default()
            });
        }
        if self.config.organization.is_empty() {
            return Err(ProviderError::Configuration {
                provider: ProviderType::AzureDevOps,
                message: "organization is required".to_string(),
            }
            .into());
        }
        let url = format!("{}/_apis/connectionData", self.organization_url());
        let data: ConnectionData = self.get_json(&url, &self.config.token).await?;
        Ok(AuthInfo {
            username: data.authenticated_user.provider_display_name,
            is_logged_in: true,
            token_source: TOKEN_SOURCE.to_string(),
        })
    }

    fn command(&self, action: PrAction, number: u64, _repo: &str) -> DashResult<Vec<String>> {
        let id = number.to_string();
        let org = self.organization_url();
        let update = |extra: &[&str]| {
            let mut argv: Vec<String> = ["az", "repos", "pr", "update", "--id"]
                .map(String::from)
                .to_vec();
            argv.push(id.clone());
            argv.extend(extra.iter().map(|arg| (*arg).to_string()));
            argv.extend(["--org".to_string(), org.clone()]);
            argv
        };
        let argv = match action {
            PrAction::Checkout => vec![
                "az".into(),
                "repos".into(),
                "pr".into(),
                "checkout".into(),
                "--id".into(),
                id.clone(),
            ],
            PrAction::Merge => update(&["--status", "completed"]),
            PrAction::Close => update(&["--status", "abandoned"]),
            PrAction::Reopen => update(&["--status", "active"]),
            PrAction::Ready => update(&["--draft", "false"]),
            PrAction::WatchChecks => vec![
                "az".into(),
                "repos".into(),
                "pr".into(),
                "policy".into(),
                "list".into(),
                "--id".into(),
                id.clone(),
                "--org".into(),
                org.clone(),
            ],
            PrAction::Diff | PrAction::Update => {
                return Err(
                    ProviderError::unavailable(ProviderType::AzureDevOps, action.as_str()).into(),
                );
            }
        };
        Ok(argv)
    }
}

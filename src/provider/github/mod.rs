// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub provider.
//!
//! ```text
//! credential (first hit wins; a hit is kept, a miss is retried next call):
//!   config token -> GH_TOKEN -> GITHUB_TOKEN -> `gh auth token`
//!
//! fetch_pull_requests -> GraphQL search "is:pr <q> sort:updated"
//! fetch_issues        -> GraphQL search "is:issue <q> sort:updated"
//! fetch_pull_request  -> GraphQL resource(url:)
//! commands            -> gh pr <verb> N -R owner/repo
//! ```

pub mod graphql;


use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use self::graphql::GraphQlClient;
use super::types::{IssuesResponse, PageInfo, PullRequestData, PullRequestsResponse};
use super::{
    AuthInfo, Capabilities, GitProvider, PrAction, ProviderConfig, ProviderType,
    reject_unauthorized,
};
use crate::core::env::{Env, current_env};
use crate::error::{DashError, DashResult, ProviderError};

/// Environment variables consulted for a GitHub token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

pub(crate) const AUTH_HINT: &str = "set GH_TOKEN or GITHUB_TOKEN, or run `gh auth login`";

/// Where a GitHub token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Config,
    Env(&'static str),
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => f.write_str("config"),
            Self::Env(name) => write!(f, "{name} environment variable"),
            Self::GhCli => f.write_str("gh auth token"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub source: TokenSource,
}

/// Pick the first token from config or environment.
#[must_use]
pub fn credential_from(config_token: &str, env: &Env) -> Option<Credential> {
    if !config_token.is_empty() {
        return Some(Credential {
            token: config_token.to_string(),
            source: TokenSource::Config,
        });
    }
    env.first_non_empty(&TOKEN_ENV_VARS)
        .map(|(name, token)| Credential {
            token: token.to_string(),
            source: TokenSource::Env(name),
        })
}

/// Ask the `gh` CLI for its stored token.
pub(crate) async fn gh_cli_token() -> Option<Credential> {
    let gh = which::which("gh").ok()?;
    let output = tokio::process::Command::new(gh)
        .args(["auth", "token"])
        .output()
        .await
        .inspect_err(|err| debug!(error = %err, "failed to run gh auth token"))
        .ok()?;
    if !output.status.success() {
        debug!(code = ?output.status.code(), "gh auth token reported no login");
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(Credential {
        token,
        source: TokenSource::GhCli,
    })
}

/// Holds the first credential found; a failed lookup is not remembered.
#[derive(Debug, Default)]
pub(crate) struct CredentialCache(OnceCell<Credential>);

impl CredentialCache {
    pub(crate) async fn get_or_lookup<F, Fut>(&self, lookup: F) -> Option<&Credential>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Credential>>,
    {
        self.0
            .get_or_try_init(|| async { lookup().await.ok_or(()) })
            .await
            .ok()
    }
}

/// Config token, then `env`, then `gh auth token` when `cli_fallback` is set.
pub(crate) async fn lookup_credential(
    config_token: &str,
    env: &Env,
    cli_fallback: bool,
) -> Option<Credential> {
    let found = match credential_from(config_token, env) {
        Some(found) => Some(found),
        None if cli_fallback => gh_cli_token().await,
        None => None,
    };
    debug!(
        source = found.as_ref().map(|c| c.source.to_string()),
        "resolved github credential"
    );
    found
}

pub(crate) fn missing_token_error() -> DashError {
    ProviderError::Authentication {
        provider: ProviderType::GitHub,
        message: format!("no GitHub token found; {AUTH_HINT}"),
    }
    .into()
}

/// GitHub, backed by the GraphQL search API.
#[derive(Debug)]
pub struct GitHubProvider {
    config: ProviderConfig,
    client: GraphQlClient,
    env: Env,
    cli_fallback: bool,
    credential: CredentialCache,
}

impl GitHubProvider {
    /// Provider reading tokens from the process environment, with the
    /// `gh auth token` fallback enabled.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_env(config, current_env()).cli_fallback(true)
    }

    /// Provider reading tokens from `env` only; `gh` is not consulted.
    #[must_use]
    pub fn with_env(config: ProviderConfig, env: Env) -> Self {
        Self {
            client: GraphQlClient::new(&config.base_url),
            config,
            env,
            cli_fallback: false,
            credential: CredentialCache::default(),
        }
    }

    #[must_use]
    pub const fn cli_fallback(mut self, enabled: bool) -> Self {
        self.cli_fallback = enabled;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    async fn resolve_credential(&self) -> Option<&Credential> {
        self.credential
            .get_or_lookup(|| lookup_credential(&self.config.token, &self.env, self.cli_fallback))
            .await
    }

    async fn token(&self) -> DashResult<&str> {
        self.resolve_credential()
            .await
            .map(|credential| credential.token.as_str())
            .ok_or_else(missing_token_error)
    }
}

#[async_trait]
impl GitProvider for GitHubProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::GitHub
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
        let token = self.token().await?;
        self.client
            .search_pull_requests(token, query, limit, page_info)
            .await
            .map_err(|err| reject_unauthorized(err, ProviderType::GitHub, AUTH_HINT))
    }

    async fn fetch_issues(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        let token = self.token().await?;
        self.client
            .search_issues(token, query, limit, page_info)
            .await
            .map_err(|err| reject_unauthorized(err, ProviderType::GitHub, AUTH_HINT))
    }

    async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequestData> {
        let token = self.token().await?;
        self.client
            .pull_request(token, url)
            .await
            .map_err(|err| reject_unauthorized(err, ProviderType::GitHub, AUTH_HINT))
    }

    async fn auth_info(&self) -> DashResult<AuthInfo> {
        let Some(credential) = self.resolve_credential().await else {
            return Ok(AuthInfo::default());
        };
        let username = self
            .client
            .viewer_login(&credential.token)
            .await
            .map_err(|err| reject_unauthorized(err, ProviderType::GitHub, AUTH_HINT))?;
        Ok(AuthInfo {
            username,
            is_logged_in: true,
            token_source: credential.source.to_string(),
        })
    }

    fn command(&self, action: PrAction, number: u64, repo: &str) -> DashResult<Vec<String>> {
        Ok(gh_pr_command(action, number, repo))
    }
}

/// The `gh pr` command line for `action`.
///
/// Checkout runs inside the local clone and takes no `-R`.
#[must_use]
pub fn gh_pr_command(action: PrAction, number: u64, repo: &str) -> Vec<String> {
    let number = number.to_string();
    let mut argv: Vec<String> = vec!["gh".into(), "pr".into()];
    match action {
        PrAction::Checkout => {
            argv.extend(["checkout".to_string(), number]);
            return argv;
        }
        PrAction::Diff => argv.push("diff".into()),
        PrAction::Merge => argv.push("merge".into()),
        PrAction::Close => argv.push("close".into()),
        PrAction::Reopen => argv.push("reopen".into()),
        PrAction::Ready => argv.push("ready".into()),
        PrAction::Update => argv.push("update-branch".into()),
        PrAction::WatchChecks => {
            argv.extend(["checks", "--watch", "--fail-fast"].map(String::from));
        }
    }
    argv.extend([number, "-R".to_string(), repo.to_string()]);
    argv
}

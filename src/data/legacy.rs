// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-backend GitHub path used when no provider is active.
//!
//! It authenticates the way `gh` users already are (environment token or
//! `gh auth token`) and talks to github.com directly, independent of any
//! provider configuration.

use async_trait::async_trait;
use tracing::debug;

use super::{IssuesResponse, PageInfo, PullRequest, PullRequestsResponse};
use crate::core::env::{Env, current_env};
use crate::error::DashResult;
use crate::provider::github::graphql::GraphQlClient;
use crate::provider::PrAction;
use crate::provider::github::{
    CredentialCache, gh_pr_command, lookup_credential, missing_token_error,
};

/// Fetch path that predates providers.
#[async_trait]
pub trait LegacyBackend: Send + Sync + std::fmt::Debug {
    /// # Errors
    ///
    /// Returns an authentication or transport error.
    async fn fetch_pull_requests(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse>;

    /// # Errors
    ///
    /// Returns an authentication or transport error.
    async fn fetch_issues(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse>;

    /// # Errors
    ///
    /// Returns an authentication or transport error.
    async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequest>;

    /// `gh` command line for `action`.
    fn command(&self, action: PrAction, number: u64, repo: &str) -> Vec<String>;
}

/// Direct GitHub GraphQL access with ambient credentials.
#[derive(Debug)]
pub struct LegacyGitHub {
    client: GraphQlClient,
    env: Env,
    cli_fallback: bool,
    credential: CredentialCache,
}

impl Default for LegacyGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyGitHub {
    /// github.com with process environment tokens and `gh auth token`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: GraphQlClient::new(""),
            env: current_env(),
            cli_fallback: true,
            credential: CredentialCache::default(),
        }
    }

    /// `base_url` with tokens from `env` only.
    #[must_use]
    pub fn with_env(base_url: &str, env: Env) -> Self {
        Self {
            client: GraphQlClient::new(base_url),
            env,
            cli_fallback: false,
            credential: CredentialCache::default(),
        }
    }

    async fn token(&self) -> DashResult<&str> {
        self.credential
            .get_or_lookup(|| lookup_credential("", &self.env, self.cli_fallback))
            .await
            .map(|credential| credential.token.as_str())
            .ok_or_else(missing_token_error)
    }
}

#[async_trait]
impl LegacyBackend for LegacyGitHub {
    async fn fetch_pull_requests(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse> {
        let token = self.token().await?;
        debug!(query, limit, "legacy github pull request search");
        let response = self
            .client
            .search_pull_requests(token, query, limit, page_info)
            .await?;
        Ok(response.into())
    }

    async fn fetch_issues(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        let token = self.token().await?;
        debug!(query, limit, "legacy github issue search");
        let response = self
            .client
            .search_issues(token, query, limit, page_info)
            .await?;
        Ok(response.into())
    }

    async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequest> {
        let token = self.token().await?;
        let pr = self.client.pull_request(token, url).await?;
        Ok(pr.into())
    }

    fn command(&self, action: PrAction, number: u64, repo: &str) -> Vec<String> {
        gh_pr_command(action, number, repo)
    }
}

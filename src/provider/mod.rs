// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider abstraction over source-control platforms.
//!
//! ```text
//!              ProviderManager
//!         explicit cfg > git remote > default
//!                     |
//!          detection::parse_git_remote_url
//!                     |
//!                     v
//!              new_provider(cfg)
//!                |          |
//!                v          v
//!      GitHubProvider   AzureDevOpsProvider
//!       GraphQL search   REST + WIQL
//!                |          |
//!                +----+-----+
//!                     v
//!          dyn GitProvider (fetch + command builders)
//! ```
//!
//! # Key Types
//!
//! | Type             | Purpose                                   |
//! |------------------|-------------------------------------------|
//! | `ProviderType`   | Closed set of platforms, dispatch tag     |
//! | `ProviderConfig` | Resolved settings for one provider        |
//! | `GitProvider`    | Capability contract every backend fulfils |
//! | `PrAction`       | The eight command-builder operations      |

pub mod azure;
pub mod detection;
pub mod github;
pub mod manager;
pub mod types;

#[cfg(test)]
mod tests;

#[cfg(test)]
pub(crate) mod test_utils;

use async_trait::async_trait;
use bitflags::bitflags;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{DashError, DashResult, NetworkError, ProviderError};
use types::{IssuesResponse, PageInfo, PullRequestData, PullRequestsResponse};

/// Supported source-control platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderType {
    #[default]
    GitHub,
    AzureDevOps,
}

impl ProviderType {
    /// Stable string form, also used as the registry key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::AzureDevOps => "azure-devops",
        }
    }

    /// Parses a configured type name.
    ///
    /// Unknown names resolve to GitHub for backward compatibility; this is
    /// intentional leniency, not a classification failure.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "github" | "gh" => Self::GitHub,
            "azure-devops" | "azuredevops" | "azure" | "ado" => Self::AzureDevOps,
            other => {
                debug!(provider = other, "unknown provider type, defaulting to github");
                Self::GitHub
            }
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProviderType {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl From<String> for ProviderType {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<ProviderType> for String {
    fn from(value: ProviderType) -> Self {
        value.as_str().to_string()
    }
}

bitflags! {
    /// What a provider can fetch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const PULL_REQUESTS = 1;
        const ISSUES = 1 << 1;
    }
}

/// Settings for one provider instance.
///
/// Built once per initialization and never edited afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct ProviderConfig {
    #[builder(default)]
    pub provider_type: ProviderType,
    #[builder(into, default)]
    pub organization: String,
    #[builder(into, default)]
    pub project: String,
    #[builder(into, default)]
    pub base_url: String,
    #[builder(into, default)]
    pub token: String,
}

impl ProviderConfig {
    /// A bare configuration for `provider_type` with every optional field empty.
    #[must_use]
    pub fn bare(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            ..Self::default()
        }
    }

    /// Returns a copy carrying `token`.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..self
        }
    }
}

/// Authentication status reported by a provider. Queried on demand, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthInfo {
    pub username: String,
    pub is_logged_in: bool,
    pub token_source: String,
}

/// Pull request actions a provider can build a command line for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrAction {
    Diff,
    Checkout,
    Merge,
    Close,
    Reopen,
    Ready,
    Update,
    WatchChecks,
}

impl PrAction {
    pub const ALL: [Self; 8] = [
        Self::Diff,
        Self::Checkout,
        Self::Merge,
        Self::Close,
        Self::Reopen,
        Self::Ready,
        Self::Update,
        Self::WatchChecks,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Diff => "diff",
            Self::Checkout => "checkout",
            Self::Merge => "merge",
            Self::Close => "close",
            Self::Reopen => "reopen",
            Self::Ready => "ready",
            Self::Update => "update",
            Self::WatchChecks => "watch-checks",
        }
    }
}

impl std::fmt::Display for PrAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability contract implemented by every platform backend.
///
/// Fetch operations talk to the network; command builders only describe a
/// process to run (program followed by its arguments) and never execute it.
/// A builder returning `Ok(vec![])` means "not available"; an error is the
/// authoritative reason an action cannot be performed.
#[async_trait]
pub trait GitProvider: Send + Sync + std::fmt::Debug {
    fn provider_type(&self) -> ProviderType;

    fn capabilities(&self) -> Capabilities;

    fn supports_pull_requests(&self) -> bool {
        self.capabilities().contains(Capabilities::PULL_REQUESTS)
    }

    fn supports_issues(&self) -> bool {
        self.capabilities().contains(Capabilities::ISSUES)
    }

    /// Search pull requests. `page_info` carries the cursor of the previous page.
    ///
    /// # Errors
    ///
    /// Returns a configuration, authentication or transport error.
    async fn fetch_pull_requests(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse>;

    /// Search issues (work items on Azure DevOps).
    ///
    /// # Errors
    ///
    /// Returns a configuration, authentication or transport error.
    async fn fetch_issues(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse>;

    /// Resolve a single pull request by its web URL.
    ///
    /// # Errors
    ///
    /// May return `CapabilityUnavailable`; callers treat that as a gap in this
    /// one operation, not as a broken provider.
    async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequestData>;

    /// # Errors
    ///
    /// Returns a transport error if the platform cannot be queried.
    async fn auth_info(&self) -> DashResult<AuthInfo>;

    /// Build the command line for `action` on pull request `number` in `repo`
    /// (`owner/name` or `project/name`).
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` when the platform has no equivalent.
    fn command(&self, action: PrAction, number: u64, repo: &str) -> DashResult<Vec<String>>;

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn diff_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Diff, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn checkout_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Checkout, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn merge_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Merge, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn close_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Close, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn reopen_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Reopen, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn ready_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Ready, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn update_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::Update, number, repo)
    }

    /// # Errors
    ///
    /// See [`GitProvider::command`].
    fn watch_checks_command(&self, number: u64, repo: &str) -> DashResult<Vec<String>> {
        self.command(PrAction::WatchChecks, number, repo)
    }
}

/// Construct the provider selected by `config.provider_type`.
///
/// Unknown type names were already mapped to GitHub by
/// [`ProviderType::parse_lenient`], so this never fails on the type itself.
/// Both providers share the process-wide HTTP client and build infallibly
/// today; the `Result` is the seam for provider-specific setup.
///
/// # Errors
///
/// Reserved for failures in a provider's own setup.
pub fn new_provider(config: &ProviderConfig) -> DashResult<Arc<dyn GitProvider>> {
    let provider: Arc<dyn GitProvider> = match config.provider_type {
        ProviderType::GitHub => Arc::new(github::GitHubProvider::new(config.clone())),
        ProviderType::AzureDevOps => Arc::new(azure::AzureDevOpsProvider::new(config.clone())),
    };
    Ok(provider)
}

/// Turn an HTTP 401 into an authentication error carrying `hint`.
///
/// Any other error is returned untouched.
pub(crate) fn reject_unauthorized(err: DashError, provider: ProviderType, hint: &str) -> DashError {
    match &err {
        DashError::Network(net) if matches!(**net, NetworkError::HttpError { status: 401, .. }) => {
            ProviderError::Authentication {
                provider,
                message: format!("credential rejected (HTTP 401); {hint}"),
            }
            .into()
        }
        _ => err,
    }
}

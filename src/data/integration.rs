// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider-aware fetch entry points with a legacy fallback.
//!
//! ```text
//! fetch_*_with_provider
//!   no active provider          --> legacy GitHub
//!   provider lacks capability   --> legacy GitHub
//!   otherwise                   --> provider + conversion
//!                                   (errors returned as-is, no fallback)
//! ```
//!
//! [`ProviderSession`] is the explicit handle; the free functions operate on
//! the process-wide [`global`] session. Readers clone the active provider
//! under a read lock and drop the lock before awaiting; re-initialization
//! takes the write lock.

use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use super::legacy::{LegacyBackend, LegacyGitHub};
use super::{IssuesResponse, PageInfo, PullRequest, PullRequestsResponse};
use crate::config::Config;
use crate::error::{DashResult, ProviderError};
use crate::provider::manager::ProviderManager;
use crate::provider::{AuthInfo, GitProvider, PrAction, ProviderConfig, ProviderType};

/// Active provider plus the legacy path it falls back to.
#[derive(Debug)]
pub struct ProviderSession {
    manager: RwLock<ProviderManager>,
    legacy: Arc<dyn LegacyBackend>,
}

impl Default for ProviderSession {
    fn default() -> Self {
        Self::new(ProviderManager::new(), Arc::new(LegacyGitHub::new()))
    }
}

impl ProviderSession {
    #[must_use]
    pub fn new(manager: ProviderManager, legacy: Arc<dyn LegacyBackend>) -> Self {
        Self {
            manager: RwLock::new(manager),
            legacy,
        }
    }

    /// Select and activate a provider for `repo_path`.
    ///
    /// # Errors
    ///
    /// See [`ProviderManager::initialize_provider`]; the previous provider
    /// stays active on failure.
    pub fn init_providers(&self, config: &Config, repo_path: &Path) -> DashResult<()> {
        self.manager
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .initialize_provider(config, repo_path)
    }

    /// The active provider, or `None` before initialization.
    #[must_use]
    pub fn current_provider(&self) -> Option<Arc<dyn GitProvider>> {
        self.manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_provider()
    }

    /// Configuration of the active provider.
    #[must_use]
    pub fn current_config(&self) -> Option<ProviderConfig> {
        self.manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_config()
            .cloned()
    }

    /// Type and authentication status of the active provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotInitialized` before any successful
    /// initialization.
    pub async fn provider_info(&self) -> DashResult<(ProviderType, AuthInfo)> {
        let provider = self
            .current_provider()
            .ok_or(ProviderError::NotInitialized)?;
        let auth = provider.auth_info().await?;
        Ok((provider.provider_type(), auth))
    }

    /// # Errors
    ///
    /// Returns the provider's error unmodified, or the legacy path's error.
    pub async fn fetch_pull_requests(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse> {
        match self.current_provider() {
            Some(provider) if provider.supports_pull_requests() => {
                debug!(provider = %provider.provider_type(), "fetching pull requests via provider");
                let response = provider.fetch_pull_requests(query, limit, page_info).await?;
                debug!(count = response.prs.len(), "provider fetch successful");
                Ok(response.into())
            }
            current => {
                log_fallback(current.as_deref(), "pull requests");
                self.legacy.fetch_pull_requests(query, limit, page_info).await
            }
        }
    }

    /// # Errors
    ///
    /// Returns the provider's error unmodified, or the legacy path's error.
    pub async fn fetch_issues(
        &self,
        query: &str,
        limit: u32,
        page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        match self.current_provider() {
            Some(provider) if provider.supports_issues() => {
                debug!(provider = %provider.provider_type(), "fetching issues via provider");
                let response = provider.fetch_issues(query, limit, page_info).await?;
                debug!(count = response.issues.len(), "provider fetch successful");
                Ok(response.into())
            }
            current => {
                log_fallback(current.as_deref(), "issues");
                self.legacy.fetch_issues(query, limit, page_info).await
            }
        }
    }

    /// # Errors
    ///
    /// Returns the provider's error unmodified (including
    /// `CapabilityUnavailable`), or the legacy path's error.
    pub async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequest> {
        match self.current_provider() {
            Some(provider) if provider.supports_pull_requests() => {
                let pr = provider.fetch_pull_request(url).await?;
                Ok(pr.into())
            }
            current => {
                log_fallback(current.as_deref(), "pull request");
                self.legacy.fetch_pull_request(url).await
            }
        }
    }

    /// Command line for `action` from the active provider, or `gh` without one.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` when the provider has no equivalent or
    /// builds an empty command.
    pub fn command(&self, action: PrAction, number: u64, repo: &str) -> DashResult<Vec<String>> {
        let Some(provider) = self.current_provider() else {
            return Ok(self.legacy.command(action, number, repo));
        };
        let argv = provider.command(action, number, repo)?;
        if argv.is_empty() {
            return Err(ProviderError::unavailable(provider.provider_type(), action.as_str()).into());
        }
        Ok(argv)
    }
}

fn log_fallback(provider: Option<&dyn GitProvider>, what: &str) {
    match provider {
        Some(provider) => debug!(
            provider = %provider.provider_type(),
            what,
            "provider lacks capability, using legacy github"
        ),
        None => debug!(what, "no provider initialized, using legacy github"),
    }
}

static GLOBAL: OnceLock<ProviderSession> = OnceLock::new();

/// Process-wide session for call sites without a handle.
pub fn global() -> &'static ProviderSession {
    GLOBAL.get_or_init(ProviderSession::default)
}

/// Initialize the global session.
///
/// # Errors
///
/// See [`ProviderSession::init_providers`].
pub fn init_providers(config: &Config, repo_path: &Path) -> DashResult<()> {
    global().init_providers(config, repo_path)
}

/// The globally active provider.
#[must_use]
pub fn current_provider() -> Option<Arc<dyn GitProvider>> {
    global().current_provider()
}

/// # Errors
///
/// See [`ProviderSession::provider_info`].
pub async fn provider_info() -> DashResult<(ProviderType, AuthInfo)> {
    global().provider_info().await
}

/// # Errors
///
/// See [`ProviderSession::fetch_pull_requests`].
pub async fn fetch_pull_requests_with_provider(
    query: &str,
    limit: u32,
    page_info: Option<&PageInfo>,
) -> DashResult<PullRequestsResponse> {
    global().fetch_pull_requests(query, limit, page_info).await
}

/// # Errors
///
/// See [`ProviderSession::fetch_issues`].
pub async fn fetch_issues_with_provider(
    query: &str,
    limit: u32,
    page_info: Option<&PageInfo>,
) -> DashResult<IssuesResponse> {
    global().fetch_issues(query, limit, page_info).await
}

/// # Errors
///
/// See [`ProviderSession::fetch_pull_request`].
pub async fn fetch_pull_request_with_provider(url: &str) -> DashResult<PullRequest> {
    global().fetch_pull_request(url).await
}

/// # Errors
///
/// See [`ProviderSession::command`].
pub fn command_with_provider(action: PrAction, number: u64, repo: &str) -> DashResult<Vec<String>> {
    global().command(action, number, repo)
}

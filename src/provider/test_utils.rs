// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory provider for manager and shim tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::types::{
    IssueData, IssuesResponse, PageInfo, PullRequestData, PullRequestsResponse, Repository,
};
use super::{AuthInfo, Capabilities, GitProvider, PrAction, ProviderConfig, ProviderType};
use crate::error::{DashResult, ProviderError};

#[derive(Debug)]
pub(crate) struct FakeProvider {
    pub(crate) config: ProviderConfig,
    pub(crate) capabilities: Capabilities,
    pub(crate) fail_fetch: bool,
    pub(crate) fetches: AtomicUsize,
}

impl FakeProvider {
    pub(crate) fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            capabilities: Capabilities::all(),
            fail_fetch: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn record(&self) -> DashResult<()> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(ProviderError::Authentication {
                provider: self.config.provider_type,
                message: "fake credential rejected".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn repository(&self) -> Repository {
        Repository {
            name: "core".to_string(),
            name_with_owner: format!("{}/core", self.config.organization),
            is_archived: false,
        }
    }
}

/// Factory building [`FakeProvider`]s, for `ProviderManager::with_factory`.
pub(crate) fn fake_factory(config: &ProviderConfig) -> DashResult<Arc<dyn GitProvider>> {
    Ok(Arc::new(FakeProvider::new(config.clone())))
}

/// Factory that always fails.
pub(crate) fn failing_factory(config: &ProviderConfig) -> DashResult<Arc<dyn GitProvider>> {
    Err(ProviderError::Configuration {
        provider: config.provider_type,
        message: "factory refused".to_string(),
    }
    .into())
}

#[async_trait]
impl GitProvider for FakeProvider {
    fn provider_type(&self) -> ProviderType {
        self.config.provider_type
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn fetch_pull_requests(
        &self,
        query: &str,
        limit: u32,
        _page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse> {
        self.record()?;
        let prs = (1..=u64::from(limit.min(2)))
            .map(|number| PullRequestData {
                number,
                title: format!("{query} #{number}"),
                state: "MERGED".to_string(),
                repository: self.repository(),
                ..PullRequestData::default()
            })
            .collect::<Vec<_>>();
        Ok(PullRequestsResponse {
            total_count: u32::try_from(prs.len()).unwrap_or(u32::MAX),
            prs,
            page_info: PageInfo::after("fake-cursor"),
        })
    }

    async fn fetch_issues(
        &self,
        query: &str,
        _limit: u32,
        _page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        self.record()?;
        Ok(IssuesResponse {
            issues: vec![IssueData {
                number: 11,
                title: query.to_string(),
                state: "closed".to_string(),
                repository: self.repository(),
                ..IssueData::default()
            }],
            total_count: 1,
            page_info: PageInfo::default(),
        })
    }

    async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequestData> {
        self.record()?;
        Ok(PullRequestData {
            number: 3,
            url: url.to_string(),
            state: "OPEN".to_string(),
            repository: self.repository(),
            ..PullRequestData::default()
        })
    }

    async fn auth_info(&self) -> DashResult<AuthInfo> {
        Ok(AuthInfo {
            username: "fake-user".to_string(),
            is_logged_in: !self.config.token.is_empty(),
            token_source: "fake".to_string(),
        })
    }

    fn command(&self, action: PrAction, number: u64, repo: &str) -> DashResult<Vec<String>> {
        if action == PrAction::Diff {
            return Ok(Vec::new());
        }
        Ok(vec![
            "fake".to_string(),
            action.as_str().to_string(),
            number.to_string(),
            repo.to_string(),
        ])
    }
}

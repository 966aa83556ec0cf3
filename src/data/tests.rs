// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use super::integration::ProviderSession;
use super::legacy::LegacyBackend;
use super::{
    ChecksRollup, Issue, IssueState, IssuesResponse, MergeStateStatus, PageInfo, PrState,
    PullRequest, PullRequestsResponse,
};
use crate::config::Config;
use crate::core::env::Env;
use crate::error::{DashError, DashResult, ProviderError};
use crate::provider::manager::ProviderManager;
use crate::provider::test_utils::{FakeProvider, fake_factory, failing_factory};
use crate::provider::types::{CheckContext, CheckRun, IssueData, PullRequestData, StatusContext};
use crate::provider::{Capabilities, GitProvider, PrAction, ProviderConfig, ProviderType};

#[derive(Debug, Default)]
struct FakeLegacy {
    calls: AtomicUsize,
}

impl FakeLegacy {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LegacyBackend for FakeLegacy {
    async fn fetch_pull_requests(
        &self,
        _query: &str,
        _limit: u32,
        _page_info: Option<&PageInfo>,
    ) -> DashResult<PullRequestsResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequestsResponse {
            prs: vec![PullRequest {
                number: 1000,
                title: "legacy".to_string(),
                ..PullRequest::default()
            }],
            total_count: 1,
            page_info: PageInfo::default(),
        })
    }

    async fn fetch_issues(
        &self,
        _query: &str,
        _limit: u32,
        _page_info: Option<&PageInfo>,
    ) -> DashResult<IssuesResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(IssuesResponse {
            issues: vec![Issue {
                number: 2000,
                ..Issue::default()
            }],
            total_count: 1,
            page_info: PageInfo::default(),
        })
    }

    async fn fetch_pull_request(&self, url: &str) -> DashResult<PullRequest> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number: 3000,
            url: url.to_string(),
            ..PullRequest::default()
        })
    }

    fn command(&self, action: PrAction, number: u64, repo: &str) -> Vec<String> {
        vec![
            "legacy".to_string(),
            action.as_str().to_string(),
            number.to_string(),
            repo.to_string(),
        ]
    }
}

fn session_with<F>(factory: F) -> (ProviderSession, Arc<FakeLegacy>)
where
    F: Fn(&ProviderConfig) -> DashResult<Arc<dyn GitProvider>> + Send + Sync + 'static,
{
    let legacy = Arc::new(FakeLegacy::default());
    let manager = ProviderManager::with_env(Env::empty()).with_factory(factory);
    let session = ProviderSession::new(manager, Arc::clone(&legacy) as Arc<dyn LegacyBackend>);
    (session, legacy)
}

fn explicit_github() -> Config {
    Config::parse("[provider]\ntype = \"github\"\norganization = \"acme\"\n").unwrap()
}

fn issues_only(config: &ProviderConfig) -> DashResult<Arc<dyn GitProvider>> {
    Ok(Arc::new(
        FakeProvider::new(config.clone()).with_capabilities(Capabilities::ISSUES),
    ))
}

fn failing_provider(config: &ProviderConfig) -> DashResult<Arc<dyn GitProvider>> {
    Ok(Arc::new(FakeProvider::new(config.clone()).failing()))
}

// --- Canonical records ---

#[test]
fn test_pr_state_from_raw() {
    let states: Vec<_> = ["MERGED", "closed", "OPEN", "merged", "weird"]
        .into_iter()
        .map(PrState::from_raw)
        .collect();
    assert_eq!(
        states,
        [
            PrState::Merged,
            PrState::Closed,
            PrState::Open,
            PrState::Merged,
            PrState::Open
        ]
    );
    assert_eq!(IssueState::from_raw("CLOSED"), IssueState::Closed);
    assert_eq!(IssueState::from_raw("open"), IssueState::Open);
}

#[test]
fn test_merge_state_status_from_raw() {
    assert_eq!(MergeStateStatus::from_raw("CLEAN"), MergeStateStatus::Clean);
    assert_eq!(MergeStateStatus::from_raw("has_hooks"), MergeStateStatus::HasHooks);
    assert_eq!(MergeStateStatus::from_raw(""), MergeStateStatus::Unknown);
}

#[test]
fn test_checks_rollup() {
    let run = |status: &str, conclusion: &str| {
        CheckContext::CheckRun(CheckRun {
            name: "ci".to_string(),
            status: status.to_string(),
            conclusion: conclusion.to_string(),
        })
    };
    let status = |state: &str| {
        CheckContext::StatusContext(StatusContext {
            state: state.to_string(),
            ..StatusContext::default()
        })
    };

    assert_eq!(ChecksRollup::from_contexts(&[]), None);
    assert_eq!(
        ChecksRollup::from_contexts(&[run("COMPLETED", "SUCCESS"), status("SUCCESS")]),
        Some(ChecksRollup::Success)
    );
    assert_eq!(
        ChecksRollup::from_contexts(&[run("IN_PROGRESS", ""), status("SUCCESS")]),
        Some(ChecksRollup::Pending)
    );
    assert_eq!(
        ChecksRollup::from_contexts(&[run("IN_PROGRESS", ""), run("COMPLETED", "TIMED_OUT")]),
        Some(ChecksRollup::Failure)
    );
    assert_eq!(
        ChecksRollup::from_contexts(&[status("ERROR"), run("COMPLETED", "SUCCESS")]),
        Some(ChecksRollup::Failure)
    );
    assert_eq!(ChecksRollup::from_contexts(&[CheckContext::Unknown]), None);
}

#[test]
fn test_pull_request_conversion_from_graphql_shape() {
    let native: PullRequestData = serde_json::from_value(json!({
        "number": 5,
        "title": "Fix it",
        "author": null,
        "state": "MERGED",
        "reviewDecision": null,
        "assignees": { "nodes": [{ "login": "ada" }], "totalCount": 1 },
        "comments": { "totalCount": 9, "nodes": [] },
        "commits": { "totalCount": 1, "nodes": [{ "commit": { "statusCheckRollup": {
            "contexts": { "totalCount": 1, "nodes": [
                { "__typename": "CheckRun", "name": "ci", "status": "COMPLETED", "conclusion": "SUCCESS" }
            ] }
        } } }] },
        "mergeStateStatus": "BEHIND"
    }))
    .unwrap();

    let pr = PullRequest::from(native);
    assert_eq!(pr.number, 5);
    assert_eq!(pr.state, PrState::Merged);
    assert!(pr.author.is_empty());
    assert!(pr.review_decision.is_empty());
    assert_eq!(pr.assignees, ["ada"]);
    assert_eq!(pr.comment_count, 9);
    assert_eq!(pr.checks, Some(ChecksRollup::Success));
    assert_eq!(pr.merge_state_status, MergeStateStatus::Behind);
}

#[test]
fn test_issue_conversion_is_total() {
    let issue = Issue::from(IssueData::default());
    assert_eq!(issue.state, IssueState::Open);
    assert!(issue.assignees.is_empty());
    assert_eq!(issue.reaction_count, 0);
}

// --- Shim policy ---

#[tokio::test]
async fn test_fetch_before_init_uses_legacy() {
    let (session, legacy) = session_with(fake_factory);

    assert!(session.current_provider().is_none());
    let prs = session.fetch_pull_requests("", 10, None).await.unwrap();
    let issues = session.fetch_issues("", 10, None).await.unwrap();
    let pr = session.fetch_pull_request("https://x/pull/1").await.unwrap();

    assert_eq!(prs.prs[0].number, 1000);
    assert_eq!(issues.issues[0].number, 2000);
    assert_eq!(pr.number, 3000);
    assert_eq!(legacy.calls(), 3);
}

#[tokio::test]
async fn test_fetch_with_provider_converts_response() {
    let (session, legacy) = session_with(fake_factory);
    session
        .init_providers(&explicit_github(), Path::new(""))
        .unwrap();

    let prs = session.fetch_pull_requests("query", 2, None).await.unwrap();
    assert_eq!(prs.prs.len(), 2);
    assert_eq!(prs.prs[0].state, PrState::Merged);
    assert_eq!(prs.prs[0].repository.name_with_owner, "acme/core");
    assert_eq!(prs.page_info.cursor(), Some("fake-cursor"));

    let issues = session.fetch_issues("bug", 5, None).await.unwrap();
    assert_eq!(issues.issues[0].state, IssueState::Closed);
    assert_eq!(legacy.calls(), 0);
}

#[tokio::test]
async fn test_missing_capability_falls_back_to_legacy() {
    let (session, legacy) = session_with(issues_only);
    session
        .init_providers(&explicit_github(), Path::new(""))
        .unwrap();

    let prs = session.fetch_pull_requests("", 10, None).await.unwrap();
    assert_eq!(prs.prs[0].number, 1000);
    let issues = session.fetch_issues("", 10, None).await.unwrap();
    assert_eq!(issues.issues[0].number, 11);
    assert_eq!(legacy.calls(), 1);
}

#[tokio::test]
async fn test_provider_error_is_not_masked() {
    let (session, legacy) = session_with(failing_provider);
    session
        .init_providers(&explicit_github(), Path::new(""))
        .unwrap();

    let err = session.fetch_pull_requests("", 10, None).await.unwrap_err();
    assert!(matches!(
        err.as_provider(),
        Some(ProviderError::Authentication { .. })
    ));
    assert!(session.fetch_issues("", 10, None).await.is_err());
    assert_eq!(legacy.calls(), 0);
}

#[tokio::test]
async fn test_provider_info_before_init() {
    let (session, _legacy) = session_with(fake_factory);
    let err = session.provider_info().await.unwrap_err();
    assert!(matches!(
        err,
        DashError::Provider(ref provider) if matches!(**provider, ProviderError::NotInitialized)
    ));
}

#[test]
fn test_failed_reinit_keeps_session_provider() {
    let mut manager = ProviderManager::with_env(Env::empty()).with_factory(fake_factory);
    manager
        .initialize_provider(&explicit_github(), Path::new(""))
        .unwrap();
    let before = manager.current_provider().unwrap();

    let manager = manager.with_factory(failing_factory);
    let session = ProviderSession::new(manager, Arc::new(FakeLegacy::default()));
    let azure = Config::parse(
        "[provider]\ntype = \"azure-devops\"\norganization = \"acme\"\nproject = \"w\"\n",
    )
    .unwrap();

    assert!(session.init_providers(&azure, Path::new("")).is_err());
    let after = session.current_provider().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(
        session.current_config().unwrap().provider_type,
        ProviderType::GitHub
    );
}

#[test]
fn test_command_routing() {
    let (session, _legacy) = session_with(fake_factory);
    assert_eq!(
        session.command(PrAction::Merge, 4, "acme/core").unwrap(),
        ["legacy", "merge", "4", "acme/core"]
    );

    session
        .init_providers(&explicit_github(), Path::new(""))
        .unwrap();
    assert_eq!(
        session.command(PrAction::Merge, 4, "acme/core").unwrap(),
        ["fake", "merge", "4", "acme/core"]
    );
    // the fake provider builds an empty diff command
    let err = session.command(PrAction::Diff, 4, "acme/core").unwrap_err();
    assert!(err.is_capability_unavailable());
}

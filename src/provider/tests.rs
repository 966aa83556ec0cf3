// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::detection::{
    Grammar, RemoteInfo, classify, parse_git_remote_url, provider_config_from_remote,
    ssh_to_https,
};
use super::{
    Capabilities, PrAction, ProviderConfig, ProviderType, new_provider, reject_unauthorized,
};
use crate::error::{DashError, NetworkError, ProviderError};

fn azure(org: &str, project: &str, repo: &str, base: &str) -> RemoteInfo {
    RemoteInfo {
        provider: ProviderType::AzureDevOps,
        organization: org.to_string(),
        project: project.to_string(),
        repository: repo.to_string(),
        base_url: base.to_string(),
    }
}

fn github(owner: &str, repo: &str) -> RemoteInfo {
    RemoteInfo {
        provider: ProviderType::GitHub,
        organization: owner.to_string(),
        project: String::new(),
        repository: repo.to_string(),
        base_url: "https://github.com".to_string(),
    }
}

// --- ProviderType ---

#[test]
fn test_provider_type_strings() {
    let names: Vec<_> = [ProviderType::GitHub, ProviderType::AzureDevOps]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, ["github", "azure-devops"]);
}

#[test]
fn test_provider_type_lenient_parse() {
    let parsed: Vec<_> = ["github", "GitHub", " azure-devops ", "ado", "azure", "gitlab", ""]
        .into_iter()
        .map(ProviderType::parse_lenient)
        .collect();
    assert_eq!(
        parsed,
        [
            ProviderType::GitHub,
            ProviderType::GitHub,
            ProviderType::AzureDevOps,
            ProviderType::AzureDevOps,
            ProviderType::AzureDevOps,
            ProviderType::GitHub,
            ProviderType::GitHub,
        ]
    );
}

#[test]
fn test_provider_type_serde_round_trips_through_string() {
    let json = serde_json::to_string(&ProviderType::AzureDevOps).unwrap();
    assert_eq!(json, "\"azure-devops\"");
    let unknown: ProviderType = serde_json::from_str("\"bitbucket\"").unwrap();
    assert_eq!(unknown, ProviderType::GitHub);
}

#[test]
fn test_pr_action_names() {
    let names: Vec<_> = PrAction::ALL.iter().map(PrAction::as_str).collect();
    insta::assert_snapshot!(names.join(" "), @"diff checkout merge close reopen ready update watch-checks");
}

// --- Detection ---

#[test]
fn test_parse_azure_cloud_https() {
    assert_eq!(
        parse_git_remote_url("https://dev.azure.com/acme/widgets/_git/core"),
        azure("acme", "widgets", "core", "https://dev.azure.com")
    );
}

#[test]
fn test_parse_github_https_strips_git_suffix() {
    assert_eq!(
        parse_git_remote_url("https://github.com/acme/core.git"),
        github("acme", "core")
    );
}

#[test]
fn test_parse_garbage_yields_unknown_sentinel() {
    let info = parse_git_remote_url("not a url");
    assert_eq!(info.provider, ProviderType::GitHub);
    assert_eq!(info.organization, "unknown");
    assert_eq!(info.repository, "unknown");
    assert_eq!(info.base_url, "https://github.com");
    assert!(info.is_unknown());
    assert!(classify("not a url").is_none());
}

#[test]
fn test_ssh_and_https_classify_identically() {
    let pairs = [
        ("git@github.com:acme/core.git", "https://github.com/acme/core.git"),
        ("ssh://git@github.com/acme/core", "https://github.com/acme/core"),
        (
            "git@ssh.dev.azure.com:v3/acme/widgets/core",
            "https://dev.azure.com/acme/widgets/_git/core",
        ),
    ];
    for (ssh, https) in pairs {
        assert_eq!(
            parse_git_remote_url(ssh),
            parse_git_remote_url(https),
            "{ssh} vs {https}"
        );
        assert!(!parse_git_remote_url(ssh).is_unknown());
    }
}

#[test]
fn test_ssh_rewrite_leaves_other_hosts_alone() {
    assert_eq!(
        ssh_to_https("git@gitlab.com:acme/core.git"),
        "git@gitlab.com:acme/core.git"
    );
    assert_eq!(
        ssh_to_https("git@github.com:acme/core.git"),
        "https://github.com/acme/core.git"
    );
}

#[test]
fn test_parse_visualstudio() {
    assert_eq!(
        parse_git_remote_url("https://acme.visualstudio.com/widgets/_git/core"),
        azure("acme", "widgets", "core", "https://acme.visualstudio.com")
    );
}

#[test]
fn test_parse_tfs_keeps_scheme_and_collection() {
    assert_eq!(
        parse_git_remote_url("http://tfs.acme.local:8080/tfs/DefaultCollection/widgets/_git/core"),
        azure(
            "DefaultCollection",
            "widgets",
            "core",
            "http://tfs.acme.local:8080/tfs"
        )
    );
}

#[test]
fn test_parse_user_prefix_and_trailing_slash() {
    assert_eq!(
        parse_git_remote_url("https://acme@dev.azure.com/acme/widgets/_git/core/"),
        azure("acme", "widgets", "core", "https://dev.azure.com")
    );
    assert_eq!(
        parse_git_remote_url("  http://github.com/acme/core/  "),
        github("acme", "core")
    );
}

#[test]
fn test_grammar_order_cloud_before_tfs() {
    // Both the cloud and the TFS grammar accept this URL.
    let url = "https://dev.azure.com/tfs/c/_git/_git/r";
    let (grammar, info) = classify(url).unwrap();
    assert_eq!(grammar, Grammar::AzureCloud);
    assert_eq!(info, azure("tfs", "c", "_git/r", "https://dev.azure.com"));
}

#[test]
fn test_name_with_owner_per_platform() {
    assert_eq!(github("acme", "core").name_with_owner(), "acme/core");
    assert_eq!(
        azure("acme", "widgets", "core", "https://dev.azure.com").name_with_owner(),
        "widgets/core"
    );
}

#[test]
fn test_provider_config_from_remote_has_no_token() {
    let config = provider_config_from_remote("git@ssh.dev.azure.com:v3/acme/widgets/core");
    assert_eq!(config.provider_type, ProviderType::AzureDevOps);
    assert_eq!(config.organization, "acme");
    assert_eq!(config.project, "widgets");
    assert_eq!(config.base_url, "https://dev.azure.com");
    assert!(config.token.is_empty());
}

// --- Factory ---

#[test]
fn test_factory_dispatches_on_type() {
    for provider_type in [ProviderType::GitHub, ProviderType::AzureDevOps] {
        let provider = new_provider(&ProviderConfig::bare(provider_type)).unwrap();
        assert_eq!(provider.provider_type(), provider_type);
        assert_eq!(
            provider.capabilities(),
            Capabilities::PULL_REQUESTS | Capabilities::ISSUES
        );
    }
}

#[test]
fn test_factory_unknown_type_name_builds_github() {
    let config = ProviderConfig::builder()
        .provider_type(ProviderType::from("mercurial-hub"))
        .build();
    let provider = new_provider(&config).unwrap();
    assert_eq!(provider.provider_type(), ProviderType::GitHub);
    assert!(provider.supports_pull_requests());
    assert!(provider.supports_issues());
}

// --- Error mapping ---

#[test]
fn test_reject_unauthorized_maps_only_401() {
    let unauthorized: DashError = NetworkError::HttpError {
        status: 401,
        url: "https://example.test".to_string(),
        body: "denied".to_string(),
    }
    .into();
    let mapped = reject_unauthorized(unauthorized, ProviderType::AzureDevOps, "set ADO_PAT");
    assert!(matches!(
        mapped.as_provider(),
        Some(ProviderError::Authentication { message, .. }) if message.contains("ADO_PAT")
    ));

    let server: DashError = NetworkError::HttpError {
        status: 500,
        url: "https://example.test".to_string(),
        body: "boom".to_string(),
    }
    .into();
    let kept = reject_unauthorized(server, ProviderType::GitHub, "hint");
    assert!(kept.as_provider().is_none());
    assert!(kept.to_string().contains("boom"));
}

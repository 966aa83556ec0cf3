// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote URL classification.
//!
//! ```text
//! raw url --trim--> ssh rewrite --> azure cloud --> visualstudio --> tfs --> github
//!                   (github, ado)       |               |            |         |
//!                                       +-------+-------+------------+---------+
//!                                               v                     no match
//!                                          RemoteInfo              "unknown" github
//! ```
//!
//! Grammars are tried in the order listed; the first match wins. Classification
//! never fails: an unrecognised URL yields the [`RemoteInfo::unknown`] sentinel.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::{ProviderConfig, ProviderType};
use crate::git::redact_url;

/// Placeholder organization and repository for unclassified remotes.
pub const UNKNOWN: &str = "unknown";

pub const GITHUB_BASE_URL: &str = "https://github.com";
pub const AZURE_CLOUD_BASE_URL: &str = "https://dev.azure.com";

/// What a remote URL says about its hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteInfo {
    pub provider: ProviderType,
    pub organization: String,
    /// Empty for GitHub, which has no project level.
    pub project: String,
    pub repository: String,
    pub base_url: String,
}

impl RemoteInfo {
    /// The "could not classify" result.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            provider: ProviderType::GitHub,
            organization: UNKNOWN.to_string(),
            project: String::new(),
            repository: UNKNOWN.to_string(),
            base_url: GITHUB_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }

    /// `owner/repo` for GitHub, `project/repo` for Azure DevOps.
    #[must_use]
    pub fn name_with_owner(&self) -> String {
        match self.provider {
            ProviderType::GitHub => format!("{}/{}", self.organization, self.repository),
            ProviderType::AzureDevOps => format!("{}/{}", self.project, self.repository),
        }
    }
}

/// URL grammars in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    AzureCloud,
    VisualStudio,
    Tfs,
    GitHub,
}

impl Grammar {
    pub const ORDER: [Self; 4] = [Self::AzureCloud, Self::VisualStudio, Self::Tfs, Self::GitHub];

    const fn pattern(self) -> &'static str {
        match self {
            Self::AzureCloud => {
                r"^https?://(?:[^@/]+@)?dev\.azure\.com/([^/]+)/([^/]+)/_git/(.+?)(?:\.git)?/?$"
            }
            Self::VisualStudio => {
                r"^https?://(?:[^@/]+@)?([^./@]+)\.visualstudio\.com/([^/]+)/_git/(.+?)(?:\.git)?/?$"
            }
            Self::Tfs => {
                r"^(https?)://(?:[^@/]+@)?([^/@]+)/tfs/([^/]+)/([^/]+)/_git/(.+?)(?:\.git)?/?$"
            }
            Self::GitHub => r"^https?://(?:[^@/]+@)?github\.com/([^/]+)/(.+?)(?:\.git)?/?$",
        }
    }

    fn build(self, caps: &regex::Captures<'_>) -> RemoteInfo {
        let group = |idx: usize| caps.get(idx).map_or("", |m| m.as_str()).to_string();
        match self {
            Self::AzureCloud => RemoteInfo {
                provider: ProviderType::AzureDevOps,
                organization: group(1),
                project: group(2),
                repository: group(3),
                base_url: AZURE_CLOUD_BASE_URL.to_string(),
            },
            Self::VisualStudio => {
                let organization = group(1);
                RemoteInfo {
                    provider: ProviderType::AzureDevOps,
                    base_url: format!("https://{organization}.visualstudio.com"),
                    organization,
                    project: group(2),
                    repository: group(3),
                }
            }
            // Organization is the collection; the base keeps the scheme and /tfs.
            Self::Tfs => RemoteInfo {
                provider: ProviderType::AzureDevOps,
                base_url: format!("{}://{}/tfs", group(1), group(2)),
                organization: group(3),
                project: group(4),
                repository: group(5),
            },
            Self::GitHub => RemoteInfo {
                provider: ProviderType::GitHub,
                organization: group(1),
                project: String::new(),
                repository: group(2),
                base_url: GITHUB_BASE_URL.to_string(),
            },
        }
    }
}

/// Compile a fixed pattern, dropping it with a warning if it is rejected.
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .inspect_err(|err| warn!(pattern, error = %err, "failed to compile remote url pattern"))
        .ok()
}

static GRAMMARS: LazyLock<Vec<(Grammar, Regex)>> = LazyLock::new(|| {
    Grammar::ORDER
        .into_iter()
        .filter_map(|grammar| compile(grammar.pattern()).map(|regex| (grammar, regex)))
        .collect()
});

/// SSH short forms and their HTTPS replacement templates.
static SSH_REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"^(?:ssh://)?git@github\.com[:/]([^/]+)/(.+)$",
            "https://github.com/$1/$2",
        ),
        (
            r"^git@ssh\.dev\.azure\.com:v3/([^/]+)/([^/]+)/(.+)$",
            "https://dev.azure.com/$1/$2/_git/$3",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, template)| compile(pattern).map(|regex| (regex, template)))
    .collect()
});

/// Rewrite a known SSH remote to its HTTPS equivalent.
///
/// Unrecognised hosts pass through unchanged.
#[must_use]
pub fn ssh_to_https(url: &str) -> String {
    SSH_REWRITES
        .iter()
        .find(|(regex, _)| regex.is_match(url))
        .map_or_else(
            || url.to_string(),
            |(regex, template)| regex.replace(url, *template).into_owned(),
        )
}

/// The grammar `url` is classified by, or `None` for the unknown sentinel.
#[must_use]
pub fn classify(url: &str) -> Option<(Grammar, RemoteInfo)> {
    let url = ssh_to_https(url.trim());
    GRAMMARS.iter().find_map(|(grammar, regex)| {
        regex
            .captures(&url)
            .map(|caps| (*grammar, grammar.build(&caps)))
    })
}

/// Classify a git remote URL.
///
/// Never fails: remotes matching no grammar resolve to [`RemoteInfo::unknown`].
#[must_use]
pub fn parse_git_remote_url(url: &str) -> RemoteInfo {
    match classify(url) {
        Some((grammar, info)) => {
            debug!(
                ?grammar,
                provider = %info.provider,
                org = %info.organization,
                project = %info.project,
                repo = %info.repository,
                "classified remote url"
            );
            info
        }
        None => {
            debug!(url = %redact_url(url), "remote url matched no grammar, assuming github");
            RemoteInfo::unknown()
        }
    }
}

/// Derive a provider configuration (without token) from a remote URL.
#[must_use]
pub fn provider_config_from_remote(url: &str) -> ProviderConfig {
    parse_git_remote_url(url).into()
}

impl From<RemoteInfo> for ProviderConfig {
    fn from(info: RemoteInfo) -> Self {
        Self::builder()
            .provider_type(info.provider)
            .organization(info.organization)
            .project(info.project)
            .base_url(info.base_url)
            .build()
    }
}

// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for prdash.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ProviderSection (optional), RepoPaths, pager
//! ```
//!
//! # Provider Section
//!
//! ```toml
//! [provider]
//! type = "azure-devops"       # empty or absent: detect from git remote
//! organization = "acme"
//! project = "widgets"
//! base_url = "https://dev.azure.com"   # `baseUrl` accepted too
//! token = ""                  # empty: resolve from environment
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::provider::{ProviderConfig, ProviderType};

/// Default page size for `prs` and `issues`.
pub const DEFAULT_LIMIT: u32 = 20;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stderr output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Items fetched per page.
    pub limit: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Explicit provider selection.
///
/// Only a non-empty `type` makes the section authoritative; otherwise the
/// provider is detected from the repository's origin remote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSection {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub organization: String,
    pub project: String,
    #[serde(alias = "baseUrl")]
    pub base_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl ProviderSection {
    /// True when `type` is set.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        !self.provider_type.trim().is_empty()
    }

    /// The provider configuration this section describes, verbatim.
    #[must_use]
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig::builder()
            .provider_type(ProviderType::parse_lenient(&self.provider_type))
            .organization(self.organization.clone())
            .project(self.project.clone())
            .base_url(self.base_url.clone())
            .token(self.token.clone())
            .build()
    }
}

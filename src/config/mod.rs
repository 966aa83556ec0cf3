// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for prdash.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. user config  ($XDG_CONFIG_HOME/prdash/config.toml)
//! 3. local prdash.toml (cwd)
//! 4. -i / --ini files
//! 5. PRDASH_* env vars
//! 6. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PRDASH_PROVIDER__TYPE=azure-devops  → provider.type = "azure-devops"
//! PRDASH_PROVIDER__BASE_URL=https://… → provider.base_url = "https://…"
//! PRDASH_GLOBAL__LIMIT=50             → global.limit = 50
//! ```
//!
//! Platform tokens (`GH_TOKEN`, `AZURE_DEVOPS_TOKEN`, ...) are not config keys;
//! providers read them at initialization.

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::provider::ProviderConfig;

use loader::ConfigLoader;
use paths::RepoPaths;
use types::{GlobalConfig, ProviderSection};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Explicit provider selection; absent means detect from the git remote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderSection>,
    /// Local clone directories used when running commands.
    #[serde(skip_serializing_if = "RepoPaths::is_empty")]
    pub repo_paths: RepoPaths,
    /// Pager for `gh pr diff` (exported as `GH_PAGER`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pager: Option<String>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use prdash::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("prdash.toml")
    ///     .add_toml_file_optional("local.toml")
    ///     .with_env_prefix("PRDASH")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// The explicit provider configuration, if the `[provider]` section names a type.
    #[must_use]
    pub fn explicit_provider(&self) -> Option<ProviderConfig> {
        self.provider
            .as_ref()
            .filter(|section| section.is_explicit())
            .map(ProviderSection::to_provider_config)
    }

    /// Expand paths and validate values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `global.limit` is zero.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.global.limit == 0 {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "limit".to_string(),
                message: "limit must be at least 1".to_string(),
            }
            .into());
        }
        self.repo_paths.resolve(paths::home_dir().as_deref());
        Ok(())
    }

    /// Local clone for `name_with_owner`, if configured.
    #[must_use]
    pub fn repo_path(&self, name_with_owner: &str) -> Option<PathBuf> {
        self.repo_paths.path_for(name_with_owner)
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields (the provider token) are hidden with a `[hidden]` marker.
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_provider_options(&mut options);

        for (repo, path) in self.repo_paths.iter() {
            options.insert(format!("repo_paths.{repo}"), path.display().to_string());
        }
        if let Some(pager) = &self.pager {
            options.insert("pager".into(), pager.clone());
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.limit".into(), self.global.limit.to_string());
    }

    fn format_provider_options(&self, options: &mut BTreeMap<String, String>) {
        let Some(provider) = &self.provider else {
            return;
        };
        options.insert("provider.type".into(), provider.provider_type.clone());
        options.insert(
            "provider.organization".into(),
            provider.organization.clone(),
        );
        options.insert("provider.project".into(), provider.project.clone());
        options.insert("provider.base_url".into(), provider.base_url.clone());
        if !provider.token.is_empty() {
            options.insert("provider.token".into(), "[hidden]".into());
        }
    }
}

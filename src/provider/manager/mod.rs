// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider selection and lifecycle.
//!
//! ```text
//! initialize_provider(config, repo_path)
//!   1. [provider] type set      --> section verbatim
//!   2. origin remote classified --> derived config
//!      no remote / unknown      --> bare GitHub
//!   3. empty token              --> env lookup (Azure only)
//!   4. factory(config)          --> register + set current
//!      factory error            --> Initialization, previous kept
//! ```


use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::detection::parse_git_remote_url;
use super::{AuthInfo, GitProvider, ProviderConfig, ProviderType, azure, new_provider};
use crate::config::Config;
use crate::core::env::{Env, current_env};
use crate::error::{DashResult, ProviderError};
use crate::git::{self, redact_url};

/// Constructor used to turn a resolved configuration into a provider.
pub type ProviderFactory =
    Arc<dyn Fn(&ProviderConfig) -> DashResult<Arc<dyn GitProvider>> + Send + Sync>;

/// Where the resolved configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Explicit,
    Remote,
    Default,
}

impl ConfigOrigin {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "config",
            Self::Remote => "git remote",
            Self::Default => "default",
        }
    }
}

/// Choose the provider configuration for `repo_path`.
///
/// Precedence: an explicit `[provider]` section with a type, then the origin
/// remote, then bare GitHub. Unclassifiable remotes fall through to the
/// default with a warning.
#[must_use]
pub fn select_config(config: &Config, repo_path: &Path) -> (ProviderConfig, ConfigOrigin) {
    if let Some(explicit) = config.explicit_provider() {
        debug!(
            provider = %explicit.provider_type,
            org = explicit.organization,
            project = explicit.project,
            "using explicit provider config"
        );
        return (explicit, ConfigOrigin::Explicit);
    }

    match git::origin_url(repo_path) {
        Ok(url) => {
            let remote = parse_git_remote_url(&url);
            if remote.is_unknown() {
                warn!(
                    url = %redact_url(&url),
                    "unrecognised origin remote, defaulting to github"
                );
            } else {
                debug!(
                    provider = %remote.provider,
                    org = remote.organization,
                    project = remote.project,
                    "provider detected from origin remote"
                );
                return (ProviderConfig::from(remote), ConfigOrigin::Remote);
            }
        }
        Err(err) => {
            debug!(path = %repo_path.display(), error = %err, "no origin remote, defaulting to github");
        }
    }
    (ProviderConfig::bare(ProviderType::GitHub), ConfigOrigin::Default)
}

/// Fill an empty token from the environment.
///
/// GitHub keeps an empty token; the provider falls back to ambient `gh` auth.
/// Azure DevOps takes the first non-empty of [`azure::TOKEN_ENV_VARS`].
#[must_use]
pub fn resolve_token(config: ProviderConfig, env: &Env) -> ProviderConfig {
    if !config.token.is_empty() {
        return config;
    }
    match config.provider_type {
        ProviderType::GitHub => config,
        ProviderType::AzureDevOps => match env.first_non_empty(&azure::TOKEN_ENV_VARS) {
            Some((name, token)) => {
                debug!(source = name, "azure devops token from environment");
                let token = token.to_string();
                config.with_token(token)
            }
            None => {
                debug!("no azure devops token in environment");
                config
            }
        },
    }
}

/// Owns the active provider and the registry of constructed providers.
pub struct ProviderManager {
    providers: HashMap<String, Arc<dyn GitProvider>>,
    current: Option<Arc<dyn GitProvider>>,
    current_config: Option<ProviderConfig>,
    env: Env,
    factory: ProviderFactory,
}

impl std::fmt::Debug for ProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderManager")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .field("current", &self.current.as_ref().map(|p| p.provider_type()))
            .finish_non_exhaustive()
    }
}

impl Default for ProviderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderManager {
    /// Manager reading tokens from the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(current_env())
    }

    /// Manager reading tokens from `env`.
    #[must_use]
    pub fn with_env(env: Env) -> Self {
        Self {
            providers: HashMap::new(),
            current: None,
            current_config: None,
            env,
            factory: Arc::new(new_provider),
        }
    }

    /// Replace the provider constructor.
    #[must_use]
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&ProviderConfig) -> DashResult<Arc<dyn GitProvider>> + Send + Sync + 'static,
    {
        self.factory = Arc::new(factory);
        self
    }

    /// Select, construct and activate a provider for `repo_path`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Initialization` carrying the attempted type when
    /// the factory fails; the previously active provider stays current.
    pub fn initialize_provider(&mut self, config: &Config, repo_path: &Path) -> DashResult<()> {
        let (selected, origin) = select_config(config, repo_path);
        let resolved = resolve_token(selected, &self.env);
        let provider_type = resolved.provider_type;

        let provider = (self.factory)(&resolved).map_err(|source| {
            warn!(provider = %provider_type, error = %source, "provider initialization failed");
            ProviderError::Initialization {
                provider: provider_type,
                source: Box::new(source),
            }
        })?;

        self.providers
            .insert(provider_type.as_str().to_string(), Arc::clone(&provider));
        self.current = Some(provider);
        self.current_config = Some(resolved);
        info!(provider = %provider_type, origin = origin.as_str(), "provider initialized");
        Ok(())
    }

    /// The active provider, if any.
    #[must_use]
    pub fn current_provider(&self) -> Option<Arc<dyn GitProvider>> {
        self.current.clone()
    }

    /// Configuration the active provider was built from.
    #[must_use]
    pub const fn current_config(&self) -> Option<&ProviderConfig> {
        self.current_config.as_ref()
    }

    /// A previously constructed provider by type.
    #[must_use]
    pub fn provider(&self, provider_type: ProviderType) -> Option<Arc<dyn GitProvider>> {
        self.providers.get(provider_type.as_str()).cloned()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Type and authentication status of the active provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotInitialized` before any successful
    /// initialization, or the provider's own error from `auth_info`.
    pub async fn provider_info(&self) -> DashResult<(ProviderType, AuthInfo)> {
        let provider = self.current.clone().ok_or(ProviderError::NotInitialized)?;
        let auth = provider.auth_info().await?;
        Ok((provider.provider_type(), auth))
    }
}

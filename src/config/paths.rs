// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local clone locations.
//!
//! ```toml
//! [repo_paths]
//! "acme/core" = "~/src/core"        # exact repository
//! "acme/*"    = "~/src/acme/*"      # any acme repository; `*` = repo name
//! ```
//!
//! Lookups try the exact `owner/repo` key first, then the `owner/*` template.
//! `~` is expanded against the home directory when the config is resolved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Map of `owner/repo` (or `owner/*`) to a local directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPaths(BTreeMap<String, PathBuf>);

impl RepoPaths {
    #[must_use]
    pub const fn new(paths: BTreeMap<String, PathBuf>) -> Self {
        Self(paths)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.0.iter()
    }

    /// Expand a leading `~` in every path.
    pub fn resolve(&mut self, home: Option<&Path>) {
        for path in self.0.values_mut() {
            *path = expand_tilde(path, home);
        }
    }

    /// Local directory for `name_with_owner`, if configured.
    #[must_use]
    pub fn path_for(&self, name_with_owner: &str) -> Option<PathBuf> {
        if let Some(path) = self.0.get(name_with_owner) {
            return Some(path.clone());
        }
        let (owner, repo) = name_with_owner.split_once('/')?;
        let template = self.0.get(&format!("{owner}/*"))?;
        Some(PathBuf::from(
            template.to_string_lossy().replace('*', repo),
        ))
    }
}

/// The user's home directory from `HOME` (or `USERPROFILE` on Windows).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Replace a leading `~` component with `home`.
#[must_use]
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// `$XDG_CONFIG_HOME/prdash/config.toml`, falling back to `~/.config`.
#[must_use]
pub fn user_config_file() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|home| home.join(".config")))?;
    Some(base.join("prdash").join("config.toml"))
}

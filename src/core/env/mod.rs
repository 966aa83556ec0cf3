// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable snapshots.
//!
//! # Architecture
//!
//! ```text
//! Env (shared, immutable BTreeMap<String, String>)
//! Sources: current_env(), Env::from_map(), Env::empty()
//! Ops: get / get_non_empty / first_non_empty / with
//! ```
//!
//! Token lookup goes through an `Env` instead of `std::env` so callers (and
//! tests) decide which variables a provider can see.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::sync::Arc;


/// Captures the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[must_use]
pub fn current_env() -> Env {
    Env::from_map(unicode_vars(std::env::vars_os()))
}

fn unicode_vars(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// A set of environment variables.
///
/// Clones share the underlying map; `with` copies on write.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<String, String>>,
}

impl Env {
    /// An environment with no variables.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars),
        }
    }

    /// Returns a copy with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.vars).insert(key.into(), value.into());
        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Gets a value, treating an empty string as unset.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Returns the first key in `keys` with a non-empty value, with that value.
    #[must_use]
    pub fn first_non_empty<'k>(&self, keys: &[&'k str]) -> Option<(&'k str, &str)> {
        keys.iter()
            .find_map(|key| self.get_non_empty(key).map(|value| (*key, value)))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

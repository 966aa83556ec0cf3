// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Origin remote discovery.
//!
//! ```text
//!   origin_url(path)
//!         |
//!         v
//!   GixBackend (reads config, no subprocess)
//!         | repo error
//!         v
//!   ShellBackend (`git config --get remote.origin.url`)
//! ```
//!
//! **`GixBackend`** is tried first; the git CLI covers layouts gix refuses
//! (ownership checks, unusual worktrees).

pub mod backend;


use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{DashResult, GitError};
use backend::{GixBackend, RemoteQuery, ShellBackend};

/// Name of the remote inspected for provider detection.
pub const ORIGIN: &str = "origin";

/// Check if path is inside a git repository.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path) || ShellBackend::is_git_repo(path)
}

/// URL of `remote` in the repository containing `path`.
///
/// # Errors
///
/// Returns `GitError::RepoNotFound` if neither backend can open a repository
/// at `path`, or `GitError::RemoteNotFound` if the remote is not configured.
pub fn remote_url(path: &Path, remote: &str) -> DashResult<String> {
    let url = match GixBackend::remote_url(path, remote) {
        Ok(url) => url,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "gix lookup failed, trying git cli");
            ShellBackend::remote_url(path, remote).map_err(|_| GitError::RepoNotFound {
                path: path.display().to_string(),
            })?
        }
    };
    url.ok_or_else(|| {
        GitError::RemoteNotFound {
            remote: remote.to_string(),
        }
        .into()
    })
}

/// URL of the `origin` remote; an empty `path` means the current directory.
///
/// # Errors
///
/// See [`remote_url`].
pub fn origin_url(path: &Path) -> DashResult<String> {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let url = remote_url(path, ORIGIN)?;
    debug!(path = %path.display(), url = %redact_url(&url), "origin remote");
    Ok(url)
}

static URL_USERINFO: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*://)[^@/]+@").ok());

/// `url` without the `user[:secret]@` part of a scheme URL, for logging.
///
/// Azure DevOps clone URLs often carry a PAT there.
#[must_use]
pub fn redact_url(url: &str) -> Cow<'_, str> {
    match URL_USERINFO.as_ref() {
        Some(regex) => regex.replace(url, "$1"),
        None => Cow::Borrowed(url),
    }
}

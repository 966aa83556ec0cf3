// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! RemoteQuery --> GixBackend   (pure Rust gix, reads .git/config)
//!             --> ShellBackend (git CLI, honours includes and env)
//! ```

use crate::error::{DashResult, GitError, GixError};
use std::path::Path;

/// Read-only queries about a repository's remotes.
pub trait RemoteQuery {
    /// Check if path is inside a git repository.
    fn is_git_repo(path: &Path) -> bool;

    /// URL configured for `remote`, or `None` when the remote is not set.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened.
    fn remote_url(path: &Path, remote: &str) -> DashResult<Option<String>>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl RemoteQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn remote_url(path: &Path, remote: &str) -> DashResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let key = format!("remote.{remote}.url");
        let url = repo
            .config_snapshot()
            .string(key.as_str())
            .map(|value| value.to_string())
            .filter(|value| !value.trim().is_empty());
        Ok(url)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> DashResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl RemoteQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--git-dir"], path).is_ok()
    }

    fn remote_url(path: &Path, remote: &str) -> DashResult<Option<String>> {
        if !Self::is_git_repo(path) {
            return Err(GitError::RepoNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        // `git config --get` exits 1 when the key is unset
        let key = format!("remote.{remote}.url");
        Ok(Self::git_command(&["config", "--get", &key], path)
            .ok()
            .filter(|url| !url.is_empty()))
    }
}

#[cfg(test)]
mod tests;

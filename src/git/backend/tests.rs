// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GixBackend, RemoteQuery, ShellBackend};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn add_remote(path: &Path, name: &str, url: &str) {
    ShellBackend::git_command(&["remote", "add", name, url], path).expect("failed to add remote");
}

#[test]
fn test_gix_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!GixBackend::is_git_repo(temp.path()));

    gix::init(temp.path()).expect("failed to init repo");
    assert!(GixBackend::is_git_repo(temp.path()));
}

#[test]
fn test_shell_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!ShellBackend::is_git_repo(temp.path()));

    ShellBackend::git_command(&["init", "--quiet"], temp.path()).expect("failed to init repo");
    assert!(ShellBackend::is_git_repo(temp.path()));
}

#[test]
fn test_remote_url_missing_remote_is_none() {
    let temp = temp_dir();
    gix::init(temp.path()).expect("failed to init repo");

    assert_eq!(GixBackend::remote_url(temp.path(), "origin").unwrap(), None);
    assert_eq!(ShellBackend::remote_url(temp.path(), "origin").unwrap(), None);
}

#[test]
fn test_backends_agree_on_remote_url() {
    let temp = temp_dir();
    gix::init(temp.path()).expect("failed to init repo");
    add_remote(temp.path(), "origin", "git@github.com:acme/core.git");
    add_remote(temp.path(), "upstream", "https://dev.azure.com/acme/widgets/_git/core");

    for remote in ["origin", "upstream"] {
        assert_eq!(
            GixBackend::remote_url(temp.path(), remote).unwrap(),
            ShellBackend::remote_url(temp.path(), remote).unwrap(),
        );
    }
    assert_eq!(
        GixBackend::remote_url(temp.path(), "origin").unwrap().as_deref(),
        Some("git@github.com:acme/core.git")
    );
}

#[test]
fn test_remote_url_outside_repo_is_error() {
    let temp = temp_dir();
    assert!(ShellBackend::remote_url(temp.path(), "origin").is_err());
}

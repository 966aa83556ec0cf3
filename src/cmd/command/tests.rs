// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{CommandPlan, GH_PAGER, run_command_command, shell_join};
use crate::cli::{ActionArg, CommandArgs};
use crate::config::Config;
use crate::core::env::Env;
use crate::data::integration::ProviderSession;
use crate::data::legacy::{LegacyBackend, LegacyGitHub};
use crate::error::{DashError, ProcessError};
use crate::provider::PrAction;
use crate::provider::manager::ProviderManager;
use crate::provider::test_utils::fake_factory;

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

fn session() -> ProviderSession {
    let legacy = LegacyGitHub::with_env("http://127.0.0.1:9", Env::empty());
    let manager = ProviderManager::with_env(Env::empty()).with_factory(fake_factory);
    ProviderSession::new(manager, Arc::new(legacy) as Arc<dyn LegacyBackend>)
}

fn args(action: ActionArg, run: bool) -> CommandArgs {
    CommandArgs {
        action,
        number: 42,
        repo: "acme/core".to_string(),
        run,
    }
}

#[test]
fn test_shell_join_quotes_only_when_needed() {
    let line = shell_join(&argv(&[
        "az",
        "repos",
        "pr",
        "update",
        "--org",
        "https://dev.azure.com/acme",
        "--title",
        "it's done",
        "",
    ]));
    insta::assert_snapshot!(line, @r"az repos pr update --org https://dev.azure.com/acme --title 'it'\''s done' ''");
}

#[test]
fn test_plan_sets_pager_for_gh_diff() {
    let config = Config::parse("pager = \"delta\"\n").unwrap();
    let plan = CommandPlan::new(
        argv(&["gh", "pr", "diff", "42", "-R", "acme/core"]),
        PrAction::Diff,
        "acme/core",
        &config,
    );
    assert_eq!(plan.env, vec![(GH_PAGER.to_string(), "delta".to_string())]);
    assert_eq!(plan.cwd, None);

    let merge = CommandPlan::new(
        argv(&["gh", "pr", "merge", "42"]),
        PrAction::Merge,
        "acme/core",
        &config,
    );
    assert!(merge.env.is_empty());
}

#[test]
fn test_plan_uses_configured_repo_path() {
    let config = Config::parse("[repo_paths]\n\"acme/*\" = \"/work/acme/*\"\n").unwrap();
    let plan = CommandPlan::new(
        argv(&["gh", "pr", "checkout", "42"]),
        PrAction::Checkout,
        "acme/core",
        &config,
    );
    assert_eq!(plan.cwd, Some(PathBuf::from("/work/acme/core")));
}

#[tokio::test]
async fn test_run_missing_executable() {
    let plan = CommandPlan {
        argv: argv(&["prdash-definitely-not-installed"]),
        cwd: None,
        env: Vec::new(),
    };
    let err = plan.run().await.unwrap_err();
    assert!(matches!(
        err,
        DashError::Process(ref e) if matches!(**e, ProcessError::ExecutableNotFound { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_reports_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let ok = CommandPlan {
        argv: argv(&["sh", "-c", "test \"$GH_PAGER\" = cat"]),
        cwd: Some(dir.path().to_path_buf()),
        env: vec![(GH_PAGER.to_string(), "cat".to_string())],
    };
    ok.run().await.unwrap();

    let failing = CommandPlan {
        argv: argv(&["sh", "-c", "exit 3"]),
        cwd: None,
        env: Vec::new(),
    };
    let err = failing.run().await.unwrap_err();
    assert!(matches!(
        err,
        DashError::Process(ref e) if matches!(**e, ProcessError::NonZeroExit { code: 3, .. })
    ));
}

#[tokio::test]
async fn test_command_without_provider_uses_gh() {
    let session = session();
    let config = Config::default();
    run_command_command(&args(ActionArg::Merge, false), &config, &session)
        .await
        .unwrap();
    let argv = session.command(PrAction::Merge, 42, "acme/core").unwrap();
    assert_eq!(argv[0], "gh");
}

#[tokio::test]
async fn test_command_unavailable_action_is_error() {
    let session = session();
    let config = Config::parse("[provider]\ntype = \"github\"\norganization = \"acme\"\n").unwrap();
    session.init_providers(&config, Path::new(".")).unwrap();

    // the fake provider builds nothing for diff
    let err = run_command_command(&args(ActionArg::Diff, true), &config, &session)
        .await
        .unwrap_err();
    let err = err.downcast_ref::<DashError>().unwrap();
    assert!(err.is_capability_unavailable());

    run_command_command(&args(ActionArg::Ready, false), &config, &session)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_run_rejects_missing_repo_path() {
    let session = session();
    let config = Config::parse("[repo_paths]\n\"acme/core\" = \"/nonexistent/prdash/core\"\n").unwrap();
    let err = run_command_command(&args(ActionArg::Checkout, true), &config, &session)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/prdash/core"));
}

// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `command`: build the platform command line for a pull request action,
//! print it, or run it in the repository's local clone.
//!
//! ```text
//! CommandArgs --> ProviderSession::command --> argv
//!                                               |
//!                          +--------------------+---------------+
//!                          v                                    v
//!                  print (shell-quoted)            CommandPlan { cwd, env }
//!                                                               |
//!                                                 which + tokio::process
//! ```

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::cli::CommandArgs;
use crate::config::Config;
use crate::data::integration::ProviderSession;
use crate::error::{DashResult, ProcessError, Result};
use crate::git;
use crate::provider::PrAction;

/// Environment variable `gh` reads its pager from.
pub const GH_PAGER: &str = "GH_PAGER";

/// A resolved command line ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub argv: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CommandPlan {
    /// Attach the working directory and environment `config` asks for.
    #[must_use]
    pub fn new(argv: Vec<String>, action: PrAction, repo: &str, config: &Config) -> Self {
        let cwd = config.repo_path(repo);
        let mut env = Vec::new();
        if action == PrAction::Diff
            && argv.first().is_some_and(|program| program == "gh")
            && let Some(pager) = &config.pager
        {
            env.push((GH_PAGER.to_string(), pager.clone()));
        }
        Self { argv, cwd, env }
    }

    /// The command line as a shell would print it.
    #[must_use]
    pub fn display(&self) -> String {
        shell_join(&self.argv)
    }

    /// Spawn the command with inherited stdio and wait for it.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the program is not on
    /// `PATH`, `SpawnFailed` if it cannot start, and `NonZeroExit` on failure.
    pub async fn run(&self) -> DashResult<()> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(ProcessError::ExecutableNotFound {
                name: String::new(),
            }
            .into());
        };
        let executable = which::which(program).map_err(|_| ProcessError::ExecutableNotFound {
            name: program.clone(),
        })?;

        let mut command = Command::new(&executable);
        command
            .args(args)
            .envs(self.env.iter().map(|(key, value)| (key.as_str(), value.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        debug!(command = %self.display(), cwd = ?self.cwd, "running");
        let status = command
            .status()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: self.display(),
                source,
            })?;
        if !status.success() {
            return Err(ProcessError::NonZeroExit {
                command: self.display(),
                code: status.code().unwrap_or(-1),
            }
            .into());
        }
        info!(command = %self.display(), "command finished");
        Ok(())
    }
}

/// Run `command`.
///
/// # Errors
///
/// Returns the provider's error when the action is unavailable, or the
/// process error with `--run`.
pub async fn run_command_command(
    args: &CommandArgs,
    config: &Config,
    session: &ProviderSession,
) -> Result<()> {
    let action = PrAction::from(args.action);
    let argv = session.command(action, args.number, &args.repo)?;
    let plan = CommandPlan::new(argv, action, &args.repo, config);

    if !args.run {
        println!("{}", plan.display());
        return Ok(());
    }
    if let Some(cwd) = plan.cwd.as_deref() {
        check_checkout(cwd)?;
    }
    plan.run().await?;
    Ok(())
}

fn check_checkout(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("repository path {} does not exist", path.display());
    }
    if !git::is_git_repo(path) {
        warn!(path = %path.display(), "repository path is not a git checkout");
    }
    Ok(())
}

/// Quote `argv` for display; arguments with shell metacharacters get single quotes.
#[must_use]
pub fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

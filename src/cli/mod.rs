// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for prdash using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! prdash [global options] <command>
//! version
//! options | inis
//! detect <URL>
//! info
//! prs [QUERY...] [--limit N] [--after CURSOR] [--json]
//! issues [QUERY...] [--limit N] [--after CURSOR] [--json]
//! pr <URL> [--json]
//! command <ACTION> <NUMBER> <REPO> [--run]
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::provider::PrAction;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Multi-backend pull request dashboard
///
/// Lists pull requests and issues from GitHub or Azure DevOps.
#[derive(Debug, Parser)]
#[command(
    name = "prdash",
    author,
    version,
    about = "Multi-backend pull request dashboard",
    long_about = "prdash Copyright (C) 2026 prdash contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Lists pull requests and issues from GitHub or Azure DevOps.\n\n\
                  The platform is taken from the [provider] config section when\n\
                  it names a type, otherwise from the origin remote of the\n\
                  repository given with -C (default: the current directory).",
    after_help = "CONFIG FILES:\n\n\
                  prdash loads $XDG_CONFIG_HOME/prdash/config.toml, then prdash.toml\n\
                  in the current directory, then every --ini in order. Later files\n\
                  override earlier ones; PRDASH_SECTION__KEY environment variables\n\
                  override all files. Use --no-default-inis to only use --ini.\n\n\
                  TOKENS:\n\n\
                  GitHub: GH_TOKEN, GITHUB_TOKEN or `gh auth login`.\n\
                  Azure DevOps: AZURE_DEVOPS_TOKEN, ADO_PAT or AZURE_PAT."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by prdash.
    Inis,

    /// Classifies a git remote URL.
    Detect(DetectArgs),

    /// Shows the active provider and its authentication status.
    Info,

    /// Searches pull requests.
    Prs(ListArgs),

    /// Searches issues (work items on Azure DevOps).
    Issues(ListArgs),

    /// Fetches a single pull request by URL.
    Pr(PrArgs),

    /// Builds (and optionally runs) the command line for a pull request action.
    Command(CommandArgs),
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Args)]
pub struct DetectArgs {
    /// Remote URL (HTTPS or SSH).
    #[arg(value_name = "URL")]
    pub url: String,
}

/// Arguments for the `prs` and `issues` commands.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Search terms, joined with spaces.
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Items per page (defaults to global.limit).
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Cursor returned by the previous page.
    #[arg(long, value_name = "CURSOR")]
    pub after: Option<String>,

    /// Prints the response as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for the `pr` command.
#[derive(Debug, Clone, Args)]
pub struct PrArgs {
    /// Pull request URL.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Prints the pull request as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `command` command.
#[derive(Debug, Clone, Args)]
pub struct CommandArgs {
    #[arg(value_name = "ACTION")]
    pub action: ActionArg,

    /// Pull request number.
    #[arg(value_name = "NUMBER")]
    pub number: u64,

    /// Repository, `owner/repo` (GitHub) or `project/repo` (Azure DevOps).
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Runs the command instead of printing it.
    #[arg(long)]
    pub run: bool,
}

/// Pull request actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    /// Show the diff.
    Diff,
    /// Check out the branch locally.
    Checkout,
    /// Merge (complete) the pull request.
    Merge,
    /// Close (abandon) the pull request.
    Close,
    /// Reopen (reactivate) the pull request.
    Reopen,
    /// Mark a draft as ready for review.
    Ready,
    /// Update the branch from its base.
    Update,
    /// Watch checks (policies on Azure DevOps).
    WatchChecks,
}

impl From<ActionArg> for PrAction {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::Diff => Self::Diff,
            ActionArg::Checkout => Self::Checkout,
            ActionArg::Merge => Self::Merge,
            ActionArg::Close => Self::Close,
            ActionArg::Reopen => Self::Reopen,
            ActionArg::Ready => Self::Ready,
            ActionArg::Update => Self::Update,
            ActionArg::WatchChecks => Self::WatchChecks,
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

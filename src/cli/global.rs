// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --log-file FILE   ← global.log_file override
//! -C DIR            ← Repository whose origin remote picks the provider
//!
//! Precedence: CLI flags > PRDASH_* env > --ini > prdash.toml > user config
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Repository directory used for provider detection (defaults to the current directory).
    #[arg(short = 'C', long = "repo", value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Disables auto loading of the user and local config files, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Directory whose origin remote selects the provider.
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        self.repo.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Applies command-line options as the highest-priority config overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be stored in the loader.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        if let Some(level) = self.log_level {
            loader = loader.set("global.output_log_level", i64::from(level))?;
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            loader = loader.set("global.file_log_level", i64::from(level))?;
        }

        if let Some(path) = &self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }

        Ok(loader)
    }
}

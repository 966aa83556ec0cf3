// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Providers --> Command Dispatch
//!   Version | Options | Inis | Detect | Info | Prs | Issues | Pr | Command
//! ```

use std::process::ExitCode;

use prdash::cli::{self, Command};
use prdash::cmd::command::run_command_command;
use prdash::cmd::config::{config_loader, load_config, run_inis_command, run_options_command};
use prdash::cmd::detect::run_detect_command;
use prdash::cmd::fetch::{run_info_command, run_issues_command, run_pr_command, run_prs_command};
use prdash::config::Config;
use prdash::data::integration;
use prdash::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;
use tracing::warn;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}

/// Set up the global provider; on failure commands fall back to legacy GitHub.
fn init_providers(cli: &cli::Cli, config: &Config) {
    if let Err(e) = integration::init_providers(config, cli.global.repo_path()) {
        warn!(error = %e, "provider initialization failed, using legacy github");
    }
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let session = integration::global();
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => config_loader(&cli.global).map(|loader| {
            run_inis_command(&loader.format_loaded_files());
        }),
        Some(Command::Detect(args)) => {
            run_detect_command(args);
            Ok(())
        }
        Some(Command::Info) => {
            init_providers(cli, config);
            run_info_command(session).await
        }
        Some(Command::Prs(args)) => {
            init_providers(cli, config);
            run_prs_command(args, config, session).await
        }
        Some(Command::Issues(args)) => {
            init_providers(cli, config);
            run_issues_command(args, config, session).await
        }
        Some(Command::Pr(args)) => {
            init_providers(cli, config);
            run_pr_command(args, session).await
        }
        Some(Command::Command(args)) => {
            init_providers(cli, config);
            run_command_command(args, config, session).await
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

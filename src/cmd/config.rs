// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for prdash.

use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::config::paths::user_config_file;
use crate::error::Result;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "PRDASH";

/// Local config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "prdash.toml";

/// Build the loader for every configuration source, lowest priority first.
///
/// # Errors
///
/// Returns an error if a command-line override cannot be applied.
pub fn config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        if let Some(user_file) = user_config_file() {
            loader = loader.add_toml_file_optional(user_file);
        }
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    global.apply_overrides(loader.with_env_prefix(ENV_PREFIX))
}

/// Load the merged configuration.
///
/// # Errors
///
/// Returns an error if a source is missing or invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    config_loader(global)?.build()
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> data::integration (ProviderSession)
//!   config (options, inis), detect, fetch (info, prs, issues, pr), command
//! ```

pub mod command;
pub mod config;
pub mod detect;
pub mod fetch;

/// Render `key = value` pairs with aligned keys.
pub(crate) fn aligned(pairs: &[(&str, String)]) -> Vec<String> {
    let width = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(key, value)| format!("{key:<width$} = {value}"))
        .collect()
}

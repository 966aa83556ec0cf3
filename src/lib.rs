// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          info / prs / command
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |     data::integration     |
//!              |  ProviderSession + shim   |
//!              '--+--------------------+---'
//!                 |                    |
//!                 v                    v
//!          provider::manager     data::legacy
//!          detect / select        gh GraphQL
//!                 |
//!          +------+------+
//!          v             v
//!       github         azure
//!      GraphQL       REST + WIQL
//!
//!   +-----------------------------------------+
//!   |  config   TOML + PRDASH_* env layers    |
//!   +-----------------------------------------+
//!   |  git (origin remote)  net (reqwest)     |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, core/env  |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod git;
pub mod logging;
pub mod net;
pub mod provider;

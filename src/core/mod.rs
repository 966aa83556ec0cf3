// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules shared by every layer.
//!
//! ```text
//!   core
//!    |
//!    v
//!   env   Env snapshot, current_env()
//! ```

pub mod env;

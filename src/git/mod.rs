// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!   query.rs    RevisionResolver
//!          \        /
//!           v      v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!     GitQuery   GitDescribe
//!    (gix, read)  (git CLI)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .head_msg   .describe
//!                .git_command
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI, for `describe` whose dirty detection has to
//! match what `git status` reports.

pub mod backend;
pub mod query;

// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::BsysResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

/// Full message of the `HEAD` commit, as `git log -1 --pretty=%B` prints it.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery fails or there is no commit.
pub fn head_message(path: &Path) -> BsysResult<String> {
    GixBackend::head_message(path)
}

// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)       --> GixBackend (pure Rust gix)
//! GitDescribe (describe) --> ShellBackend (git CLI)
//! ```

use crate::error::{BsysResult, GitError, GixError};
use std::path::{Path, PathBuf};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Full message of the commit `HEAD` points to.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery fails or `HEAD` does not
    /// point to a commit.
    fn head_message(path: &Path) -> BsysResult<String>;
}

// --- Describe Trait ---

/// Tag description of the working tree.
pub trait GitDescribe {
    /// Describe `HEAD` relative to the nearest reachable tag, appending
    /// `dirty_marker` when tracked files have uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` when git fails, e.g. outside a repository or
    /// with no reachable tag.
    fn describe(&self, path: &Path, dirty_marker: &str) -> BsysResult<String>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn head_message(path: &Path) -> BsysResult<String> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let commit = repo.head_commit().map_err(|e| GitError::CommandFailed {
            command: "head_commit".to_string(),
            message: e.to_string(),
        })?;
        Ok(commit.message_raw_sloppy().to_string())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    git: PathBuf,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellBackend {
    /// Backend running the given git executable.
    pub fn new(git: impl Into<PathBuf>) -> Self {
        Self { git: git.into() }
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::CommandFailed` carrying git's stderr when it exits
    /// non-zero, or an I/O error when git cannot be started.
    pub fn git_command(&self, args: &[&str], cwd: &Path) -> BsysResult<String> {
        use std::process::Command;

        let output = Command::new(&self.git)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitDescribe for ShellBackend {
    fn describe(&self, path: &Path, dirty_marker: &str) -> BsysResult<String> {
        let dirty = format!("--dirty={dirty_marker}");
        self.git_command(&["describe", "--tags", &dirty], path)
    }
}

#[cfg(test)]
mod tests;

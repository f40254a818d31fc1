// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version resolution and the persisted version record.
//!
//! ```text
//! git describe --tags --dirty=M
//!      | ok                     | error (no repo, no tag)
//!      v                        v
//! format (default|python)    fallback "0.0.0"
//!      \                       /
//!       v                     v
//!        REVISION env (non-empty wins)
//!                 |
//!                 v
//!     persist_if_changed(REVISION file)
//! ```

pub mod format;


use bon::Builder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::types::RevisionFormat;
use crate::error::{BsysResult, FsError, Result};
use crate::git::backend::GitDescribe;

pub use format::python_format;

/// Environment variable that overrides the computed version.
pub const OVERRIDE_ENV: &str = "REVISION";

/// Suffix `git describe` appends for a tree with uncommitted changes.
pub const DIRTY_MARKER: &str = "M";

/// Reads the override from the environment; empty counts as unset.
#[must_use]
pub fn override_from_env() -> Option<String> {
    std::env::var(OVERRIDE_ENV)
        .ok()
        .filter(|value| !value.is_empty())
}

/// Computes the version string of a project.
#[derive(Debug, Clone, Builder)]
pub struct RevisionResolver<D: GitDescribe> {
    #[builder(setters(name = with_describer))]
    describer: D,
    #[builder(setters(name = with_root))]
    root: PathBuf,
    #[builder(setters(name = with_format), default)]
    format: RevisionFormat,
    #[builder(setters(name = with_fallback), default = String::from("0.0.0"))]
    fallback: String,
    #[builder(setters(name = with_override))]
    override_version: Option<String>,
}

impl<D: GitDescribe> RevisionResolver<D> {
    /// Resolves the version.
    ///
    /// A failed describe is not an error: it selects the fallback.
    ///
    /// # Errors
    ///
    /// Returns an error only if the Python conversion cannot run.
    pub fn resolve(&self) -> Result<String> {
        if let Some(value) = self
            .override_version
            .as_deref()
            .filter(|value| !value.is_empty())
        {
            debug!(version = %value, "version overridden by {OVERRIDE_ENV}");
            return Ok(value.to_string());
        }

        match self.describer.describe(&self.root, DIRTY_MARKER) {
            Ok(described) => {
                debug!(described = %described, format = %self.format, "described");
                match self.format {
                    RevisionFormat::Default => Ok(described),
                    RevisionFormat::Python => python_format(&described, DIRTY_MARKER),
                }
            }
            Err(e) => {
                debug!(error = %e, fallback = %self.fallback, "describe failed, using fallback");
                Ok(self.fallback.clone())
            }
        }
    }
}

/// Writes `version` to `path` unless the file already holds it.
///
/// Returns whether the file was written. An unchanged file keeps its mtime.
///
/// # Errors
///
/// Returns an `FsError` if the file exists but cannot be read, or cannot be
/// written.
pub fn persist_if_changed(path: &Path, version: &str) -> BsysResult<bool> {
    match std::fs::read_to_string(path) {
        Ok(existing) if existing.trim_end_matches(['\n', '\r']) == version => {
            debug!(file = %path.display(), "version record unchanged");
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(FsError::io(path, e).into()),
    }

    std::fs::write(path, format!("{version}\n")).map_err(|e| FsError::io(path, e))?;
    info!(file = %path.display(), version = %version, "version record written");
    Ok(true)
}

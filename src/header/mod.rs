// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Umbrella header generation.
//!
//! ```text
//! <dir>/a.h  <dir>/b.hpp  <dir>/_private.h  <dir>/all.h  <dir>/sub/c.h
//!    |          |              x               x            x (flat)
//!    v          v
//! <dir>/all.h
//!   /* auto-generated marker */
//!   #ifndef <PREFIX>_ALL_H
//!   #define <PREFIX>_ALL_H
//!   #include "a.h"
//!   #include "b.hpp"
//!   #endif
//! ```


use anyhow::Context;
use bon::Builder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::utility::fs::walk::{WalkOptions, find_matching};

/// First line of every generated header.
pub const GENERATED_MARKER: &str =
    "/* This file is auto-generated by `bsys header`. Do not edit it by hand. */";

/// Builds `<PREFIX>_<OUTPUT>` in upper case with every non-alphanumeric
/// character replaced by `_`. An empty prefix leaves just the output part.
#[must_use]
pub fn guard_macro(prefix: &str, output: &str) -> String {
    let sanitize = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    };

    if prefix.is_empty() {
        sanitize(output)
    } else {
        format!("{}_{}", sanitize(prefix), sanitize(output))
    }
}

/// Renders the umbrella header text.
#[must_use]
pub fn render(guard: &str, headers: &[String]) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_MARKER);
    out.push('\n');
    out.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
    for header in headers {
        out.push_str(&format!("#include \"{header}\"\n"));
    }
    if !headers.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("#endif /* {guard} */\n"));
    out
}

/// Writes an umbrella header for one directory.
#[derive(Debug, Clone, Builder)]
pub struct HeaderAggregator {
    #[builder(setters(name = with_dir))]
    dir: PathBuf,
    #[builder(setters(name = with_output), default = String::from("all.h"))]
    output: String,
    #[builder(setters(name = with_patterns), default = vec!["*.h".to_string(), "*.hpp".to_string()])]
    patterns: Vec<String>,
    /// Guard prefix; the directory name when unset.
    #[builder(setters(name = with_guard_prefix))]
    guard_prefix: Option<String>,
    #[builder(setters(name = with_dry_run), default)]
    dry_run: bool,
}

impl HeaderAggregator {
    /// Path of the generated file.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(&self.output)
    }

    /// Header names to include, sorted, without private headers and the
    /// umbrella file itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist or a pattern is
    /// invalid.
    pub fn collect(&self) -> Result<Vec<String>> {
        let found = find_matching(&self.dir, &self.patterns, &WalkOptions::flat())
            .with_context(|| format!("failed to scan {}", self.dir.display()))?;

        let headers = found
            .iter()
            .filter_map(|path| path.file_name()?.to_str().map(ToString::to_string))
            .filter(|name| !name.starts_with('_') && *name != self.output)
            .collect::<Vec<_>>();
        debug!(count = headers.len(), dir = %self.dir.display(), "headers collected");
        Ok(headers)
    }

    /// Guard macro for this directory.
    #[must_use]
    pub fn guard(&self) -> String {
        let prefix = self
            .guard_prefix
            .clone()
            .or_else(|| directory_name(&self.dir))
            .unwrap_or_default();
        guard_macro(&prefix, &self.output)
    }

    /// Generates the header and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if scanning fails or the file cannot be written.
    pub fn run(&self) -> Result<PathBuf> {
        let headers = self.collect()?;
        let content = render(&self.guard(), &headers);
        let path = self.output_path();

        if self.dry_run {
            info!(file = %path.display(), headers = ?headers, "[dry-run] would write umbrella header");
            return Ok(path);
        }

        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(file = %path.display(), count = headers.len(), "umbrella header written");
        Ok(path)
    }
}

/// Final component of `dir`, resolving `.` and `..` against the filesystem.
fn directory_name(dir: &Path) -> Option<String> {
    let resolved = dir.canonicalize().ok()?;
    resolved
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
}

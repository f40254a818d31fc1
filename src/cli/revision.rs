// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version-related command arguments.
//!
//! ```text
//! revision [--format default|python] [FORMAT]
//! update-build-system [--create] [--branch BRANCH]
//! header [DIR] [--output NAME] [--guard-prefix P]
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::types::RevisionFormat;
use crate::error::{BsysResult, usage};

/// Arguments for the `revision` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RevisionArgs {
    /// Output format. `python` yields PEP 440 development releases; any other
    /// value selects the tag-describe string.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Format given positionally; at most one is accepted.
    #[arg(value_name = "FORMAT", hide = true, num_args = 0..)]
    pub positional: Vec<String>,
}

impl RevisionArgs {
    /// Effective output format.
    ///
    /// `--format` and the positional form are the same single argument;
    /// with neither, `default`.
    ///
    /// # Errors
    ///
    /// Returns a usage error when more than one argument is given, counting
    /// `--format` as one.
    pub fn resolved_format(&self) -> BsysResult<RevisionFormat> {
        let count = usize::from(self.format.is_some()) + self.positional.len();
        if count > 1 {
            return Err(usage(format!(
                "revision takes at most one argument, got {count}"
            )));
        }

        let value = self
            .format
            .as_deref()
            .or_else(|| self.positional.first().map(String::as_str));
        Ok(value.map_or(RevisionFormat::Default, RevisionFormat::from_flag))
    }
}

/// Arguments for the `update-build-system` command.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    /// Create the vendored directory when it does not exist yet.
    #[arg(long)]
    pub create: bool,

    /// Branch to fetch (default: update.branch).
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,
}

/// Arguments for the `header` command.
#[derive(Debug, Clone, Default, Args)]
pub struct HeaderArgs {
    /// Directory to scan, relative to the project root.
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Name of the umbrella file (default: header.output).
    #[arg(short = 'o', long, value_name = "NAME")]
    pub output: Option<String>,

    /// Guard macro prefix (default: the directory name).
    #[arg(long = "guard-prefix", value_name = "PREFIX")]
    pub guard_prefix: Option<String>,
}

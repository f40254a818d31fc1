// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision command implementation for bsys.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::revision::RevisionArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::backend::ShellBackend;
use crate::revision::{RevisionResolver, override_from_env, persist_if_changed};

/// Prints the project version and records it in the version file.
///
/// # Errors
///
/// Returns a usage error for more than one positional argument, or an error
/// if the version file cannot be written.
pub fn run_revision_command(args: &RevisionArgs, config: &Config, root: &Path) -> Result<()> {
    let format = args.resolved_format()?;

    let version = RevisionResolver::builder()
        .with_describer(ShellBackend::new(&config.tools.git))
        .with_root(root.to_path_buf())
        .with_format(format)
        .with_fallback(config.revision.fallback.clone())
        .maybe_with_override(override_from_env())
        .build()
        .resolve()?;

    println!("{version}");

    let record = root.join(&config.revision.file);
    if config.global.dry {
        info!(file = %record.display(), version = %version, "[dry-run] would record version");
        return Ok(());
    }

    persist_if_changed(&record, &version)
        .with_context(|| format!("failed to record version in {}", record.display()))?;
    Ok(())
}

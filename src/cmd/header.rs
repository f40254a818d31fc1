// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Header command implementation for bsys.

use std::path::Path;

use crate::cli::revision::HeaderArgs;
use crate::config::Config;
use crate::error::{Result, usage};
use crate::header::HeaderAggregator;

/// Writes the umbrella header for a directory and prints its path.
///
/// # Errors
///
/// Returns a usage error for an output name with a path separator, or an
/// error if the directory cannot be scanned or the header cannot be written.
pub fn run_header_command(args: &HeaderArgs, config: &Config, root: &Path) -> Result<()> {
    let dir = args
        .dir
        .as_ref()
        .map_or_else(|| root.to_path_buf(), |dir| root.join(dir));

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.header.output.clone());
    if output.is_empty() || output.contains(['/', '\\']) {
        return Err(usage(format!("--output must be a plain file name, got '{output}'")).into());
    }

    let path = HeaderAggregator::builder()
        .with_dir(dir)
        .with_output(output)
        .with_patterns(config.header.patterns.clone())
        .maybe_with_guard_prefix(args.guard_prefix.clone())
        .with_dry_run(config.global.dry)
        .build()
        .run()?;

    println!("{}", path.display());
    Ok(())
}

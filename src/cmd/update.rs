// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build-system update command implementation for bsys.

use std::path::Path;

use crate::cli::revision::UpdateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::update::BuildSystemUpdater;

use super::ctrl_c_token;

/// Replaces the vendored build system with the configured branch archive.
///
/// # Errors
///
/// Returns a precondition error outside the project root (without
/// `--create`) or when the archive has an unexpected layout; download and
/// unzip failures otherwise.
pub async fn run_update_command(args: &UpdateArgs, config: &Config, root: &Path) -> Result<()> {
    BuildSystemUpdater::from_config(root, &config.update, &config.tools, args.branch.as_deref())
        .create(args.create)
        .dry_run(config.global.dry)
        .cancel_on(ctrl_c_token())
        .run()
        .await
}

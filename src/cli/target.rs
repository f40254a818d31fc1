// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target command arguments.

use clap::Args;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Targets to run, with their dependencies.
    #[arg(value_name = "TARGET", required = true, num_args = 1..)]
    pub targets: Vec<String>,
}

/// Arguments for the `targets` command.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetsArgs {
    /// Print the definitions as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `ci` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CiArgs {
    /// Run the targets even for tag pushes and work-in-progress commits.
    #[arg(long)]
    pub force: bool,
}

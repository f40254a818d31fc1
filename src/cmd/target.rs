// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target, target listing and CI command implementations for bsys.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::ci::{REF_ENV, commit_message, should_skip};
use crate::cli::target::{CiArgs, TargetsArgs};
use crate::config::Config;
use crate::config::types::TargetConfig;
use crate::error::Result;
use crate::target::TargetRunner;

use super::ctrl_c_token;

/// Runs `targets` and their dependencies.
///
/// # Errors
///
/// Returns a configuration error for unknown targets or dependency cycles,
/// and the first failing command's error otherwise.
pub async fn run_target_command(targets: &[String], config: &Config, root: &Path) -> Result<()> {
    TargetRunner::new(root, config.targets())
        .with_revision(config.revision.clone())
        .with_git(config.tools.git.clone())
        .with_dry_run(config.global.dry)
        .with_cancel_token(ctrl_c_token())
        .run(targets)
        .await?;

    info!(targets = ?targets, "targets completed successfully");
    Ok(())
}

/// Lists the effective targets.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_targets_command(args: &TargetsArgs, config: &Config) -> Result<()> {
    let targets = config.targets();
    if args.json {
        let json =
            serde_json::to_string_pretty(&targets).context("failed to serialize targets")?;
        println!("{json}");
    } else {
        for line in format_targets(&targets) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Runs the CI targets unless the push should be skipped.
///
/// # Errors
///
/// Returns the target runner's error.
pub async fn run_ci_command(args: &CiArgs, config: &Config, root: &Path) -> Result<()> {
    let git_ref = std::env::var(REF_ENV).ok();
    let message = commit_message(root);

    if !args.force
        && let Some(reason) = should_skip(
            git_ref.as_deref(),
            message.as_deref(),
            &config.ci.skip_markers,
        )
    {
        info!(reason = %reason, "skipping CI targets");
        println!("CI skipped: {reason}");
        return Ok(());
    }

    run_target_command(&config.ci.targets, config, root).await
}

/// One block per target: name and description, then its settings indented.
#[must_use]
pub fn format_targets(targets: &BTreeMap<String, TargetConfig>) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, target) in targets {
        if target.description.is_empty() {
            lines.push(name.clone());
        } else {
            lines.push(format!("{name:<10} {}", target.description));
        }
        if !target.depends.is_empty() {
            lines.push(format!("    depends:  {}", target.depends.join(", ")));
        }
        if let Some(required) = &target.requires_file {
            lines.push(format!("    requires: {}", required.display()));
        }
        if !target.remove.is_empty() {
            lines.push(format!("    removes:  {}", target.remove.join(" ")));
        }
        for command in &target.commands {
            lines.push(format!("    runs:     {}", command.join(" ")));
        }
    }
    lines
}

// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sequential target execution.
//!
//! ```text
//! TargetRunner::new(root, targets)
//!   .with_revision()  .with_git()  .with_dry_run()  .with_cancel_token()
//!   .run(["check"]).await
//!       plan --> per target:
//!         requires_file missing?  --> skip
//!         remove globs
//!         {version} needed?       --> resolve once, persist, export REVISION
//!         commands, one at a time; first failure stops everything
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::types::{RevisionConfig, TargetConfig};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BsysError, ProcessError, Result};
use crate::git::backend::ShellBackend;
use crate::revision::{OVERRIDE_ENV, RevisionResolver, override_from_env, persist_if_changed};
use crate::utility::fs::walk::{WalkOptions, find_matching};

use super::plan::plan;
use super::{ROOT_PLACEHOLDER, VERSION_PLACEHOLDER, substitute};

/// Runs targets one after another in dependency order.
pub struct TargetRunner {
    root: PathBuf,
    targets: BTreeMap<String, TargetConfig>,
    revision: RevisionConfig,
    git: PathBuf,
    cancel_token: CancellationToken,
    dry_run: bool,
}

impl TargetRunner {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, targets: BTreeMap<String, TargetConfig>) -> Self {
        Self {
            root: root.into(),
            targets,
            revision: RevisionConfig::default(),
            git: PathBuf::from("git"),
            cancel_token: CancellationToken::new(),
            dry_run: false,
        }
    }

    /// Version record settings used for `{version}` and `revision = true`.
    #[must_use]
    pub fn with_revision(mut self, revision: RevisionConfig) -> Self {
        self.revision = revision;
        self
    }

    #[must_use]
    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Runs `requested` and their dependencies.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for unknown targets or cycles, and the first
    /// failing command's `ProcessError` otherwise; its exit code is the one
    /// the process should exit with.
    pub async fn run(&self, requested: &[String]) -> Result<()> {
        let order = plan(&self.targets, requested)?;
        info!(targets = ?order, "running targets");

        let mut version: Option<String> = None;

        for (i, name) in order.iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                return Err(BsysError::from(ProcessError::Interrupted {
                    command: name.clone(),
                }))
                .with_context(|| format!("interrupted before target '{name}'"));
            }

            let Some(target) = self.targets.get(name) else {
                continue;
            };

            info!(target = %name, index = i + 1, total = order.len(), "target");
            self.run_target(name, target, &mut version)
                .await
                .with_context(|| format!("target '{name}' failed"))?;
        }

        Ok(())
    }

    async fn run_target(
        &self,
        name: &str,
        target: &TargetConfig,
        version: &mut Option<String>,
    ) -> Result<()> {
        if let Some(required) = &target.requires_file
            && !self.root.join(required).exists()
        {
            info!(target = %name, file = %required.display(), "required file missing, skipping");
            return Ok(());
        }

        if !target.remove.is_empty() {
            self.remove(&target.remove)?;
        }

        let needs_version = target.revision
            || target
                .commands
                .iter()
                .flatten()
                .any(|arg| arg.contains(VERSION_PLACEHOLDER));
        if needs_version && version.is_none() {
            *version = Some(self.resolve_version()?);
        }

        let root = self.root.display().to_string();
        for command in &target.commands {
            let argv: Vec<String> = command
                .iter()
                .map(|arg| {
                    substitute(
                        arg,
                        &[
                            (ROOT_PLACEHOLDER, root.as_str()),
                            (VERSION_PLACEHOLDER, version.as_deref().unwrap_or_default()),
                        ],
                    )
                })
                .collect();

            let mut process = ProcessBuilder::from_argv(&argv)
                .with_context(|| format!("target '{name}' has an empty command"))?
                .cwd(&self.root)
                .inherit_stdio();
            if let Some(v) = version.as_deref() {
                process = process.env(OVERRIDE_ENV, v);
            }

            if self.dry_run {
                info!(target = %name, command = %process.command_line(), "[dry-run] would run");
                continue;
            }

            debug!(target = %name, command = %process.command_line(), "running");
            process.run_with_cancellation(self.cancel_token.clone()).await?;
        }

        Ok(())
    }

    /// Deletes everything below the root matching `patterns`.
    fn remove(&self, patterns: &[String]) -> Result<()> {
        let found = find_matching(&self.root, patterns, &WalkOptions::for_cleanup(patterns))?;

        let mut removed: Vec<&Path> = Vec::new();
        for path in &found {
            // Sorted order puts parents first.
            if removed.iter().any(|parent| path.starts_with(parent)) {
                continue;
            }

            if self.dry_run {
                info!(path = %path.display(), "[dry-run] would remove");
            } else if path.is_dir() && !path.is_symlink() {
                std::fs::remove_dir_all(path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                info!(path = %path.display(), "removed");
            } else {
                std::fs::remove_file(path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                info!(path = %path.display(), "removed");
            }
            removed.push(path);
        }

        if found.is_empty() {
            debug!(patterns = ?patterns, "nothing to remove");
        }
        Ok(())
    }

    /// Resolves the version and persists it next to the project.
    fn resolve_version(&self) -> Result<String> {
        let version = RevisionResolver::builder()
            .with_describer(ShellBackend::new(&self.git))
            .with_root(self.root.clone())
            .with_format(self.revision.format)
            .with_fallback(self.revision.fallback.clone())
            .maybe_with_override(override_from_env())
            .build()
            .resolve()?;

        let record = self.root.join(&self.revision.file);
        if self.dry_run {
            info!(file = %record.display(), version = %version, "[dry-run] would record version");
        } else if let Err(e) = persist_if_changed(&record, &version) {
            warn!(file = %record.display(), error = %e, "failed to record version");
            return Err(e.into());
        }
        Ok(version)
    }
}

// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Vendored build-system refresh.
//!
//! ```text
//! guard: <root>/<dir> exists, or --create
//!   |
//!   v
//! <dir> --> <dir>.bak          (stale backup removed first)
//!   |
//!   v
//! <root>/.bsys-update-XXXX/    (staging, removed on exit)
//!   archive.zip  <-- GET url{branch}
//!   extract/     <-- unzip -q -o archive.zip -d extract
//!     <archive_root>/<dir> --rename--> <root>/<dir>
//! ```


use anyhow::Context;
use bon::Builder;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::types::{ToolsConfig, UpdateConfig};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{BsysError, Result, precondition};
use crate::net::{Downloader, ProgressDisplay};

/// Placeholder replaced by the branch name in the URL and archive root.
pub const BRANCH_PLACEHOLDER: &str = "{branch}";

/// Replaces the vendored build-system directory with a fresh copy.
#[derive(Debug, Clone, Builder)]
pub struct BuildSystemUpdater {
    /// Project root holding the vendored directory.
    #[builder(setters(name = with_root))]
    root: PathBuf,
    /// Archive URL template.
    #[builder(setters(name = with_url_template))]
    url_template: String,
    #[builder(setters(name = with_branch))]
    branch: String,
    /// Vendored directory, relative to the root.
    #[builder(setters(name = with_directory))]
    directory: PathBuf,
    /// Top-level directory of the archive, as a template.
    #[builder(setters(name = with_archive_root))]
    archive_root: String,
    #[builder(setters(name = with_unzip), default = PathBuf::from("unzip"))]
    unzip: PathBuf,
    /// Proceed when the vendored directory does not exist yet.
    #[builder(setters(name = with_create), default)]
    create: bool,
    #[builder(setters(name = with_dry_run), default)]
    dry_run: bool,
    #[builder(setters(name = with_progress), default)]
    progress: ProgressDisplay,
    #[builder(setters(name = with_cancel_token), default)]
    cancel: CancellationToken,
}

impl BuildSystemUpdater {
    /// Updater configured from the `[update]` and `[tools]` sections.
    ///
    /// `branch` overrides `update.branch` when given.
    #[must_use]
    pub fn from_config(
        root: &Path,
        update: &UpdateConfig,
        tools: &ToolsConfig,
        branch: Option<&str>,
    ) -> Self {
        Self::builder()
            .with_root(root.to_path_buf())
            .with_url_template(update.url.clone())
            .with_branch(branch.unwrap_or(&update.branch).to_string())
            .with_directory(update.directory.clone())
            .with_archive_root(update.archive_root.clone())
            .with_unzip(tools.unzip.clone())
            .build()
    }

    #[must_use]
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: ProgressDisplay) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Archive URL for the configured branch.
    #[must_use]
    pub fn url(&self) -> String {
        self.url_template.replace(BRANCH_PLACEHOLDER, &self.branch)
    }

    /// Vendored directory as an absolute path.
    #[must_use]
    pub fn target_dir(&self) -> PathBuf {
        self.root.join(&self.directory)
    }

    /// Where the previous vendored directory is kept.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        let mut backup = self.target_dir().into_os_string();
        backup.push(".bak");
        PathBuf::from(backup)
    }

    /// Path of the vendored directory inside the extracted archive.
    fn inner_dir(&self, extract_dir: &Path) -> PathBuf {
        extract_dir
            .join(self.archive_root.replace(BRANCH_PLACEHOLDER, &self.branch))
            .join(&self.directory)
    }

    /// Runs the update.
    ///
    /// # Errors
    ///
    /// Returns a precondition error (exit 255) when the vendored directory is
    /// missing without `--create`, or when the archive lacks the expected
    /// inner directory. A missing unzip tool, download failures and unzip
    /// failures propagate as process and network errors.
    pub async fn run(&self) -> Result<()> {
        let target = self.target_dir();

        if !target.is_dir() && !self.create {
            return Err(precondition(format!(
                "{} not found; run from the project root or pass --create",
                target.display()
            ))
            .into());
        }

        let url = self.url();

        if self.dry_run {
            if target.is_dir() {
                info!(from = %target.display(), to = %self.backup_dir().display(), "[dry-run] would back up");
            }
            info!(url = %url, "[dry-run] would download");
            info!(unzip = %self.unzip.display(), "[dry-run] would extract into a staging directory");
            info!(to = %target.display(), "[dry-run] would install");
            return Ok(());
        }

        // Resolved before anything is moved, so a missing tool leaves the tree as it was.
        let unzip = ProcessBuilder::which(&self.unzip).map_err(BsysError::from)?;

        if self.create
            && let Some(parent) = target.parent()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        self.backup(&target).await?;

        let staging = tempfile::Builder::new()
            .prefix(".bsys-update-")
            .tempdir_in(&self.root)
            .with_context(|| format!("failed to create staging directory in {}", self.root.display()))?;
        debug!(staging = %staging.path().display(), "staging directory created");

        let archive = staging.path().join("archive.zip");
        Downloader::new()
            .url(&url)
            .file(&archive)
            .progress(self.progress)
            .cancel_on(self.cancel.clone())
            .download()
            .await
            .with_context(|| format!("failed to download {url}"))?;
        info!(url = %url, "archive downloaded");

        let extract_dir = staging.path().join("extract");
        tokio::fs::create_dir(&extract_dir)
            .await
            .with_context(|| format!("failed to create {}", extract_dir.display()))?;

        unzip
            .args(["-q", "-o"])
            .arg(&archive)
            .arg("-d")
            .arg(&extract_dir)
            .run_with_cancellation(self.cancel.clone())
            .await
            .context("failed to extract archive")?;

        let inner = self.inner_dir(&extract_dir);
        if !inner.is_dir() {
            return Err(precondition(format!(
                "archive from {url} does not contain {}",
                inner
                    .strip_prefix(&extract_dir)
                    .unwrap_or(&inner)
                    .display()
            ))
            .into());
        }

        tokio::fs::rename(&inner, &target)
            .await
            .with_context(|| format!("failed to move {} into place", inner.display()))?;
        info!(directory = %target.display(), branch = %self.branch, "build system updated");

        staging
            .close()
            .context("failed to remove staging directory")?;
        Ok(())
    }

    /// Moves the current vendored directory aside, replacing a stale backup.
    async fn backup(&self, target: &Path) -> Result<()> {
        if !target.is_dir() {
            return Ok(());
        }

        let backup = self.backup_dir();
        if backup.exists() {
            debug!(backup = %backup.display(), "removing stale backup");
            tokio::fs::remove_dir_all(&backup)
                .await
                .with_context(|| format!("failed to remove {}", backup.display()))?;
        }

        tokio::fs::rename(target, &backup)
            .await
            .with_context(|| format!("failed to back up {}", target.display()))?;
        info!(backup = %backup.display(), "previous build system backed up");
        Ok(())
    }
}

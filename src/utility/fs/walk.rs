// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use wax::{Glob, Program};

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited, 1 = direct children)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
    /// Report matching directories as well as files
    #[builder(setters(name = with_include_dirs), default = false)]
    include_dirs: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn include_dirs(&self) -> bool {
        self.include_dirs
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for the files directly inside one directory.
    #[must_use]
    pub fn flat() -> Self {
        Self::builder().with_max_depth(1).build()
    }

    /// Options for deleting build artifacts below a project root.
    ///
    /// Directories are reported too, `.git` and virtual environments are
    /// never entered, and the depth is bounded by the deepest pattern unless
    /// a pattern contains `**`.
    #[must_use]
    pub fn for_cleanup(patterns: &[String]) -> Self {
        let max_depth = if patterns.iter().any(|p| p.contains("**")) {
            None
        } else {
            patterns.iter().map(|p| p.split('/').count()).max()
        };
        Self::builder()
            .maybe_with_max_depth(max_depth)
            .with_include_dirs(true)
            .with_skip_dirs(vec![
                ".git".to_string(),
                ".venv".to_string(),
                "venv".to_string(),
            ])
            .build()
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    // evaluated before descending
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Finds entries whose path relative to `root` matches any of the glob
/// patterns, using parallel traversal.
///
/// Results are sorted so callers see a stable order regardless of thread
/// scheduling.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - A glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use bsys_rs::utility::fs::walk::{find_matching, WalkOptions};
///
/// let headers = find_matching("include", &["*.h".to_string()], &WalkOptions::flat())?;
/// for file in headers {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_matching<P: AsRef<Path>>(
    root: P,
    patterns: &[String],
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.is_dir() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let globs = patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let (tx, rx) = bounded::<PathBuf>(1000);
    let globs = Arc::new(globs);
    let root_path = root.to_path_buf();
    let include_dirs = options.include_dirs();

    let parallel = build_walker(root, options).build_parallel();

    // The walker blocks until done, so results are drained on a separate thread
    // to keep the bounded channel from filling up.
    let collector = std::thread::spawn(move || rx.iter().collect::<Vec<_>>());

    parallel.run(|| {
        let tx = tx.clone();
        let globs = Arc::clone(&globs);
        let root_path = root_path.clone();

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    let wanted = entry.file_type().is_some_and(|ft| {
                        ft.is_file() || ft.is_symlink() || (include_dirs && ft.is_dir())
                    });
                    if wanted
                        && entry.depth() > 0
                        && let Ok(rel_path) = entry.path().strip_prefix(&root_path)
                        && globs.iter().any(|glob| glob.is_match(rel_path))
                    {
                        let _ = tx.send(entry.path().to_path_buf());
                    }
                }
                Err(e) => warn!(error = %e, "walk error"),
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut found = collector
        .join()
        .map_err(|_| anyhow::anyhow!("walk collector thread panicked"))?;
    found.sort();
    Ok(found)
}

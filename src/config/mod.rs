// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for bsys.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (built-in targets included)
//! 2. bsys.toml in the project root
//! 3. --ini FILE (in order)
//! 4. BSYS_* env vars
//! 5. CLI overrides (--set, --dry, --log-level)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! BSYS_REVISION_FALLBACK=1.0.0  → revision.fallback = "1.0.0"
//! BSYS_UPDATE_BRANCH=develop    → update.branch = "develop"
//! BSYS_TOOLS_UNZIP=/opt/unzip   → tools.unzip = "/opt/unzip"
//! ```
//!
//! # Target Overrides
//!
//! ```toml
//! [targets.analyze]
//! commands = [["pylint", "mypackage"]]
//!
//! [targets.docs]
//! description = "Build the documentation"
//! depends = ["build"]
//! commands = [["sphinx-build", "docs", "build/docs"]]
//! ```

pub mod loader;
pub mod merge;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use merge::TargetConfigOverride;
use types::{
    CiConfig, GlobalConfig, HeaderConfig, RevisionConfig, TargetConfig, ToolsConfig, UpdateConfig,
    builtin_targets,
};

/// Name of the project configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "bsys.toml";

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "BSYS";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Version resolution.
    pub revision: RevisionConfig,
    /// Vendored build-system updates.
    pub update: UpdateConfig,
    /// Umbrella header generation.
    pub header: HeaderConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// CI pipeline.
    pub ci: CiConfig,
    /// Per-target overrides and additional targets (field-level merging).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetConfigOverride>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bsys_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("bsys.toml")
    ///     .with_env_prefix("BSYS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// All targets: built-ins with their overrides applied, plus targets
    /// defined only in configuration.
    #[must_use]
    pub fn targets(&self) -> BTreeMap<String, TargetConfig> {
        let mut targets = builtin_targets(&self.revision.file);
        for (name, override_config) in &self.targets {
            let base = targets.remove(name).unwrap_or_default();
            targets.insert(
                name.clone(),
                merge::merge_target_config(&base, override_config),
            );
        }
        targets
    }

    /// Validate values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.revision.fallback.trim().is_empty() {
            return Err(invalid("revision", "fallback", "must not be empty").into());
        }
        if self.update.directory.as_os_str().is_empty() || self.update.directory.is_absolute() {
            return Err(
                invalid("update", "directory", "must be a relative, non-empty path").into(),
            );
        }
        if self.header.output.is_empty() || self.header.output.contains(['/', '\\']) {
            return Err(invalid("header", "output", "must be a plain file name").into());
        }
        for pattern in &self.header.patterns {
            if let Err(e) = wax::Glob::new(pattern) {
                return Err(invalid("header", "patterns", &e.to_string()).into());
            }
        }
        for (name, target) in &self.targets {
            if let Some(commands) = &target.commands
                && commands.iter().any(Vec::is_empty)
            {
                return Err(invalid(
                    &format!("targets.{name}"),
                    "commands",
                    "every command needs at least a program name",
                )
                .into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_revision_options(&mut options);
        self.format_update_options(&mut options);
        self.format_header_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_ci_options(&mut options);
        self.format_target_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_revision_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "revision.file".into(),
            self.revision.file.display().to_string(),
        );
        options.insert("revision.fallback".into(), self.revision.fallback.clone());
        options.insert("revision.format".into(), self.revision.format.to_string());
    }

    fn format_update_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("update.url".into(), self.update.url.clone());
        options.insert("update.branch".into(), self.update.branch.clone());
        options.insert(
            "update.directory".into(),
            self.update.directory.display().to_string(),
        );
        options.insert(
            "update.archive_root".into(),
            self.update.archive_root.clone(),
        );
    }

    fn format_header_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("header.output".into(), self.header.output.clone());
        options.insert("header.patterns".into(), self.header.patterns.join(", "));
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git.display().to_string());
        options.insert("tools.unzip".into(), self.tools.unzip.display().to_string());
    }

    fn format_ci_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("ci.targets".into(), self.ci.targets.join(", "));
        options.insert("ci.skip_markers".into(), self.ci.skip_markers.join(", "));
    }

    fn format_target_options(&self, options: &mut BTreeMap<String, String>) {
        for (name, target) in self.targets() {
            let commands = target
                .commands
                .iter()
                .map(|argv| argv.join(" "))
                .collect::<Vec<_>>()
                .join("; ");
            options.insert(format!("targets.{name}.commands"), commands);
            if !target.depends.is_empty() {
                options.insert(
                    format!("targets.{name}.depends"),
                    target.depends.join(", "),
                );
            }
        }
    }
}

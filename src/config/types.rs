// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for bsys.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, RevisionConfig, UpdateConfig, HeaderConfig,
//!         ToolsConfig, CiConfig, targets: name --> TargetConfigOverride
//! ```
//!
//! # Built-in Targets
//!
//! ```text
//! build    python3 setup.py sdist bdist_wheel     (needs {version})
//! check    --> build, python3 -m unittest discover
//! analyze  BuildSystem/python/python_analyzer.py {root}
//! install  --> build, python3 -m pip install .
//! clean    remove build/ dist/ *.egg-info <revision.file>
//! prereqs  license scanner, only if Dependencies/prereqs.json exists
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;

/// Output format of the version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionFormat {
    /// The tag-describe string as git prints it.
    #[default]
    Default,
    /// PEP 440 development release (`1.2.3.dev5`).
    Python,
}

impl RevisionFormat {
    /// Parses a `--format` value. Anything but `python` silently selects the
    /// default format.
    #[must_use]
    pub fn from_flag(value: &str) -> Self {
        if value.eq_ignore_ascii_case("python") {
            Self::Python
        } else {
            Self::Default
        }
    }
}

impl std::fmt::Display for RevisionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Python => write!(f, "python"),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log what would be done without doing it.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file (empty = no log file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Version resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevisionConfig {
    /// File the version record is persisted to, relative to the project root.
    pub file: PathBuf,
    /// Version used when no tag is reachable.
    pub fallback: String,
    /// Format used when targets substitute `{version}`.
    pub format: RevisionFormat,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("REVISION"),
            fallback: "0.0.0".to_string(),
            format: RevisionFormat::Python,
        }
    }
}

/// Vendored build-system update settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateConfig {
    /// Archive URL; `{branch}` is replaced with the requested branch.
    pub url: String,
    /// Branch fetched when `--branch` is not given.
    pub branch: String,
    /// Vendored directory, relative to the project root.
    pub directory: PathBuf,
    /// Top-level directory inside the archive; `{branch}` is replaced.
    pub archive_root: String,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/klassen-software-solutions/BuildSystem/archive/{branch}.zip"
                .to_string(),
            branch: "master".to_string(),
            directory: PathBuf::from("BuildSystem"),
            archive_root: "BuildSystem-{branch}".to_string(),
        }
    }
}

/// Umbrella header settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Name of the generated umbrella header.
    pub output: String,
    /// Globs selecting header files.
    pub patterns: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            output: "all.h".to_string(),
            patterns: vec!["*.h".to_string(), "*.hpp".to_string()],
        }
    }
}

/// External tool paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Git executable.
    pub git: PathBuf,
    /// Unzip executable, called as `unzip -q -o <archive> -d <dir>`.
    pub unzip: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            unzip: PathBuf::from("unzip"),
        }
    }
}

/// CI pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CiConfig {
    /// Targets run by `bsys ci`.
    pub targets: Vec<String>,
    /// Commit message markers (case-insensitive) that skip the pipeline.
    pub skip_markers: Vec<String>,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                "build".to_string(),
                "check".to_string(),
                "analyze".to_string(),
            ],
            skip_markers: vec!["[wip]".to_string()],
        }
    }
}

/// A fully resolved build target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// One-line description shown by `bsys targets`.
    pub description: String,
    /// Targets that must run first.
    pub depends: Vec<String>,
    /// Commands, each an argv list run without a shell.
    pub commands: Vec<Vec<String>>,
    /// Skip the target when this file (relative to the root) is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_file: Option<PathBuf>,
    /// Globs removed (relative to the root) before the commands run.
    pub remove: Vec<String>,
    /// Whether the target needs the version record.
    pub revision: bool,
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

/// Built-in target definitions for a Python package project.
///
/// `clean` removes `revision_file` along with the packaging artifacts.
#[must_use]
pub fn builtin_targets(revision_file: &Path) -> BTreeMap<String, TargetConfig> {
    let mut targets = BTreeMap::new();

    targets.insert(
        "prereqs".to_string(),
        TargetConfig {
            description: "Scan dependency licenses".to_string(),
            commands: vec![argv(&["python3", "BuildSystem/common/license_scanner.py"])],
            requires_file: Some(PathBuf::from("Dependencies/prereqs.json")),
            ..TargetConfig::default()
        },
    );
    targets.insert(
        "build".to_string(),
        TargetConfig {
            description: "Build the source and wheel packages".to_string(),
            commands: vec![argv(&["python3", "setup.py", "sdist", "bdist_wheel"])],
            revision: true,
            ..TargetConfig::default()
        },
    );
    targets.insert(
        "check".to_string(),
        TargetConfig {
            description: "Run the unit tests".to_string(),
            depends: argv(&["build"]),
            commands: vec![argv(&[
                "python3",
                "-m",
                "unittest",
                "discover",
                "--start-directory",
                "Tests",
            ])],
            ..TargetConfig::default()
        },
    );
    targets.insert(
        "analyze".to_string(),
        TargetConfig {
            description: "Run static analysis".to_string(),
            commands: vec![argv(&[
                "python3",
                "BuildSystem/python/python_analyzer.py",
                "{root}",
            ])],
            ..TargetConfig::default()
        },
    );
    targets.insert(
        "install".to_string(),
        TargetConfig {
            description: "Install the package".to_string(),
            depends: argv(&["build"]),
            commands: vec![argv(&["python3", "-m", "pip", "install", "--upgrade", "."])],
            ..TargetConfig::default()
        },
    );
    targets.insert(
        "clean".to_string(),
        TargetConfig {
            description: "Remove build artifacts and the version record".to_string(),
            remove: vec![
                "build".to_string(),
                "dist".to_string(),
                "*.egg-info".to_string(),
                revision_file.to_string_lossy().into_owned(),
            ],
            ..TargetConfig::default()
        },
    );

    targets
}

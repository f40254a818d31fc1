// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target configuration merging.
//!
//! ```text
//! builtin TargetConfig + [targets.<name>] override --> field-by-field merge
//! (no builtin)         + [targets.<name>] override --> new target
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::TargetConfig;

/// Target definition with optional fields for field-level merging.
///
/// All fields are optional to distinguish between "not set" (None) and
/// "explicitly set to value", so `[targets.check] depends = []` drops the
/// built-in dependency on `build` while keeping its commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Vec<String>>>,
    /// An empty path clears the built-in gate file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<bool>,
}

/// Merge a target override over its base definition.
pub(super) fn merge_target_config(
    base: &TargetConfig,
    override_config: &TargetConfigOverride,
) -> TargetConfig {
    TargetConfig {
        description: override_config
            .description
            .clone()
            .unwrap_or_else(|| base.description.clone()),
        depends: override_config
            .depends
            .clone()
            .unwrap_or_else(|| base.depends.clone()),
        commands: override_config
            .commands
            .clone()
            .unwrap_or_else(|| base.commands.clone()),
        requires_file: match &override_config.requires_file {
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => Some(path.clone()),
            None => base.requires_file.clone(),
        },
        remove: override_config
            .remove
            .clone()
            .unwrap_or_else(|| base.remove.clone()),
        revision: override_config.revision.unwrap_or(base.revision),
    }
}

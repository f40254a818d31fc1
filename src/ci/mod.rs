// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CI gate: decides whether a push runs the CI targets.
//!
//! ```text
//! GITHUB_REF = refs/tags/...         --> skip
//! message starts with "WIP"          --> skip
//! message contains a marker (nocase) --> skip
//! otherwise                          --> run ci.targets
//! ```


use std::path::Path;

use tracing::debug;

use crate::git::query::head_message;

/// Ref variable set by the CI runner.
pub const REF_ENV: &str = "GITHUB_REF";

/// Commit message variable; `HEAD` is read when it is unset or empty.
pub const MESSAGE_ENV: &str = "CI_COMMIT_MESSAGE";

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Why the pipeline does not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The push is a tag.
    TagPush(String),
    /// The head commit is work in progress.
    WorkInProgress,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TagPush(git_ref) => write!(f, "tag push ({git_ref})"),
            Self::WorkInProgress => write!(f, "work-in-progress commit"),
        }
    }
}

/// Returns why the pipeline should be skipped, or `None` to run it.
#[must_use]
pub fn should_skip(
    git_ref: Option<&str>,
    message: Option<&str>,
    markers: &[String],
) -> Option<SkipReason> {
    if let Some(git_ref) = git_ref
        && git_ref.starts_with(TAG_REF_PREFIX)
    {
        return Some(SkipReason::TagPush(git_ref.to_string()));
    }

    let message = message?;
    if message.trim_start().starts_with("WIP") {
        return Some(SkipReason::WorkInProgress);
    }

    let lower = message.to_lowercase();
    markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .any(|marker| lower.contains(&marker.to_lowercase()))
        .then_some(SkipReason::WorkInProgress)
}

/// Head commit message: `CI_COMMIT_MESSAGE` when set and non-empty, else
/// the message of the commit `HEAD` points to. `None` when neither is
/// available.
#[must_use]
pub fn commit_message(root: &Path) -> Option<String> {
    message_or_head(std::env::var(MESSAGE_ENV).ok(), root)
}

fn message_or_head(message: Option<String>, root: &Path) -> Option<String> {
    if let Some(message) = message.filter(|message| !message.is_empty()) {
        return Some(message);
    }

    match head_message(root) {
        Ok(message) => Some(message),
        Err(e) => {
            debug!(error = %e, "no head commit message");
            None
        }
    }
}

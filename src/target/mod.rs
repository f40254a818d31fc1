// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build targets: dependency planning and sequential execution.
//!
//! ```text
//! Config::targets() --> plan(requested) --> TargetRunner::run()
//!                          |                    |
//!                     UnknownTarget         ProcessBuilder per command
//!                     DependencyCycle       (argv, cwd = root, no shell)
//! ```

pub mod plan;
pub mod runner;

#[cfg(test)]
mod tests;

pub use plan::plan;
pub use runner::TargetRunner;

/// Replaced with the absolute project root.
pub const ROOT_PLACEHOLDER: &str = "{root}";

/// Replaced with the resolved version.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Replaces each placeholder in `arg` with its value.
#[must_use]
pub fn substitute(arg: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(arg.to_string(), |acc, &(placeholder, value)| {
            acc.replace(placeholder, value)
        })
}

// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tag-describe string to PEP 440 conversion.
//!
//! ```text
//! v1.2.3              --> 1.2.3
//! v1.2.3M             --> 1.2.3.dev0
//! v1.2.3-5-gabc123    --> 1.2.3.dev5
//! v1.2.3-5-gabc123M   --> 1.2.3.dev5
//! release-1-1-gabc123 --> release-1.dev1
//! ```

use anyhow::Context;
use regex::Regex;

use crate::error::Result;

/// Converts `git describe --tags --dirty=<marker>` output into a Python
/// development-release version.
///
/// The commit count after the tag becomes the `.devN` counter. A dirty tree
/// with no commits after the tag becomes `.dev0`; with commits, the count
/// already marks it as a development build and the marker is dropped.
///
/// # Errors
///
/// Returns an error only if the internal pattern fails to compile.
pub fn python_format(described: &str, dirty_marker: &str) -> Result<String> {
    let (base, dirty) = match described.strip_suffix(dirty_marker) {
        Some(base) if !dirty_marker.is_empty() => (base, true),
        _ => (described, false),
    };

    let base = strip_version_prefix(base);

    let suffix = Regex::new(r"^(.+)-([0-9]+)-g[0-9a-f]+$")
        .context("failed to compile describe-suffix regex")?;

    if let Some(captures) = suffix.captures(base)
        && let (Some(tag), Some(count)) = (captures.get(1), captures.get(2))
    {
        return Ok(format!("{}.dev{}", tag.as_str(), count.as_str()));
    }

    if dirty {
        Ok(format!("{base}.dev0"))
    } else {
        Ok(base.to_string())
    }
}

/// Strips a leading `v` when a digit follows it (`v1.2` but not `vendor-1`).
fn strip_version_prefix(tag: &str) -> &str {
    match tag.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => tag,
    }
}

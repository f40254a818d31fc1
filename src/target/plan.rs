// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Execution order for requested targets.
//!
//! ```text
//! request [check, install]
//!   check   --> build
//!   install --> build
//! order: build, check, install   (depth-first, each target once)
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::config::types::TargetConfig;
use crate::error::{BsysResult, ConfigError};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Orders `requested` and everything they depend on so that every target
/// comes after its dependencies. A target reached twice runs once.
///
/// # Errors
///
/// Returns `ConfigError::UnknownTarget` for a name with no definition and
/// `ConfigError::DependencyCycle` when dependencies loop.
pub fn plan(
    targets: &BTreeMap<String, TargetConfig>,
    requested: &[String],
) -> BsysResult<Vec<String>> {
    let mut marks = HashMap::new();
    let mut stack = Vec::new();
    let mut order = Vec::new();

    for name in requested {
        visit(targets, name, &mut marks, &mut stack, &mut order)?;
    }
    Ok(order)
}

fn visit<'a>(
    targets: &'a BTreeMap<String, TargetConfig>,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    order: &mut Vec<String>,
) -> BsysResult<()> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<&str> = stack[start..].to_vec();
            cycle.push(name);
            return Err(ConfigError::DependencyCycle(cycle.join(" -> ")).into());
        }
        None => {}
    }

    let target = targets
        .get(name)
        .ok_or_else(|| ConfigError::UnknownTarget(name.to_string()))?;

    marks.insert(name, Mark::Visiting);
    stack.push(name);
    for dep in &target.depends {
        visit(targets, dep, marks, stack, order)?;
    }
    stack.pop();
    marks.insert(name, Mark::Done);
    order.push(name.to_string());
    Ok(())
}

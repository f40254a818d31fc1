// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal.
//!
//! ```text
//! walk:  find_matching()   ignore::WalkParallel + wax globs
//!        WalkOptions       max_depth, hidden, gitignore, dirs
//! ```

pub mod walk;

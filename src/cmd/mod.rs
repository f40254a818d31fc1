// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), revision, update, header, target (run, targets, ci)
//! ```

pub mod config;
pub mod header;
pub mod revision;
pub mod target;
pub mod update;

use tokio_util::sync::CancellationToken;

/// Token cancelled on the first Ctrl+C.
pub(crate) fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting...");
            cancel.cancel();
        }
    });
    token
}

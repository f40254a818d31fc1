// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |      revision / update / header / target
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              target   revision  update      header     ci
//!             plan/run  describe  DL+unzip   umbrella   gate
//!                 |        |        |
//!                 v        v        v
//!              process    git      net
//!
//!   +-----------------------------------------+
//!   |  core      process (tokio, cancellable) |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod ci;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod header;
pub mod logging;
pub mod net;
pub mod revision;
pub mod target;
pub mod update;
pub mod utility;

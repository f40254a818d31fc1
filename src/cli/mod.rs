// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for bsys using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! bsys [global options] <command>
//! revision [--format python]
//! update-build-system [--create] [--branch B]
//! header [DIR]
//! build | check | analyze | install | clean | prereqs
//! run <target>...
//! targets [--json]
//! ci [--force]
//! options | inis | version
//! ```

pub mod global;
pub mod revision;
pub mod target;


use crate::cli::global::GlobalOptions;
use crate::cli::revision::{HeaderArgs, RevisionArgs, UpdateArgs};
use crate::cli::target::{CiArgs, RunArgs, TargetsArgs};
use clap::{Parser, Subcommand};

/// Project build-system helper.
#[derive(Debug, Parser)]
#[command(
    name = "bsys",
    author,
    version,
    about = "Project build-system helper",
    long_about = "bsys Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Computes the project version from git tags, refreshes the\n\
                  vendored BuildSystem directory, writes umbrella headers and\n\
                  runs the build, check, analyze, install, clean and prereqs\n\
                  targets. See `bsys <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIGURATION:\n\n\
                  bsys reads `bsys.toml` from the project root when it exists,\n\
                  then every --ini file in order, then BSYS_* environment\n\
                  variables, then --set options. Use `bsys options` to see the\n\
                  effective values and `bsys targets` for the target table.\n\n\
                  EXIT CODES:\n\n\
                  0 on success, 255 for usage and precondition errors, the exit\n\
                  code of the first failing tool, or 1 for internal failures."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used by bsys.
    Inis,

    /// Prints the project version and records it in the REVISION file.
    Revision(RevisionArgs),

    /// Replaces the vendored build system with a fresh download.
    #[command(name = "update-build-system")]
    UpdateBuildSystem(UpdateArgs),

    /// Writes an umbrella header including every header in a directory.
    Header(HeaderArgs),

    /// Builds the source and wheel packages.
    Build,

    /// Runs the unit tests.
    Check,

    /// Runs static analysis.
    Analyze,

    /// Installs the package.
    Install,

    /// Removes build artifacts and the version record.
    Clean,

    /// Scans dependency licenses when Dependencies/prereqs.json exists.
    Prereqs,

    /// Runs the named targets and their dependencies.
    Run(RunArgs),

    /// Lists the effective target definitions.
    Targets(TargetsArgs),

    /// Runs the CI targets unless the push is a tag or work in progress.
    Ci(CiArgs),
}

impl Command {
    /// Target name for the shorthand target commands.
    #[must_use]
    pub const fn target_name(&self) -> Option<&'static str> {
        match self {
            Self::Build => Some("build"),
            Self::Check => Some("check"),
            Self::Analyze => Some("analyze"),
            Self::Install => Some("install"),
            Self::Clean => Some("clean"),
            Self::Prereqs => Some("prereqs"),
            _ => None,
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

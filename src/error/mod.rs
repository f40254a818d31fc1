// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               BsysError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+-----+
//!   |      |      |       |      |      |     |
//!   v      v      v       v      v      v     v
//! Usage Precond  Git     Net    Cfg   Proc   Fs     Io
//! Box<str>       Box     Box    Box   Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git     Gix, CommandFailed
//!   Network Reqwest, HttpError, Interrupted
//!   Config  InvalidValue, UnknownTarget, DependencyCycle
//!   Process SpawnFailed, NonZeroExit, Signaled, ExecutableNotFound
//!   Fs      IoError
//!
//! Exit codes:
//!   Usage, Precondition             --> 255
//!   Process::NonZeroExit { code }   --> code mod 256
//!   Process::Signaled { signal }    --> 128 + signal
//!   everything else                 --> 1
//! ```
//!
//! The boxed sub-errors are transparent, so `{e:#}` prints each message once.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BsysError`].
pub type BsysResult<T> = std::result::Result<T, BsysError>;

/// Exit code for usage and precondition failures.
pub const EXIT_USAGE: u8 = 255;

/// Exit code for failures that carry no exit code of their own.
pub const EXIT_FAILURE: u8 = 1;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum BsysError {
    /// Bad argument count or shape.
    #[error("usage: {0}")]
    Usage(Box<str>),

    /// The environment is not what the command expects (wrong directory,
    /// missing substructure after extraction).
    #[error("{0}")]
    Precondition(Box<str>),

    /// Git operation failed.
    #[error(transparent)]
    Git(#[from] Box<GitError>),

    /// Network operation failed.
    #[error(transparent)]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error(transparent)]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error(transparent)]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl BsysError {
    /// Process exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Precondition(_) => EXIT_USAGE,
            Self::Process(err) => match **err {
                ProcessError::NonZeroExit { code, .. } if code >= 0 => {
                    u8::try_from(code.rem_euclid(256)).unwrap_or(EXIT_FAILURE)
                }
                ProcessError::Signaled { signal, .. } => signal
                    .checked_add(128)
                    .and_then(|code| u8::try_from(code).ok())
                    .unwrap_or(EXIT_FAILURE),
                _ => EXIT_FAILURE,
            },
            _ => EXIT_FAILURE,
        }
    }
}

/// Create a [`BsysError::Usage`] error.
pub fn usage(message: impl Into<String>) -> BsysError {
    BsysError::Usage(message.into().into_boxed_str())
}

/// Create a [`BsysError::Precondition`] error.
pub fn precondition(message: impl Into<String>) -> BsysError {
    BsysError::Precondition(message.into().into_boxed_str())
}

/// Picks the exit code for an error returned from a command handler.
///
/// Walks the `anyhow` chain so context layers added with `.context()` do not
/// hide the typed error underneath.
#[must_use]
pub fn exit_code_of(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<BsysError>())
        .map_or(EXIT_FAILURE, BsysError::exit_code)
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BsysError {
                fn from(err: $error) -> Self {
                    BsysError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    NetworkError => Network,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// Download was interrupted by user or signal.
    #[error("download interrupted")]
    Interrupted,

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A requested or referenced target is not defined.
    #[error("target '{0}' is not defined")]
    UnknownTarget(String),

    /// Target dependencies loop back on themselves.
    #[error("dependency cycle between targets: {0}")]
    DependencyCycle(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was terminated by a signal.
    #[error("process '{command}' was killed by signal {signal}")]
    Signaled { command: String, signal: i32 },

    /// Process was cancelled before it finished.
    #[error("process '{command}' was interrupted")]
    Interrupted { command: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

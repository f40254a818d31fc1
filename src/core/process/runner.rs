// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn()  --NotFound--> ProcessError::ExecutableNotFound
//!              |
//!              v
//!         run_child()  --cancelled--> ProcessError::Interrupted
//!              |
//!              v
//!    validate exit status  --> ProcessError::Signaled { signal }
//!                          --> ProcessError::NonZeroExit { code }
//!              |
//!              v
//!       ProcessOutput
//! ```

use crate::error::{ProcessError, Result};
use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging and errors).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if:
    /// - The executable cannot be found or spawned.
    /// - The process is killed by a signal (`ProcessError::Signaled`).
    /// - The process exits with a non-zero status (`ProcessError::NonZeroExit`).
    pub async fn run(self) -> Result<ProcessOutput> {
        self.execute(None).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the child is killed and
    /// `ProcessError::Interrupted` is returned. A token that is already
    /// cancelled prevents the spawn altogether.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run), plus `ProcessError::Interrupted`.
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        if token.is_cancelled() {
            return Err(crate::error::BsysError::from(ProcessError::Interrupted {
                command: self.command_line(),
            })
            .into());
        }
        self.execute(Some(&token)).await
    }

    async fn execute(self, token: Option<&CancellationToken>) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = command.spawn().map_err(|source| {
            let err = if source.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                }
            };
            crate::error::BsysError::from(err)
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child, token).await?;

        if output.is_interrupted() {
            return Err(
                crate::error::BsysError::from(ProcessError::Interrupted { command: cmd_line })
                    .into(),
            );
        }

        if let Some(signal) = output.signal() {
            return Err(crate::error::BsysError::from(ProcessError::Signaled {
                command: cmd_line,
                signal,
            })
            .into());
        }

        if !output.success() {
            return Err(crate::error::BsysError::from(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            })
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        for (key, value) in self.env_vars() {
            command.env(key, value);
        }

        command.stdin(if self.stdout_config().contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else {
            Stdio::null()
        });
        command.stdout(Self::stdio_from_flags(self.stdout_config()));
        command.stderr(Self::stdio_from_flags(self.stderr_config()));
        command.kill_on_drop(true);

        command
    }

    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else {
            Stdio::piped()
        }
    }
}

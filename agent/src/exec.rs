//! Shell-free execution of built invocations.
//!
//! The argv list is handed to the OS as-is; no shell ever sees it, so
//! the tokens the invocation builder produced are exactly the tokens the
//! program receives.

use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Execution failures. A nonzero exit is not a failure — it is data.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invocation is empty")]
    EmptyInvocation,
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

/// Captured output of one invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Runs an invocation without a shell and captures its output.
///
/// Accepts any argv slice, typically the [`Invocation`](mancap_core::Invocation)
/// produced by [`build_invocation`](mancap_core::build_invocation).
pub fn run_invocation(argv: &[String]) -> Result<ExecOutput, ExecError> {
    let (command, args) = argv.split_first().ok_or(ExecError::EmptyInvocation)?;

    debug!(?argv, "Executing invocation");
    let output = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ExecError::Spawn {
            command: command.clone(),
            source,
        })?;

    let result = ExecOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    };
    debug!(
        exit_code = ?result.exit_code,
        stdout_len = result.stdout.len(),
        stderr_len = result.stderr.len(),
        "Invocation finished"
    );
    Ok(result)
}

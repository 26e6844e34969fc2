//! Manual-page lookup via the system `man` command.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

/// Timeout for man lookups (milliseconds).
const MAN_TIMEOUT_MS: u64 = 5000;

/// Source of raw manual text for a command.
///
/// The single seam between schema building and the outside world: tests
/// and offline parsing provide canned text, production runs the real
/// `man` binary. `None` means "this command has no manual page" — the
/// lookup never distinguishes why.
pub trait ManualSource {
    /// Returns the rendered manual text, or `None` when no page exists.
    fn manual_text(&self, command: &str) -> Option<String>;
}

/// Production [`ManualSource`] that runs `man <command>`.
///
/// The child runs with a pager-free environment so the page is rendered
/// straight to stdout, and with a bounded wait so a wedged pipeline
/// cannot stall a schema build. Spawn failure, timeout, and nonzero exit
/// all collapse to `None`.
#[derive(Debug, Clone)]
pub struct ManCommand {
    timeout: Duration,
}

impl ManCommand {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(MAN_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ManCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualSource for ManCommand {
    fn manual_text(&self, command: &str) -> Option<String> {
        let mut child = match Command::new("man")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("MANPAGER", "cat")
            .env("PAGER", "cat")
            .env("TERM", "dumb")
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!(command, error = %e, "Failed to spawn man");
                return None;
            }
        };

        // Drain both pipes on background threads to prevent deadlock when
        // the child fills a pipe buffer before exiting.
        let stdout_thread = child.stdout.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        let stderr_thread = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                debug!(
                    command,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "man lookup timed out, killing process"
                );
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(e) => {
                debug!(command, error = %e, "Failed to wait on man");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
        };

        let stdout = stdout_thread
            .and_then(|thread| thread.join().ok())
            .unwrap_or_default();
        let stderr = stderr_thread
            .and_then(|thread| thread.join().ok())
            .unwrap_or_default();

        if !status.success() {
            debug!(
                command,
                exit_code = ?status.code(),
                stderr_len = stderr.len(),
                "man exited nonzero, treating as no page"
            );
            return None;
        }

        let text = String::from_utf8_lossy(&stdout).into_owned();
        debug!(command, length = text.len(), "Got manual text");
        Some(text)
    }
}

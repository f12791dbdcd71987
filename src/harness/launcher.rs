//! Server process launching
//!
//! Spawns the target server with all three stdio streams piped and owns
//! the child for the rest of the run. Exactly one handle exists per run.

use std::process::Stdio;

use tokio::io::BufWriter;
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};

use crate::common::{Error, Result};

/// Owned handle to the running server process and its pipes
pub struct ServerHandle {
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
}

impl ServerHandle {
    /// Spawn the server executable with no arguments.
    ///
    /// A missing binary maps to [`Error::ServerNotFound`] with its
    /// remediation message; any other spawn failure is
    /// [`Error::LaunchFailed`]. Launch failures are always fatal, there
    /// are no retries.
    pub fn launch(path: &str) -> Result<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::from_spawn(path, e))?;

        let stdin = child.stdin.take().ok_or(Error::PipeUnavailable("stdin"))?;
        let stdout = child.stdout.take().ok_or(Error::PipeUnavailable("stdout"))?;
        let stderr = child.stderr.take().ok_or(Error::PipeUnavailable("stderr"))?;

        tracing::debug!(path, pid = child.id(), "server launched");

        Ok(Self {
            child,
            stdin: Some(BufWriter::new(stdin)),
            stdout: Some(stdout),
            stderr: Some(stderr),
        })
    }

    /// Writer for the server's stdin, if it has not been closed yet
    pub fn stdin_writer(&mut self) -> Result<&mut BufWriter<ChildStdin>> {
        self.stdin.as_mut().ok_or(Error::PipeUnavailable("stdin"))
    }

    /// Close the server's stdin. A well-behaved server treats this as
    /// end-of-input and exits once it has flushed its responses.
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Take ownership of the stdout pipe (once)
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    /// Take ownership of the stderr pipe (once)
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.stderr.take()
    }

    /// Wait for the server to exit
    pub async fn wait(&mut self) -> std::io::Result<std::process::ExitStatus> {
        self.child.wait().await
    }

    /// Forcibly terminate the server and reap it
    pub async fn kill(&mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!("kill failed (server likely already exited): {e}");
        }
    }

    /// Guaranteed-cleanup hook: close stdin, terminate if still running,
    /// reap. Safe to call after the server has already exited.
    pub async fn ensure_killed(&mut self) {
        self.stdin.take();
        let _ = self.child.start_kill();
        let _ = self.child.wait().await;
    }
}

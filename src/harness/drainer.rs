//! Response draining
//!
//! After the script has been sent the harness waits a settling period,
//! closes the server's stdin, and collects both output streams under a
//! hard timeout. The streams are read by their own tasks so that a timed
//! out wait can still salvage whatever they accumulated once the server
//! has been killed.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::common::Result;

use super::ServerHandle;

/// Everything the server wrote during the drain window.
///
/// `complete` is false when the drain timed out and the output was
/// salvaged after a forced kill. That is a partial result, not an error.
#[derive(Debug)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub complete: bool,
    pub status: Option<ExitStatus>,
}

/// Drain the server's output, killing it if it outlives the timeout.
pub async fn drain(
    server: &mut ServerHandle,
    settle: Duration,
    timeout: Duration,
) -> Result<CapturedOutput> {
    tokio::time::sleep(settle).await;

    let out_task = tokio::spawn(read_all(server.take_stdout()));
    let err_task = tokio::spawn(read_all(server.take_stderr()));

    // End-of-input signal; a well-behaved server exits after this.
    server.close_stdin();

    let (complete, status) = match tokio::time::timeout(timeout, server.wait()).await {
        Ok(status) => (true, status.ok()),
        Err(_) => {
            tracing::warn!("drain timed out after {timeout:?}, killing server");
            server.kill().await;
            (false, None)
        }
    };

    // Second, unbounded pass. The pipes are closed by now (the server
    // exited or was killed), so the readers finish with whatever was
    // buffered.
    let stdout = out_task.await.unwrap_or_default();
    let stderr = err_task.await.unwrap_or_default();

    Ok(CapturedOutput {
        stdout,
        stderr,
        complete,
        status,
    })
}

/// Read a pipe to end-of-file, tolerating non-UTF-8 bytes
async fn read_all<R>(pipe: Option<R>) -> String
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[cfg(unix)]
    #[tokio::test]
    async fn drains_echoed_output_after_stdin_close() {
        let mut server = ServerHandle::launch("cat").unwrap();

        let writer = server.stdin_writer().unwrap();
        writer.write_all(b"hello\n").await.unwrap();
        writer.flush().await.unwrap();

        let output = drain(
            &mut server,
            Duration::from_millis(10),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert!(output.complete);
        assert_eq!(output.stdout, "hello\n");
        assert!(output.stderr.is_empty());
        assert!(output.status.is_some_and(|s| s.success()));

        server.ensure_killed().await;
    }
}

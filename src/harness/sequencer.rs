//! Scripted message sequencing
//!
//! Writes each scripted request as one compact JSON line, flushed
//! immediately, with a fixed pacing pause between messages. The pacing is
//! a coarse rate-limit to let the server start processing before the next
//! stimulus arrives; nothing the server writes back is inspected here.

use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::common::Result;
use crate::script::ScriptedMessage;

/// Send the whole script in order.
///
/// Every write is flushed before the pacing sleep starts, so send order
/// is strictly sequential. A write failure (for example a broken pipe
/// after the server died) propagates to the caller; the script is never
/// partially retried.
pub async fn send_script<W>(
    writer: &mut W,
    script: &[ScriptedMessage],
    pacing: Duration,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for msg in script {
        println!("\n{}. {}...", msg.id, msg.label.bold());

        let line = msg.to_line()?;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        println!("{} {}", ">>>".cyan(), line);
        tracing::debug!(id = msg.id, method = msg.method, "request sent");

        tokio::time::sleep(pacing).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::script;
    use serde_json::Value;

    #[tokio::test(start_paused = true)]
    async fn writes_five_newline_terminated_json_lines() {
        let mut sink: Vec<u8> = Vec::new();
        send_script(&mut sink, &script("test query"), Duration::from_secs(1))
            .await
            .unwrap();

        let text = String::from_utf8(sink).unwrap();
        assert!(text.ends_with('\n'));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);

        for (i, line) in lines.iter().enumerate() {
            let value: Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["jsonrpc"], "2.0");
            assert_eq!(value["id"], (i + 1) as i64);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_elapses_between_messages() {
        let pacing = Duration::from_millis(750);
        let start = tokio::time::Instant::now();

        let mut sink: Vec<u8> = Vec::new();
        send_script(&mut sink, &script("q"), pacing).await.unwrap();

        // One full pacing interval per message, including the last
        assert!(start.elapsed() >= pacing * 5);
    }

    #[tokio::test(start_paused = true)]
    async fn broken_writer_surfaces_an_error() {
        // A zero-capacity duplex whose peer is dropped behaves like a
        // server that exited mid-script.
        let (mut writer, reader) = tokio::io::duplex(16);
        drop(reader);

        let result = send_script(&mut writer, &script("q"), Duration::ZERO).await;
        assert!(result.is_err());
    }
}

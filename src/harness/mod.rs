//! The probe harness: launch, sequence, drain
//!
//! One run is one child process driven through the fixed script and then
//! drained. The `ServerHandle` is created here, passed explicitly through
//! both phases, and killed on every exit path before `run` returns.

pub mod drainer;
pub mod launcher;
pub mod sequencer;

pub use drainer::CapturedOutput;
pub use launcher::ServerHandle;

use crate::common::config::{Config, Timeouts};
use crate::common::Result;
use crate::script;

/// Run the full probe sequence against the configured server.
///
/// Launch failures abort before any message is sent. Whatever happens
/// after the launch, the child is terminated before this returns.
pub async fn run(config: &Config, query: &str) -> Result<CapturedOutput> {
    let mut server = ServerHandle::launch(&config.server)?;

    let outcome = drive(&mut server, query, &config.timeouts).await;

    // Unconditional: error paths release the child too.
    server.ensure_killed().await;

    outcome
}

async fn drive(
    server: &mut ServerHandle,
    query: &str,
    timeouts: &Timeouts,
) -> Result<CapturedOutput> {
    let script = script::script(query);
    sequencer::send_script(server.stdin_writer()?, &script, timeouts.pacing()).await?;
    drainer::drain(server, timeouts.settle(), timeouts.drain()).await
}

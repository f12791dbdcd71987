//! MCP stdio conformance probe
//!
//! This library drives a Model Context Protocol server as a child process
//! through a fixed scripted sequence of JSON-RPC requests and captures
//! whatever the server writes back. It is a black-box exerciser, not a
//! protocol client: responses are collected as opaque text and never
//! correlated with requests.

pub mod common;
pub mod harness;
pub mod script;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::CapturedOutput;
pub use script::ScriptedMessage;

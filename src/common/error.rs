//! Error types for the probe
//!
//! Messages are user-facing: a launch failure tells the user what to do
//! next rather than dumping an OS error code on them.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the probe
#[derive(Error, Debug)]
pub enum Error {
    // === Launch Errors ===
    #[error("Server binary not found at '{path}'. Build the server first, then re-run the probe")]
    ServerNotFound { path: String },

    #[error("Failed to launch server: {0}")]
    LaunchFailed(#[source] io::Error),

    #[error("Server {0} pipe is not available")]
    PipeUnavailable(&'static str),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),
}

impl Error {
    /// Classify a spawn failure: a missing binary gets the remediation
    /// message, everything else is reported generically.
    pub fn from_spawn(path: &str, e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            Self::ServerNotFound {
                path: path.to_string(),
            }
        } else {
            Self::LaunchFailed(e)
        }
    }
}

//! Configuration file handling
//!
//! The probe reads an optional `mcp-probe.toml` from the working directory.
//! It only overrides defaults; the CLI surface stays a single positional
//! argument.
//!
//! ```toml
//! server = "./ez-web-search"
//!
//! [timeouts]
//! pacing_ms = 1000
//! settle_ms = 5000
//! drain_ms = 2000
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::{Error, Result};

/// Name of the optional config file, looked up in the working directory
pub const CONFIG_FILE: &str = "mcp-probe.toml";

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Path to the server executable, relative to the working directory
    #[serde(default = "default_server")]
    pub server: String,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeouts: Timeouts::default(),
        }
    }
}

fn default_server() -> String {
    "./ez-web-search".to_string()
}

/// Timing knobs for the send and drain phases, in milliseconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Pause after each scripted message before the next one is sent
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Settling period after the last message, before draining
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Hard limit on the drain itself; past it the server is killed
    #[serde(default = "default_drain_ms")]
    pub drain_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
            settle_ms: default_settle_ms(),
            drain_ms: default_drain_ms(),
        }
    }
}

fn default_pacing_ms() -> u64 {
    1000
}

fn default_settle_ms() -> u64 {
    5000
}

fn default_drain_ms() -> u64 {
    2000
}

impl Timeouts {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn drain(&self) -> Duration {
        Duration::from_millis(self.drain_ms)
    }
}

impl Config {
    /// Load `mcp-probe.toml` from the working directory if present,
    /// otherwise fall back to defaults. A file that exists but does not
    /// parse is an error; silently ignoring it would mask typos.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_script_timing() {
        let config = Config::default();
        assert_eq!(config.server, "./ez-web-search");
        assert_eq!(config.timeouts.pacing(), Duration::from_millis(1000));
        assert_eq!(config.timeouts.settle(), Duration::from_millis(5000));
        assert_eq!(config.timeouts.drain(), Duration::from_millis(2000));
    }

    #[test]
    fn partial_file_keeps_unset_defaults() {
        let config: Config = toml::from_str(
            r#"
            server = "./my-server"

            [timeouts]
            pacing_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.server, "./my-server");
        assert_eq!(config.timeouts.pacing_ms, 50);
        assert_eq!(config.timeouts.settle_ms, 5000);
        assert_eq!(config.timeouts.drain_ms, 2000);
    }
}

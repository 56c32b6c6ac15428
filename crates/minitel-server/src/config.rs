//! TOML configuration for the server binary.
//!
//! # File layout (for beginners)
//!
//! Every section and every field is optional.  A missing file, or a file that
//! only names the settings you care about, falls back to the defaults below:
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! port = 3615
//! log_level = "info"
//!
//! [terminal]
//! video_mode = "videotex"     # or "mixed" for 80 columns
//! keyboard_extended = true
//! keyboard_c0 = false
//! read_timeout_ms = 1000
//! paced_writes = true
//!
//! [serial]
//! port = "/dev/ttyUSB0"       # omit to probe every /dev/tty* device
//! probe_baudrates = [1200, 4800, 300]
//! ```
//!
//! Fields annotated with `#[serde(default = "some_fn")]` take the value of
//! `some_fn()` when absent, which keeps older files loading after new settings
//! are added.

use std::path::{Path, PathBuf};
use std::time::Duration;

use minitel_core::VideoMode;
use minitel_session::SessionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub serial: SerialConfig,
}

/// Where the TCP front end listens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListenConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// 3615 is the historical Teletel kiosk number.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Handshake options applied to every terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalConfig {
    #[serde(default)]
    pub video_mode: VideoMode,
    #[serde(default = "default_true")]
    pub keyboard_extended: bool,
    #[serde(default)]
    pub keyboard_c0: bool,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Throttle serial writes to the line speed.
    #[serde(default = "default_true")]
    pub paced_writes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device to use; every `/dev/tty*` candidate is probed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PathBuf>,
    /// Line speeds tried in order during probing.
    #[serde(default = "default_probe_baudrates")]
    pub probe_baudrates: Vec<u32>,
}

// ── Default value functions ───────────────────────────────────────────────────

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3615
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_read_timeout_ms() -> u64 {
    1000
}

fn default_probe_baudrates() -> Vec<u32> {
    vec![1200, 4800, 300]
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            video_mode: VideoMode::default(),
            keyboard_extended: true,
            keyboard_c0: false,
            read_timeout_ms: default_read_timeout_ms(),
            paced_writes: true,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            probe_baudrates: default_probe_baudrates(),
        }
    }
}

impl TerminalConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Handshake options for a new session.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            video_mode: self.video_mode,
            keyboard_extended: self.keyboard_extended,
            keyboard_c0: self.keyboard_c0,
            read_timeout: self.read_timeout(),
            ..SessionConfig::default()
        }
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Loads the configuration at `path`.
///
/// Returns [`ServerConfig::default()`] when the file does not exist.
///
/// # Errors
///
/// [`ConfigError::Io`] when the file exists but cannot be read,
/// [`ConfigError::Parse`] when it is not valid TOML for this schema.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories.
pub fn save_config(config: &ServerConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

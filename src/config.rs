//! Configuration for the btpd client
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BtpdError, Result};

/// Directory btpd uses when none is given, relative to the home directory
pub const DEFAULT_DIR_NAME: &str = ".btpd";

/// Name of the control socket inside the daemon directory
pub const SOCKET_NAME: &str = "sock";

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Daemon Location
    // -------------------------------------------------------------------------
    /// The daemon's working directory
    /// Internal structure:
    ///   {base_dir}/
    ///     └── sock          (control socket)
    pub base_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Socket read timeout (milliseconds, 0 = block indefinitely)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = block indefinitely)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the daemon's control socket
    pub fn socket_path(&self) -> PathBuf {
        self.base_dir.join(SOCKET_NAME)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// `<home>/.btpd`, or `./.btpd` when the home directory is unknown
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME))
}

/// Expand a leading `~/` or `$HOME/` against the home directory.
///
/// Anything else is taken verbatim.
pub fn expand_base_dir(dir: &str) -> Result<PathBuf> {
    let rest = dir
        .strip_prefix("~/")
        .or_else(|| dir.strip_prefix("$HOME/"));

    match rest {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                BtpdError::Config(format!("cannot resolve home directory for '{}'", dir))
            })?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(dir)),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the daemon directory
    pub fn base_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.config.base_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the daemon directory from a user-supplied string, expanding `~/` and `$HOME/`
    pub fn base_dir_str(mut self, dir: &str) -> Result<Self> {
        self.config.base_dir = expand_base_dir(dir)?;
        Ok(self)
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}


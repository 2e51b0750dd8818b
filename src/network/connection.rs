//! Socket Transport
//!
//! Carries one request/response exchange per Unix socket connection.

use std::io::{BufReader, BufWriter};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::error::{BtpdError, Result};
use super::frame::{read_frame, write_frame};

/// Sends a request body and returns the reply body
pub trait Transport {
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>>;
}

/// Talks to the daemon over its control socket.
///
/// A fresh connection is opened for every exchange and closed once the reply
/// has been read. The daemon's control plane sees a handful of requests per
/// command, so there is no pooling and no pipelining.
#[derive(Debug, Clone)]
pub struct SocketTransport {
    /// Path of the daemon's control socket
    socket_path: PathBuf,

    read_timeout: Option<Duration>,

    write_timeout: Option<Duration>,
}

impl SocketTransport {
    /// Create a transport for the given socket with blocking I/O
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            read_timeout: None,
            write_timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            socket_path: config.socket_path(),
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
        }
    }

    /// Configure socket timeouts (`None` blocks indefinitely)
    pub fn set_timeouts(&mut self, read: Option<Duration>, write: Option<Duration>) {
        self.read_timeout = read;
        self.write_timeout = write;
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    fn connect(&self) -> Result<UnixStream> {
        let stream = UnixStream::connect(&self.socket_path).map_err(|source| {
            BtpdError::Connection {
                path: self.socket_path.clone(),
                source,
            }
        })?;

        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;
        Ok(stream)
    }
}

impl Transport for SocketTransport {
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        let stream = self.connect()?;
        tracing::trace!("Connected to {}", self.socket_path.display());

        // Clone stream for separate read/write handles
        let mut writer = BufWriter::new(stream.try_clone()?);
        let mut reader = BufReader::new(stream);

        write_frame(&mut writer, request)?;
        let reply = read_frame(&mut reader)?;

        tracing::debug!(
            "Exchanged {} request bytes for {} reply bytes",
            request.len(),
            reply.len()
        );
        Ok(reply)
    }
}

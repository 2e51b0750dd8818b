//! Client Module
//!
//! The caller-facing command surface.
//!
//! ## Responsibilities
//! - Validate arguments before any I/O
//! - Send one request per torrent for batch commands, collecting every code
//! - Hold the most recent status snapshot for field extraction
//!
//! A `Client` is not meant to be shared between callers: `stat()` replaces
//! the snapshot that `get_fields()` reads.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{BtpdError, Result};
use crate::network::{SocketTransport, Transport};
use crate::protocol::{
    decode_add, decode_error, decode_status, encode_command, AddResult, Command, ErrorCode,
    Field, Target, TorrentRecord,
};

/// Client for a btpd daemon
pub struct Client<T: Transport = SocketTransport> {
    /// How requests reach the daemon
    transport: T,

    /// Records from the last successful `stat()`
    snapshot: Option<Vec<TorrentRecord>>,
}

impl Client<SocketTransport> {
    /// Create a client for the daemon described by `config`
    pub fn new(config: &Config) -> Self {
        Self::with_transport(SocketTransport::from_config(config))
    }

    /// Create a client for `~/.btpd` with blocking I/O
    pub fn open_default() -> Self {
        Self::new(&Config::default())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            snapshot: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&mut self, command: &Command) -> Result<Vec<u8>> {
        let body = encode_command(command);
        tracing::debug!("Sending {} request ({} bytes)", command.name(), body.len());
        self.transport.exchange(&body)
    }

    fn simple(&mut self, command: Command) -> Result<ErrorCode> {
        let reply = self.request(&command)?;
        let status = decode_error(&reply)?;
        if !status.is_success() {
            tracing::warn!("{} failed: {}", command.name(), status);
        }
        Ok(status)
    }

    /// Run `make(number)` for each number in order.
    ///
    /// Daemon-reported failures are collected; transport and decode errors
    /// abort the batch.
    fn per_torrent(
        &mut self,
        command: &'static str,
        numbers: &[u32],
        make: fn(u32) -> Command,
    ) -> Result<Vec<ErrorCode>> {
        if numbers.is_empty() {
            return Err(BtpdError::ArgumentCount(command));
        }
        numbers
            .iter()
            .map(|&number| self.simple(make(number)))
            .collect()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Add a torrent from its raw `.torrent` contents.
    ///
    /// The torrent is added inactive; the returned number identifies it in
    /// later commands.
    pub fn add(&mut self, directory: &str, torrent: &[u8]) -> Result<AddResult> {
        let reply = self.request(&Command::Add {
            directory: directory.to_string(),
            torrent: torrent.to_vec(),
        })?;

        let result = decode_add(&reply)?;
        match result.number {
            Some(number) => tracing::info!("Added torrent {} into {}", number, directory),
            None => tracing::warn!("add failed: {}", result.status),
        }
        Ok(result)
    }

    /// Add a torrent from a `.torrent` file on disk
    pub fn add_file(&mut self, directory: &str, torrent_path: impl AsRef<Path>) -> Result<AddResult> {
        let torrent = fs::read(torrent_path.as_ref())?;
        self.add(directory, &torrent)
    }

    /// Remove torrents, one request per number
    pub fn drop_torrents(&mut self, numbers: &[u32]) -> Result<Vec<ErrorCode>> {
        self.per_torrent("drop", numbers, |number| Command::Delete { number })
    }

    /// Activate torrents; `Target::All` sends a single `start-all`
    pub fn start(&mut self, target: &Target) -> Result<Vec<ErrorCode>> {
        match target {
            Target::All => Ok(vec![self.simple(Command::StartAll)?]),
            Target::Numbers(numbers) => {
                self.per_torrent("start", numbers, |number| Command::Start { number })
            }
        }
    }

    /// Deactivate torrents; `Target::All` sends a single `stop-all`
    pub fn stop(&mut self, target: &Target) -> Result<Vec<ErrorCode>> {
        match target {
            Target::All => Ok(vec![self.simple(Command::StopAll)?]),
            Target::Numbers(numbers) => {
                self.per_torrent("stop", numbers, |number| Command::Stop { number })
            }
        }
    }

    /// Query the status of every torrent, replacing the held snapshot
    pub fn stat(&mut self) -> Result<ErrorCode> {
        self.snapshot = None;

        let reply = self.request(&Command::Stat)?;
        let status = decode_status(&reply)?;
        tracing::debug!("Status snapshot holds {} torrents", status.records.len());

        self.snapshot = Some(status.records);
        Ok(status.status)
    }

    // =========================================================================
    // Result Extraction
    // =========================================================================

    /// Records from the last `stat()`, if any
    pub fn records(&self) -> Option<&[TorrentRecord]> {
        self.snapshot.as_deref()
    }

    /// Pull columns out of the snapshot by format tag (`%n`, `%#`, ...).
    ///
    /// Returns one column per tag, each aligned to snapshot row order.
    pub fn get_fields<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<Vec<String>>> {
        let records = self.snapshot.as_deref().ok_or(BtpdError::NoSnapshot)?;
        let fields = tags
            .iter()
            .map(|tag| Field::from_tag(tag.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(fields
            .into_iter()
            .map(|field| records.iter().map(|record| record.field(field)).collect())
            .collect())
    }
}

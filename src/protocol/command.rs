//! Command definitions
//!
//! Represents requests sent to the daemon, plus the argument handling that
//! turns CLI-style torrent lists into them.

use crate::error::{BtpdError, Result};

/// Argument meaning "every torrent" for start/stop
pub const ALL_TORRENTS_FLAG: &str = "-a";

/// A request to the daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a torrent, downloading into `directory`
    Add { directory: String, torrent: Vec<u8> },

    /// Remove a torrent by number
    Delete { number: u32 },

    /// Activate a torrent
    Start { number: u32 },

    /// Activate every torrent
    StartAll,

    /// Deactivate a torrent
    Stop { number: u32 },

    /// Deactivate every torrent
    StopAll,

    /// Fetch the status table for all torrents
    Stat,
}

impl Command {
    /// The operation token as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Delete { .. } => "del",
            Command::Start { .. } => "start",
            Command::StartAll => "start-all",
            Command::Stop { .. } => "stop",
            Command::StopAll => "stop-all",
            Command::Stat => "tget",
        }
    }
}

/// Which torrents a start/stop applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every torrent, sent as one `*-all` request
    All,

    /// Listed torrents, one request each, in order
    Numbers(Vec<u32>),
}

impl Target {
    /// Interpret CLI-style arguments for start/stop.
    ///
    /// Any `-a` selects all torrents regardless of the other arguments.
    pub fn from_args<S: AsRef<str>>(command: &'static str, args: &[S]) -> Result<Self> {
        if args.is_empty() {
            return Err(BtpdError::ArgumentCount(command));
        }
        if args.iter().any(|arg| arg.as_ref() == ALL_TORRENTS_FLAG) {
            return Ok(Target::All);
        }
        parse_numbers(command, args).map(Target::Numbers)
    }
}

impl From<Vec<u32>> for Target {
    fn from(numbers: Vec<u32>) -> Self {
        Target::Numbers(numbers)
    }
}

/// Interpret CLI-style arguments for drop, which has no "all" form
pub fn parse_torrent_numbers<S: AsRef<str>>(command: &'static str, args: &[S]) -> Result<Vec<u32>> {
    if args.is_empty() {
        return Err(BtpdError::ArgumentCount(command));
    }
    if args.iter().any(|arg| arg.as_ref() == ALL_TORRENTS_FLAG) {
        return Err(BtpdError::UnsupportedAll(command));
    }
    parse_numbers(command, args)
}

fn parse_numbers<S: AsRef<str>>(command: &'static str, args: &[S]) -> Result<Vec<u32>> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            arg.parse::<u32>().map_err(|_| BtpdError::ArgumentType {
                command,
                argument: arg.to_string(),
            })
        })
        .collect()
}

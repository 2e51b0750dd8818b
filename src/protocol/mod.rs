//! Protocol Module
//!
//! Defines the wire protocol spoken on btpd's control socket.
//!
//! ## Protocol Format (bencode subset)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬─────────────────────────────────────────┐
//! │ Len (4)  │  l <op> [args...] e                     │
//! └──────────┴─────────────────────────────────────────┘
//! ```
//!
//! ### Commands
//! - add       - content directory + raw .torrent bytes
//! - del       - torrent number
//! - start     - torrent number, or `start-all`
//! - stop      - torrent number, or `stop-all`
//! - tget      - status table for every torrent
//!
//! ### Response Format
//! ```text
//! ┌──────────┬─────────────────────────────────────────┐
//! │ Len (4)  │  d 4:code i<code>e [...] e              │
//! └──────────┴─────────────────────────────────────────┘
//! ```
//!
//! The length prefix is handled by [`crate::network`]; this module only
//! deals with message bodies. Replies are read with a scanner over the few
//! shapes the daemon produces, not a general bencode parser.

mod command;
mod response;
mod status;
mod scanner;
mod codec;

pub use command::{parse_torrent_numbers, Command, Target, ALL_TORRENTS_FLAG};
pub use response::{AddResult, ErrorCode};
pub use status::{Field, StatusReply, TorrentRecord, TorrentState, INFO_HASH_LEN};
pub use codec::{
    decode_add, decode_error, decode_status, encode_command, ENVELOPE_PREFIX, GENERIC_COUNTERS,
    STAT_KEYS,
};

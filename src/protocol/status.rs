//! Status records
//!
//! One [`TorrentRecord`] per torrent in a status reply, plus the btcli-style
//! format tags used to pull columns out of a snapshot.

use std::fmt;

use crate::error::{BtpdError, Result};
use super::ErrorCode;

/// Length of a torrent info hash in bytes
pub const INFO_HASH_LEN: usize = 20;

/// Torrent lifecycle state as reported by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TorrentState {
    #[default]
    Inactive,
    Starting,
    Stopping,
    Leeching,
    Seeding,
}

impl TorrentState {
    /// Map the daemon's numeric state (0..=4)
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TorrentState::Inactive),
            1 => Some(TorrentState::Starting),
            2 => Some(TorrentState::Stopping),
            3 => Some(TorrentState::Leeching),
            4 => Some(TorrentState::Seeding),
            _ => None,
        }
    }

    /// One-character symbol used by btcli
    pub fn symbol(self) -> char {
        match self {
            TorrentState::Inactive => 'I',
            TorrentState::Starting => '+',
            TorrentState::Stopping => '-',
            TorrentState::Leeching => 'L',
            TorrentState::Seeding => 'S',
        }
    }
}

impl fmt::Display for TorrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A column of the status table, addressed by its format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Number,
    Title,
    State,
    Directory,
    Hash,
    Peers,
    UploadRate,
    DownloadRate,
    Downloaded,
    Uploaded,
    Received,
    Sent,
    Size,
    AvailablePieces,
    TotalPieces,
    HavePieces,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Number,
        Field::Title,
        Field::State,
        Field::Directory,
        Field::Hash,
        Field::Peers,
        Field::UploadRate,
        Field::DownloadRate,
        Field::Downloaded,
        Field::Uploaded,
        Field::Received,
        Field::Sent,
        Field::Size,
        Field::AvailablePieces,
        Field::TotalPieces,
        Field::HavePieces,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Field::Number => "%#",
            Field::Title => "%n",
            Field::State => "%t",
            Field::Directory => "%d",
            Field::Hash => "%h",
            Field::Peers => "%P",
            Field::UploadRate => "%^",
            Field::DownloadRate => "%v",
            Field::Downloaded => "%g",
            Field::Uploaded => "%u",
            Field::Received => "%D",
            Field::Sent => "%U",
            Field::Size => "%S",
            Field::AvailablePieces => "%A",
            Field::TotalPieces => "%T",
            Field::HavePieces => "%H",
        }
    }

    /// Short field name
    pub fn name(self) -> &'static str {
        match self {
            Field::Number => "number",
            Field::Title => "title",
            Field::State => "state",
            Field::Directory => "dir",
            Field::Hash => "hash",
            Field::Peers => "peers",
            Field::UploadRate => "uprate",
            Field::DownloadRate => "downrate",
            Field::Downloaded => "downed",
            Field::Uploaded => "uped",
            Field::Received => "rec",
            Field::Sent => "sent",
            Field::Size => "size",
            Field::AvailablePieces => "apieces",
            Field::TotalPieces => "tpieces",
            Field::HavePieces => "hpieces",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.tag() == tag)
            .ok_or_else(|| BtpdError::UnknownField(tag.to_string()))
    }
}

/// Status of one torrent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TorrentRecord {
    pub number: u32,
    pub title: String,
    pub state: TorrentState,
    pub directory: String,
    pub info_hash: [u8; INFO_HASH_LEN],
    pub peers: u64,
    pub upload_rate: u64,
    pub download_rate: u64,
    pub downloaded: u64,
    pub uploaded: u64,
    pub received: u64,
    pub sent: u64,
    pub size: u64,
    pub available_pieces: u64,
    pub total_pieces: u64,
    pub have_pieces: u64,
}

impl TorrentRecord {
    /// Info hash as lowercase hex
    pub fn hash_hex(&self) -> String {
        hex::encode(self.info_hash)
    }

    /// Mutable slot for one of the numeric counters; `None` for non-numeric fields
    pub fn counter_mut(&mut self, field: Field) -> Option<&mut u64> {
        match field {
            Field::Peers => Some(&mut self.peers),
            Field::UploadRate => Some(&mut self.upload_rate),
            Field::DownloadRate => Some(&mut self.download_rate),
            Field::Downloaded => Some(&mut self.downloaded),
            Field::Uploaded => Some(&mut self.uploaded),
            Field::Received => Some(&mut self.received),
            Field::Sent => Some(&mut self.sent),
            Field::Size => Some(&mut self.size),
            Field::AvailablePieces => Some(&mut self.available_pieces),
            Field::TotalPieces => Some(&mut self.total_pieces),
            Field::HavePieces => Some(&mut self.have_pieces),
            Field::Number | Field::Title | Field::State | Field::Directory | Field::Hash => None,
        }
    }

    /// Render one field the way btcli prints it
    pub fn field(&self, field: Field) -> String {
        match field {
            Field::Number => self.number.to_string(),
            Field::Title => self.title.clone(),
            Field::State => self.state.symbol().to_string(),
            Field::Directory => self.directory.clone(),
            Field::Hash => self.hash_hex(),
            Field::Peers => self.peers.to_string(),
            Field::UploadRate => self.upload_rate.to_string(),
            Field::DownloadRate => self.download_rate.to_string(),
            Field::Downloaded => self.downloaded.to_string(),
            Field::Uploaded => self.uploaded.to_string(),
            Field::Received => self.received.to_string(),
            Field::Sent => self.sent.to_string(),
            Field::Size => self.size.to_string(),
            Field::AvailablePieces => self.available_pieces.to_string(),
            Field::TotalPieces => self.total_pieces.to_string(),
            Field::HavePieces => self.have_pieces.to_string(),
        }
    }
}

/// Decoded status reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReply {
    /// Daemon-reported outcome
    pub status: ErrorCode,

    /// One record per torrent, in the order the daemon sent them
    pub records: Vec<TorrentRecord>,
}

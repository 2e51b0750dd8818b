//! Response definitions
//!
//! The daemon's error-code catalog and the add reply.

use std::fmt;

use crate::error::{BtpdError, Result};

/// Codes the daemon reports in every reply's `code` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Success = 0,
    CommunicationError = 1,
    BadContentDirectory = 2,
    BadTorrent = 3,
    BadTorrentEntry = 4,
    BadTracker = 5,
    CreateContentDirectory = 6,
    NoSuchKey = 7,
    NoSuchTorrentEntry = 8,
    ShuttingDown = 9,
    TorrentActive = 10,
    TorrentEntryExists = 11,
    TorrentInactive = 12,
}

impl ErrorCode {
    /// The full catalog, indexed by code
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::Success,
        ErrorCode::CommunicationError,
        ErrorCode::BadContentDirectory,
        ErrorCode::BadTorrent,
        ErrorCode::BadTorrentEntry,
        ErrorCode::BadTracker,
        ErrorCode::CreateContentDirectory,
        ErrorCode::NoSuchKey,
        ErrorCode::NoSuchTorrentEntry,
        ErrorCode::ShuttingDown,
        ErrorCode::TorrentActive,
        ErrorCode::TorrentEntryExists,
        ErrorCode::TorrentInactive,
    ];

    /// Look up a wire code; anything outside the catalog is rejected
    pub fn from_code(code: i64) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(BtpdError::UnknownErrorCode(code))
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::CommunicationError => "communication error",
            ErrorCode::BadContentDirectory => "bad content directory",
            ErrorCode::BadTorrent => "bad torrent",
            ErrorCode::BadTorrentEntry => "bad torrent entry",
            ErrorCode::BadTracker => "bad tracker",
            ErrorCode::CreateContentDirectory => "couldn't create content directory",
            ErrorCode::NoSuchKey => "no such key",
            ErrorCode::NoSuchTorrentEntry => "no such torrent entry",
            ErrorCode::ShuttingDown => "btpd is shutting down",
            ErrorCode::TorrentActive => "torrent is active",
            ErrorCode::TorrentEntryExists => "torrent entry exists",
            ErrorCode::TorrentInactive => "torrent is inactive",
        }
    }

    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }

    /// `(code, description)` pair
    pub fn pair(self) -> (u8, &'static str) {
        (self.code(), self.description())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

/// Reply to an add request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddResult {
    /// Daemon-reported outcome
    pub status: ErrorCode,

    /// Number assigned to the new torrent (present only on success)
    pub number: Option<u32>,
}

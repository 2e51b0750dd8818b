//! Error types for the btpd client
//!
//! Provides a unified error type for all operations. Codes reported by the
//! daemon itself are not errors; they come back as [`ErrorCode`] values.
//!
//! [`ErrorCode`]: crate::protocol::ErrorCode

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BtpdError
pub type Result<T> = std::result::Result<T, BtpdError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum BtpdError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to connect to {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Truncated response: {0}")]
    TruncatedResponse(String),

    #[error("Frame too large: {0} bytes")]
    FrameTooLarge(usize),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Unknown daemon error code: {0}")]
    UnknownErrorCode(i64),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("{0}() requires at least one torrent number")]
    ArgumentCount(&'static str),

    #[error("{command}() takes torrent numbers, got '{argument}'")]
    ArgumentType {
        command: &'static str,
        argument: String,
    },

    #[error("{0}() does not support '-a'")]
    UnsupportedAll(&'static str),

    // -------------------------------------------------------------------------
    // Result Extraction Errors
    // -------------------------------------------------------------------------
    #[error("Unknown field tag: {0}")]
    UnknownField(String),

    #[error("No status snapshot; run stat() first")]
    NoSnapshot,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BtpdError {
    /// True when the daemon's bytes could not be understood, as opposed to
    /// the daemon answering with a failure code.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, BtpdError::Protocol(_) | BtpdError::UnknownErrorCode(_))
    }

    /// True for caller misuse detected before any I/O.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            BtpdError::ArgumentCount(_)
                | BtpdError::ArgumentType { .. }
                | BtpdError::UnsupportedAll(_)
        )
    }
}

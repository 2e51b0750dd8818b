//! # btpd-client
//!
//! A client for the btpd BitTorrent daemon's control socket:
//! - Length-prefixed framing over a Unix domain socket
//! - Encoding of add/drop/start/stop/status requests
//! - Decoding of the daemon's error envelope and status table
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │     add / drop / start / stop / stat / get_fields           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Protocol Codec                           │
//! │        (encode commands, scan reply bodies)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Framing Transport                          │
//! │      (4-byte length prefix, one socket per exchange)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               <base_dir>/sock  (btpd)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BtpdError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{AddResult, ErrorCode, Field, Target, TorrentRecord, TorrentState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

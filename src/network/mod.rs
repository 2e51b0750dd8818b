//! Network Module
//!
//! Framing and transport for the daemon's control socket.
//!
//! ## Architecture
//! - One Unix socket connection per request/response exchange
//! - 4-byte native-endian length prefix on every message
//! - Blocking I/O with optional timeouts

mod frame;
mod connection;

pub use frame::{
    decode_frame, encode_frame, read_frame, write_frame, LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE,
};
pub use connection::{SocketTransport, Transport};

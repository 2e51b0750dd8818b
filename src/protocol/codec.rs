//! Protocol codec
//!
//! Encoding of requests and decoding of replies for the control socket.
//!
//! ## Request Format
//! ```text
//! l <len>:<op> [args...] e
//! ```
//!
//! ### Requests by Command
//! - add:       `l3:addd7:content<len>:<dir>7:torrent<len>:<bytes>ee`
//! - del:       `l3:deli<n>ee`
//! - start:     `l5:starti<n>ee`      (`l9:start-alle` for all)
//! - stop:      `l4:stopi<n>ee`       (`l8:stop-alle` for all)
//! - tget:      `l4:tgetd4:fromi0e4:keysl<keys>eee`
//!
//! ## Reply Format
//! ```text
//! d4:codei<code>e ...
//! ```
//!
//! Status replies carry `6:resultl` followed by one list per torrent. Every
//! value in a torrent list is preceded by a type tag: `i2e` numeric,
//! `i3e` string, `i1e` binary.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;
use super::scanner::Scanner;
use super::{AddResult, Command, ErrorCode, Field, StatusReply, TorrentRecord, TorrentState};
use super::status::INFO_HASH_LEN;

/// Every reply opens with the `code` key of its dictionary
pub const ENVELOPE_PREFIX: &[u8] = b"d4:codei";

/// Opens the torrent list in a status reply
pub const RESULT_PREFIX: &[u8] = b"6:resultl";

/// Key in an add reply holding the assigned torrent number
pub const NUMBER_MARKER: &[u8] = b"numi";

/// Type tags preceding each value in a status entry
pub const BIN_TAG: &[u8] = b"i1e";
pub const NUM_TAG: &[u8] = b"i2e";
pub const STR_TAG: &[u8] = b"i3e";

/// Value keys requested by a status query, in the order the daemon echoes them
pub const STAT_KEYS: [u8; 16] = [4, 14, 3, 16, 1, 0, 7, 8, 9, 6, 13, 12, 11, 10, 5, 2];

/// Counters between the total-uploaded value and the download rate, in wire order
pub const GENERIC_COUNTERS: [Field; 9] = [
    Field::Size,
    Field::Downloaded,
    Field::Peers,
    Field::TotalPieces,
    Field::AvailablePieces,
    Field::HavePieces,
    Field::Sent,
    Field::Received,
    Field::UploadRate,
];

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command into a request body (without the length prefix)
pub fn encode_command(command: &Command) -> Bytes {
    let mut buf = BytesMut::with_capacity(64);
    buf.put_u8(b'l');
    put_string(&mut buf, command.name().as_bytes());

    match command {
        Command::Add { directory, torrent } => {
            buf.reserve(directory.len() + torrent.len() + 32);
            buf.put_u8(b'd');
            put_string(&mut buf, b"content");
            put_string(&mut buf, directory.as_bytes());
            put_string(&mut buf, b"torrent");
            put_string(&mut buf, torrent);
            buf.put_u8(b'e');
        }
        Command::Delete { number } | Command::Start { number } | Command::Stop { number } => {
            put_integer(&mut buf, *number);
        }
        Command::StartAll | Command::StopAll => {}
        Command::Stat => {
            buf.put_u8(b'd');
            put_string(&mut buf, b"from");
            put_integer(&mut buf, 0);
            put_string(&mut buf, b"keys");
            buf.put_u8(b'l');
            for key in STAT_KEYS {
                put_integer(&mut buf, key);
            }
            buf.put_u8(b'e');
            buf.put_u8(b'e');
        }
    }

    buf.put_u8(b'e');
    buf.freeze()
}

fn put_string(buf: &mut BytesMut, bytes: &[u8]) {
    buf.put_slice(bytes.len().to_string().as_bytes());
    buf.put_u8(b':');
    buf.put_slice(bytes);
}

fn put_integer(buf: &mut BytesMut, value: impl ToString) {
    buf.put_u8(b'i');
    buf.put_slice(value.to_string().as_bytes());
    buf.put_u8(b'e');
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode the error code every reply carries
pub fn decode_error(body: &[u8]) -> Result<ErrorCode> {
    read_envelope(&mut Scanner::new(body))
}

fn read_envelope(scanner: &mut Scanner<'_>) -> Result<ErrorCode> {
    scanner.expect(ENVELOPE_PREFIX)?;
    let code: i64 = scanner.delimited_integer(b'e')?;
    ErrorCode::from_code(code)
}

/// Decode an add reply
pub fn decode_add(body: &[u8]) -> Result<AddResult> {
    let mut scanner = Scanner::new(body);
    let status = read_envelope(&mut scanner)?;
    if !status.is_success() {
        return Ok(AddResult { status, number: None });
    }

    scanner.skip_past(NUMBER_MARKER)?;
    let number = scanner.delimited_integer(b'e')?;
    Ok(AddResult {
        status,
        number: Some(number),
    })
}

/// Decode a status reply into one record per torrent, in daemon order.
///
/// Any malformed entry fails the whole reply; no partial table is returned.
pub fn decode_status(body: &[u8]) -> Result<StatusReply> {
    let mut scanner = Scanner::new(body);
    let status = read_envelope(&mut scanner)?;
    if !status.is_success() {
        return Ok(StatusReply {
            status,
            records: Vec::new(),
        });
    }

    scanner.expect(RESULT_PREFIX)?;
    if scanner.peek() != Some(b'l') {
        tracing::debug!("Status reply holds no torrents");
    }

    let mut records = Vec::new();
    while scanner.peek() == Some(b'l') {
        records.push(decode_record(&mut scanner)?);
    }

    // Close the result list and the reply dictionary
    scanner.expect(b"ee")?;
    Ok(StatusReply { status, records })
}

/// Decode one torrent list, cursor positioned on its opening `l`
fn decode_record(scanner: &mut Scanner<'_>) -> Result<TorrentRecord> {
    let start = scanner.position();
    scanner.expect(b"l")?;

    let mut record = TorrentRecord {
        number: numeric(scanner)?,
        ..TorrentRecord::default()
    };

    let state: i64 = numeric(scanner)?;
    record.state = TorrentState::from_code(state)
        .ok_or_else(|| scanner.error(format!("unknown torrent state {}", state)))?;

    record.title = text(scanner)?;
    record.uploaded = numeric(scanner)?;

    for field in GENERIC_COUNTERS {
        let value = numeric(scanner)?;
        let slot = record
            .counter_mut(field)
            .ok_or_else(|| scanner.error(format!("{} is not a counter", field.name())))?;
        *slot = value;
    }

    record.download_rate = numeric(scanner)?;

    scanner.expect(BIN_TAG)?;
    let hash = scanner.length_prefixed()?;
    record.info_hash = hash.try_into().map_err(|_| {
        scanner.error(format!(
            "info hash is {} bytes, expected {}",
            hash.len(),
            INFO_HASH_LEN
        ))
    })?;

    record.directory = text(scanner)?;
    scanner.expect(b"e")?;

    tracing::trace!(
        "Decoded torrent {} ({} bytes at offset {})",
        record.number,
        scanner.position() - start,
        start
    );
    Ok(record)
}

fn numeric<T: std::str::FromStr>(scanner: &mut Scanner<'_>) -> Result<T> {
    scanner.expect(NUM_TAG)?;
    scanner.integer()
}

fn text(scanner: &mut Scanner<'_>) -> Result<String> {
    scanner.expect(STR_TAG)?;
    let bytes = scanner.length_prefixed()?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

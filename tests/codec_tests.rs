//! Codec Tests
//!
//! Tests for request encoding and reply decoding.

mod common;

use btpd_client::protocol::{
    decode_add, decode_error, decode_status, encode_command, Command, ErrorCode, Field,
    TorrentState, GENERIC_COUNTERS,
};
use btpd_client::BtpdError;
use common::{add_body, code_body, status_body, Entry};

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_add() {
    let cmd = Command::Add {
        directory: "music".to_string(),
        torrent: b"d4:infoe".to_vec(),
    };
    assert_eq!(
        &encode_command(&cmd)[..],
        b"l3:addd7:content5:music7:torrent8:d4:infoeee"
    );
}

#[test]
fn test_encode_add_uses_byte_lengths() {
    let cmd = Command::Add {
        directory: "müsik".to_string(),
        torrent: vec![0x00, 0xFF],
    };
    let mut expected = b"l3:addd7:content6:m\xc3\xbcsik7:torrent2:".to_vec();
    expected.extend_from_slice(&[0x00, 0xFF]);
    expected.extend_from_slice(b"ee");
    assert_eq!(&encode_command(&cmd)[..], &expected[..]);
}

#[test]
fn test_encode_per_torrent_commands() {
    assert_eq!(&encode_command(&Command::Delete { number: 7 })[..], b"l3:deli7ee");
    assert_eq!(&encode_command(&Command::Start { number: 12 })[..], b"l5:starti12ee");
    assert_eq!(&encode_command(&Command::Stop { number: 0 })[..], b"l4:stopi0ee");
}

#[test]
fn test_encode_all_commands() {
    assert_eq!(&encode_command(&Command::StartAll)[..], b"l9:start-alle");
    assert_eq!(&encode_command(&Command::StopAll)[..], b"l8:stop-alle");
}

#[test]
fn test_encode_stat_query() {
    assert_eq!(
        &encode_command(&Command::Stat)[..],
        &b"l4:tgetd4:fromi0e4:keysli4ei14ei3ei16ei1ei0ei7ei8ei9ei6ei13ei12ei11ei10ei5ei2eeee"[..]
    );
}

// =============================================================================
// Error Envelope Tests
// =============================================================================

#[test]
fn test_decode_every_catalog_code() {
    let descriptions = [
        "success",
        "communication error",
        "bad content directory",
        "bad torrent",
        "bad torrent entry",
        "bad tracker",
        "couldn't create content directory",
        "no such key",
        "no such torrent entry",
        "btpd is shutting down",
        "torrent is active",
        "torrent entry exists",
        "torrent is inactive",
    ];

    for (code, description) in descriptions.iter().enumerate() {
        let decoded = decode_error(&code_body(code as i64)).unwrap();
        assert_eq!(decoded.code() as usize, code);
        assert_eq!(decoded.description(), *description);
    }
}

#[test]
fn test_decode_unknown_codes_fail() {
    for code in [13, 99, -1] {
        let err = decode_error(&code_body(code)).unwrap_err();
        assert!(matches!(err, BtpdError::UnknownErrorCode(c) if c == code));
        assert!(err.is_decode_error());
    }
}

#[test]
fn test_decode_error_bad_envelope() {
    assert!(decode_error(b"").unwrap_err().is_decode_error());
    assert!(decode_error(b"d6:resulte").unwrap_err().is_decode_error());
    assert!(decode_error(b"d4:codei").unwrap_err().is_decode_error());
    assert!(decode_error(b"d4:codeixe").unwrap_err().is_decode_error());
}

#[test]
fn test_decode_error_ignores_trailing_keys() {
    assert_eq!(decode_error(&add_body(3)).unwrap(), ErrorCode::Success);
    assert_eq!(decode_error(b"d4:codei10ee").unwrap(), ErrorCode::TorrentActive);
}

// =============================================================================
// Add Reply Tests
// =============================================================================

#[test]
fn test_decode_add_number() {
    let result = decode_add(&add_body(42)).unwrap();
    assert_eq!(result.status, ErrorCode::Success);
    assert_eq!(result.number, Some(42));
}

#[test]
fn test_decode_add_failure_has_no_number() {
    let result = decode_add(&code_body(11)).unwrap();
    assert_eq!(result.status, ErrorCode::TorrentEntryExists);
    assert_eq!(result.number, None);
}

#[test]
fn test_decode_add_success_without_number() {
    let err = decode_add(&code_body(0)).unwrap_err();
    assert!(err.is_decode_error());
}

// =============================================================================
// Status Reply Tests
// =============================================================================

#[test]
fn test_decode_status_two_torrents() {
    let mut first = Entry::new(0, "ubuntu.iso");
    first.state = 3;
    first.uploaded = 123456;
    first.counters = [1000, 900, 5, 64, 60, 58, 300, 400, 25];
    first.download_rate = 77;

    let mut second = Entry::new(1, "debian.iso");
    second.state = 4;

    let reply = decode_status(&status_body(&[first.clone(), second.clone()])).unwrap();
    assert_eq!(reply.status, ErrorCode::Success);
    assert_eq!(reply.records.len(), 2);

    let record = &reply.records[0];
    assert_eq!(record.number, 0);
    assert_eq!(record.title, "ubuntu.iso");
    assert_eq!(record.state, TorrentState::Leeching);
    assert_eq!(record.uploaded, 123456);
    assert_eq!(record.size, 1000);
    assert_eq!(record.downloaded, 900);
    assert_eq!(record.peers, 5);
    assert_eq!(record.total_pieces, 64);
    assert_eq!(record.available_pieces, 60);
    assert_eq!(record.have_pieces, 58);
    assert_eq!(record.sent, 300);
    assert_eq!(record.received, 400);
    assert_eq!(record.upload_rate, 25);
    assert_eq!(record.download_rate, 77);
    assert_eq!(record.directory, "/downloads/ubuntu.iso");
    assert_eq!(record.info_hash, first.hash);

    let record = &reply.records[1];
    assert_eq!(record.number, 1);
    assert_eq!(record.title, "debian.iso");
    assert_eq!(record.state, TorrentState::Seeding);
    assert_eq!(record.info_hash, second.hash);
}

#[test]
fn test_decode_status_hash_hex() {
    let mut entry = Entry::new(9, "hash");
    entry.hash = std::array::from_fn(|i| i as u8);

    let reply = decode_status(&status_body(&[entry])).unwrap();
    assert_eq!(
        reply.records[0].hash_hex(),
        "000102030405060708090a0b0c0d0e0f10111213"
    );
}

#[test]
fn test_decode_status_hash_containing_markers() {
    // Raw hash bytes that look like delimiters must not confuse the scanner
    let mut entry = Entry::new(2, "tricky");
    entry.hash.copy_from_slice(b"eli2ei3e4:li1e20:xee");

    let reply = decode_status(&status_body(&[entry.clone()])).unwrap();
    assert_eq!(reply.records[0].info_hash, entry.hash);
    assert_eq!(reply.records[0].directory, entry.directory);
}

#[test]
fn test_decode_status_empty() {
    let reply = decode_status(&status_body(&[])).unwrap();
    assert_eq!(reply.status, ErrorCode::Success);
    assert!(reply.records.is_empty());
}

#[test]
fn test_decode_status_daemon_failure() {
    let reply = decode_status(&code_body(9)).unwrap();
    assert_eq!(reply.status, ErrorCode::ShuttingDown);
    assert!(reply.records.is_empty());
}

#[test]
fn test_decode_status_all_states() {
    let symbols = ['I', '+', '-', 'L', 'S'];
    let entries: Vec<Entry> = (0..5)
        .map(|i| {
            let mut entry = Entry::new(i, "t");
            entry.state = i as i64;
            entry
        })
        .collect();

    let reply = decode_status(&status_body(&entries)).unwrap();
    for (record, symbol) in reply.records.iter().zip(symbols) {
        assert_eq!(record.state.symbol(), symbol);
        assert_eq!(record.field(Field::State), symbol.to_string());
    }
}

#[test]
fn test_decode_status_unknown_state() {
    let mut entry = Entry::new(0, "t");
    entry.state = 5;
    let err = decode_status(&status_body(&[entry])).unwrap_err();
    assert!(err.is_decode_error());
    assert!(err.to_string().contains("unknown torrent state"));
}

#[test]
fn test_decode_status_truncated_everywhere() {
    let body = status_body(&[Entry::new(0, "a"), Entry::new(1, "b")]);

    // Every strict prefix is malformed, and no prefix yields a partial table
    for len in 0..body.len() {
        let result = decode_status(&body[..len]);
        let err = result.expect_err(&format!("prefix of {} bytes decoded", len));
        assert!(err.is_decode_error(), "prefix {}: {}", len, err);
    }
}

#[test]
fn test_decode_status_short_hash() {
    let body = status_body(&[Entry::new(0, "a")]);
    let corrupted = String::from_utf8_lossy(&body).replace("i1e20:", "i1e19:");
    let err = decode_status(corrupted.as_bytes()).unwrap_err();
    assert!(err.is_decode_error());
}

#[test]
fn test_decode_status_wrong_type_tag() {
    // Title sent with the numeric tag
    let body = b"d4:codei0e6:resultlli2ei0ei2ei0ei2e3:fooeee";
    assert!(decode_status(body).unwrap_err().is_decode_error());
}

#[test]
fn test_generic_counter_order() {
    assert_eq!(
        GENERIC_COUNTERS.map(Field::name),
        ["size", "downed", "peers", "tpieces", "apieces", "hpieces", "sent", "rec", "uprate"]
    );
}

#[test]
fn test_field_tags_round_trip() {
    for field in Field::ALL {
        assert_eq!(Field::from_tag(field.tag()).unwrap(), field);
    }
    assert!(matches!(Field::from_tag("%z"), Err(BtpdError::UnknownField(_))));
}

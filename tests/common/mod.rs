//! Shared test fixtures: reply builders, a scripted transport and a fake daemon.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::os::unix::net::UnixListener;
use std::thread::JoinHandle;

use btpd_client::network::{read_frame, write_frame, Transport};
use btpd_client::{BtpdError, Config, Result};
use tempfile::TempDir;

// =============================================================================
// Reply Builders
// =============================================================================

/// Field values for one synthetic status entry
#[derive(Debug, Clone)]
pub struct Entry {
    pub number: u32,
    pub state: i64,
    pub title: String,
    pub uploaded: u64,
    /// size, downed, peers, tpieces, apieces, hpieces, sent, rec, uprate
    pub counters: [u64; 9],
    pub download_rate: u64,
    pub hash: [u8; 20],
    pub directory: String,
}

impl Entry {
    pub fn new(number: u32, title: &str) -> Self {
        let mut hash = [0u8; 20];
        for (i, b) in hash.iter_mut().enumerate() {
            *b = (number as u8).wrapping_mul(20).wrapping_add(i as u8);
        }
        Self {
            number,
            state: 0,
            title: title.to_string(),
            uploaded: 0,
            counters: [0; 9],
            download_rate: 0,
            hash,
            directory: format!("/downloads/{}", title),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = b"l".to_vec();
        out.extend(num(self.number as u64));
        out.extend(num_signed(self.state));
        out.extend(text(&self.title));
        out.extend(num(self.uploaded));
        for value in self.counters {
            out.extend(num(value));
        }
        out.extend(num(self.download_rate));
        out.extend_from_slice(b"i1e20:");
        out.extend_from_slice(&self.hash);
        out.extend(text(&self.directory));
        out.push(b'e');
        out
    }
}

fn num(value: u64) -> Vec<u8> {
    format!("i2ei{}e", value).into_bytes()
}

fn num_signed(value: i64) -> Vec<u8> {
    format!("i2ei{}e", value).into_bytes()
}

fn text(value: &str) -> Vec<u8> {
    let mut out = format!("i3e{}:", value.len()).into_bytes();
    out.extend_from_slice(value.as_bytes());
    out
}

/// Successful status reply holding the given entries
pub fn status_body(entries: &[Entry]) -> Vec<u8> {
    let mut out = b"d4:codei0e6:resultl".to_vec();
    for entry in entries {
        out.extend(entry.encode());
    }
    out.extend_from_slice(b"ee");
    out
}

/// Reply carrying only an error code
pub fn code_body(code: i64) -> Vec<u8> {
    format!("d4:codei{}ee", code).into_bytes()
}

/// Successful add reply
pub fn add_body(number: u32) -> Vec<u8> {
    format!("d4:codei0e3:numi{}ee", number).into_bytes()
}

// =============================================================================
// Scripted Transport
// =============================================================================

/// In-memory transport replaying canned replies and recording requests
#[derive(Default)]
pub struct ScriptedTransport {
    pub replies: VecDeque<Result<Vec<u8>>>,
    pub requests: Vec<Vec<u8>>,
}

impl ScriptedTransport {
    pub fn with_replies(replies: Vec<Vec<u8>>) -> Self {
        Self {
            replies: replies.into_iter().map(Ok).collect(),
            requests: Vec::new(),
        }
    }
}

impl Transport for ScriptedTransport {
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.requests.push(request.to_vec());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(BtpdError::TruncatedResponse("no scripted reply".into())))
    }
}

// =============================================================================
// Fake Daemon
// =============================================================================

/// What the fake daemon sends back on one connection
pub enum Reply {
    /// A complete framed body
    Frame(Vec<u8>),
    /// Raw bytes written as-is before closing
    Raw(Vec<u8>),
}

/// A daemon stand-in listening on `<tempdir>/sock`.
///
/// Accepts one connection per scripted reply, reads one framed request from
/// each, answers, and closes.
pub struct FakeDaemon {
    pub dir: TempDir,
    handle: JoinHandle<Vec<Vec<u8>>>,
}

impl FakeDaemon {
    pub fn spawn(replies: Vec<Reply>) -> Self {
        let dir = TempDir::new().unwrap();
        let listener = UnixListener::bind(dir.path().join("sock")).unwrap();

        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for reply in replies {
                let (mut stream, _) = listener.accept().unwrap();
                requests.push(read_frame(&mut stream).unwrap());
                match reply {
                    Reply::Frame(body) => write_frame(&mut stream, &body).unwrap(),
                    Reply::Raw(bytes) => {
                        use std::io::Write;
                        stream.write_all(&bytes).unwrap();
                    }
                }
            }
            requests
        });

        Self { dir, handle }
    }

    pub fn config(&self) -> Config {
        Config::builder()
            .base_dir(self.dir.path())
            .read_timeout_ms(5000)
            .write_timeout_ms(5000)
            .build()
    }

    /// Wait for the daemon thread and return every request body it saw
    pub fn requests(self) -> Vec<Vec<u8>> {
        self.handle.join().unwrap()
    }
}

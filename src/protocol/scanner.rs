//! Cursor scanner
//!
//! Walks an immutable reply body with an offset cursor. Each method is one
//! named sub-parser; a failure leaves the cursor where the mismatch was found
//! and reports that offset.

use std::str::FromStr;

use crate::error::{BtpdError, Result};

pub(crate) struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Unconsumed bytes
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Consume `literal` or fail
    pub(crate) fn expect(&mut self, literal: &[u8]) -> Result<()> {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{}'",
                String::from_utf8_lossy(literal)
            )))
        }
    }

    /// Advance past the next occurrence of `marker`
    pub(crate) fn skip_past(&mut self, marker: &[u8]) -> Result<()> {
        match find(self.rest(), marker) {
            Some(offset) => {
                self.pos += offset + marker.len();
                Ok(())
            }
            None => Err(self.error(format!(
                "marker '{}' not found",
                String::from_utf8_lossy(marker)
            ))),
        }
    }

    /// Decimal digits up to (and consuming) `terminator`
    pub(crate) fn delimited_integer<T: FromStr>(&mut self, terminator: u8) -> Result<T> {
        let buf = self.buf;
        let start = self.pos;
        let len = buf[start..]
            .iter()
            .position(|&b| b == terminator)
            .ok_or_else(|| {
                self.error(format!(
                    "unterminated integer, expected '{}'",
                    terminator as char
                ))
            })?;

        let digits = &buf[start..start + len];
        let value = std::str::from_utf8(digits)
            .ok()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| {
                self.error(format!(
                    "invalid integer '{}'",
                    String::from_utf8_lossy(digits)
                ))
            })?;

        self.pos = start + len + 1;
        Ok(value)
    }

    /// Bencoded integer: `i<digits>e`
    pub(crate) fn integer<T: FromStr>(&mut self) -> Result<T> {
        self.expect(b"i")?;
        self.delimited_integer(b'e')
    }

    /// Exactly `len` raw bytes
    pub(crate) fn raw_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.rest().len() < len {
            return Err(self.error(format!(
                "need {} bytes, {} left",
                len,
                self.rest().len()
            )));
        }
        let buf = self.buf;
        let bytes = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Bencoded byte string: `<len>:<bytes>`
    pub(crate) fn length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len: usize = self.delimited_integer(b':')?;
        self.raw_bytes(len)
    }

    pub(crate) fn error(&self, message: String) -> BtpdError {
        BtpdError::Protocol(format!("{} at offset {}", message, self.pos))
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

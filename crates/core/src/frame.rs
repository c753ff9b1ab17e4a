// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Message framing on a byte stream.
//!
//! Each message is followed by a delimiter, there is no length prefix so the
//! [Framer] accumulates bytes until it finds a delimiter.
use bytes::{Buf, Bytes, BytesMut};

/// The frames delimiter.
pub const DELIMITER: &str = "_-^emil^-_";

/// Splits a byte stream into frames.
#[derive(Debug, Default)]
pub struct Framer {
    buf: BytesMut,
    // Number of bytes already searched for a delimiter.
    scanned: usize,
}

impl Framer {
    /// Creates a new framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends received bytes.
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Returns the next complete frame without its delimiter, or `None` if the
    /// buffer has no complete frame.
    pub fn next_frame(&mut self) -> Option<Bytes> {
        let delimiter = DELIMITER.as_bytes();

        // A delimiter may straddle the last searched position.
        let start = self.scanned.saturating_sub(delimiter.len() - 1);
        let found = self.buf[start..]
            .windows(delimiter.len())
            .position(|w| w == delimiter);

        match found {
            Some(pos) => {
                let frame = self.buf.split_to(start + pos).freeze();
                self.buf.advance(delimiter.len());
                self.scanned = 0;
                Some(frame)
            }
            None => {
                self.scanned = self.buf.len();
                None
            }
        }
    }

    /// Number of buffered bytes that are not yet part of a frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// The read buffer, reads can fill it directly.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }
}

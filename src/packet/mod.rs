// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequential packet buffer.
//!
//! A [`Packet`] is a byte buffer with a read cursor. Writes append to the end,
//! reads consume from the cursor. Field layout is entirely decided by the
//! order of calls; nothing about the fields is stored on the wire except
//! their length prefixes.
//!
//! # Wire Format
//!
//! All multi-byte values are little-endian.
//!
//! | Field | Prefix | Payload |
//! |---|---|---|
//! | `i32` | none | 4 bytes |
//! | GBK string | `i16` byte length | GBK bytes |
//! | string | `i16` byte length | UTF-8 bytes |
//! | bytes | `i32` byte length | raw bytes |
//! | legacy date/time | none | 8-byte `f64` day count |
//!
//! # Failure Semantics
//!
//! Reads are atomic: a failed read leaves the cursor where it was. Writes
//! validate and convert before appending, so a failed write leaves the buffer
//! untouched.

pub mod builder;

use std::fmt;
use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Local, TimeZone};
use tracing::trace;

use crate::encoding::{gbk, legacy_time};
use crate::{CodecError, FieldKind, Result};

pub use builder::{PacketBuilder, PacketConfig};

/// Width in bytes of the length prefix for string fields.
const STRING_PREFIX_SIZE: usize = 2;

/// Width in bytes of the length prefix for byte blobs.
const BYTES_PREFIX_SIZE: usize = 4;

/// Byte buffer with a read cursor for sequential field access.
///
/// Not internally synchronized: share across threads only behind the
/// caller's own lock.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), bytepacket::CodecError> {
/// use bytepacket::Packet;
///
/// let mut packet = Packet::default();
/// packet.write_i32(42);
/// packet.write_string("hi")?;
/// packet.write_bytes(&[0x01, 0x02])?;
///
/// let mut reader = Packet::new(packet.data());
/// assert_eq!(reader.read_i32()?, 42);
/// assert_eq!(reader.read_string()?, "hi");
/// assert_eq!(reader.read_bytes()?, vec![0x01, 0x02]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Packet {
    /// Consumed bytes, unread bytes and appended writes, in that order
    buffer: Vec<u8>,
    /// Index of the first unread byte
    cursor: usize,
}

impl Packet {
    /// Create a packet over the given bytes, cursor at the start.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: data.into(),
            cursor: 0,
        }
    }

    /// Create an empty packet with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Start configuring a packet.
    pub fn builder() -> PacketBuilder {
        PacketBuilder::new()
    }

    /// Replace the whole buffer and reset the cursor.
    pub fn set_data(&mut self, data: impl Into<Vec<u8>>) {
        self.buffer = data.into();
        self.cursor = 0;
        trace!(len = self.buffer.len(), "packet data replaced");
    }

    /// Unread bytes followed by anything written since.
    ///
    /// Shrinks as reads consume, grows as writes append.
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.cursor..]
    }

    /// Consume the packet, returning its unread bytes.
    pub fn into_data(mut self) -> Vec<u8> {
        self.buffer.drain(..self.cursor);
        self.buffer
    }

    /// Bytes consumed since the last `set_data`, `compact` or `clear`.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// True if nothing is left to read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Drop consumed bytes from the underlying storage.
    ///
    /// [`data`](Self::data) is unchanged; [`position`](Self::position) drops to 0.
    pub fn compact(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let consumed = self.cursor;
        self.buffer.drain(..consumed);
        self.cursor = 0;
        trace!(consumed, remaining = self.buffer.len(), "packet compacted");
    }

    /// Discard all bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    // ------------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------------

    /// Range of the `len` bytes starting `offset` bytes past the cursor.
    fn span(&self, field: FieldKind, offset: usize, len: usize) -> Result<Range<usize>> {
        let start = self.cursor + offset;
        let available = self.buffer.len().saturating_sub(start);
        if len > available {
            return Err(CodecError::insufficient_data(
                field,
                offset + len,
                self.remaining(),
                self.cursor,
            ));
        }
        Ok(start..start + len)
    }

    /// Locate a length-prefixed payload at the cursor without consuming it.
    ///
    /// Returns the payload range; its end is where the cursor moves on commit.
    fn prefixed_span(&self, field: FieldKind) -> Result<Range<usize>> {
        let (prefix_size, length) = match field {
            FieldKind::Bytes => {
                let prefix = self.span(field, 0, BYTES_PREFIX_SIZE)?;
                (
                    BYTES_PREFIX_SIZE,
                    i64::from(LittleEndian::read_i32(&self.buffer[prefix])),
                )
            }
            _ => {
                let prefix = self.span(field, 0, STRING_PREFIX_SIZE)?;
                (
                    STRING_PREFIX_SIZE,
                    i64::from(LittleEndian::read_i16(&self.buffer[prefix])),
                )
            }
        };
        let length = usize::try_from(length)
            .map_err(|_| CodecError::invalid_length(field, length, self.cursor))?;
        self.span(field, prefix_size, length)
    }

    // ------------------------------------------------------------------------
    // Fixed-size fields
    // ------------------------------------------------------------------------

    /// Read a little-endian `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        let range = self.span(FieldKind::Int16, 0, 2)?;
        let value = LittleEndian::read_i16(&self.buffer[range.clone()]);
        self.cursor = range.end;
        Ok(value)
    }

    /// Append a little-endian `i16`.
    pub fn write_i16(&mut self, value: i16) {
        let mut bytes = [0u8; 2];
        LittleEndian::write_i16(&mut bytes, value);
        self.buffer.extend_from_slice(&bytes);
    }

    /// Read a little-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        let range = self.span(FieldKind::Int32, 0, 4)?;
        let value = LittleEndian::read_i32(&self.buffer[range.clone()]);
        self.cursor = range.end;
        Ok(value)
    }

    /// Append a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_i32(&mut bytes, value);
        self.buffer.extend_from_slice(&bytes);
    }

    /// Read a little-endian IEEE-754 double.
    pub fn read_f64(&mut self) -> Result<f64> {
        let range = self.span(FieldKind::Float64, 0, 8)?;
        let value = LittleEndian::read_f64(&self.buffer[range.clone()]);
        self.cursor = range.end;
        Ok(value)
    }

    /// Append a little-endian IEEE-754 double.
    pub fn write_f64(&mut self, value: f64) {
        let mut bytes = [0u8; 8];
        LittleEndian::write_f64(&mut bytes, value);
        self.buffer.extend_from_slice(&bytes);
    }

    // ------------------------------------------------------------------------
    // Length-prefixed fields
    // ------------------------------------------------------------------------

    /// Read a GBK string with a 16-bit length prefix, returning it as UTF-8.
    pub fn read_string_gbk(&mut self) -> Result<String> {
        let range = self.prefixed_span(FieldKind::StringGbk)?;
        let text = gbk::decode(&self.buffer[range.clone()])?;
        self.cursor = range.end;
        Ok(text)
    }

    /// Write `text` as GBK with a 16-bit prefix holding the encoded length.
    pub fn write_string_gbk(&mut self, text: &str) -> Result<()> {
        let encoded = gbk::encode(text)?;
        self.write_prefixed(FieldKind::StringGbk, &encoded)
    }

    /// Read a UTF-8 string with a 16-bit length prefix.
    pub fn read_string(&mut self) -> Result<String> {
        let range = self.prefixed_span(FieldKind::String)?;
        let text = std::str::from_utf8(&self.buffer[range.clone()])
            .map_err(|e| CodecError::decoding("UTF-8", e.to_string()))?
            .to_owned();
        self.cursor = range.end;
        Ok(text)
    }

    /// Write `text` as UTF-8 with a 16-bit byte-length prefix.
    pub fn write_string(&mut self, text: &str) -> Result<()> {
        self.write_prefixed(FieldKind::String, text.as_bytes())
    }

    /// Read a byte blob with a 32-bit length prefix.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let range = self.prefixed_span(FieldKind::Bytes)?;
        let bytes = self.buffer[range.clone()].to_vec();
        self.cursor = range.end;
        Ok(bytes)
    }

    /// Write a byte blob with a 32-bit length prefix.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.write_prefixed(FieldKind::Bytes, data)
    }

    fn write_prefixed(&mut self, field: FieldKind, payload: &[u8]) -> Result<()> {
        match field {
            FieldKind::Bytes => {
                let len = i32::try_from(payload.len()).map_err(|_| {
                    CodecError::length_overflow(field, payload.len(), i32::MAX as usize)
                })?;
                self.write_i32(len);
            }
            _ => {
                let len = i16::try_from(payload.len()).map_err(|_| {
                    CodecError::length_overflow(field, payload.len(), i16::MAX as usize)
                })?;
                self.write_i16(len);
            }
        }
        self.buffer.extend_from_slice(payload);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Legacy date/time
    // ------------------------------------------------------------------------

    /// Read a legacy day-count date/time in the local time zone.
    pub fn read_legacy_datetime(&mut self) -> Result<DateTime<Local>> {
        self.read_legacy_datetime_in(&Local)
    }

    /// Read a legacy day-count date/time with the epoch taken in `tz`.
    pub fn read_legacy_datetime_in<Tz: TimeZone>(&mut self, tz: &Tz) -> Result<DateTime<Tz>> {
        let range = self.span(FieldKind::LegacyDateTime, 0, 8)?;
        let days = LittleEndian::read_f64(&self.buffer[range.clone()]);
        let datetime = legacy_time::to_datetime(days, tz)?;
        self.cursor = range.end;
        Ok(datetime)
    }

    /// Write `datetime` as a legacy day count relative to the epoch in its zone.
    pub fn write_legacy_datetime<Tz: TimeZone>(&mut self, datetime: &DateTime<Tz>) {
        self.write_f64(legacy_time::from_datetime(datetime));
    }
}

impl From<Vec<u8>> for Packet {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for Packet {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        self.data()
    }
}

/// Packets are equal when their unread bytes are equal.
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
    }
}

impl Eq for Packet {}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("position", &self.cursor)
            .field("remaining", &self.remaining())
            .field("data", &hex::encode(self.data()))
            .finish()
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # bytepacket
//!
//! Sequential binary packet reader/writer for little-endian wire protocols.
//!
//! A [`Packet`] wraps a byte buffer and a read cursor. Each call reads or
//! appends one field; the caller's call order is the packet layout.
//!
//! ## Field Types
//!
//! - `i32` (and the raw `i16`/`f64` building blocks)
//! - UTF-8 strings with a 16-bit length prefix
//! - GBK strings with a 16-bit length prefix, converted to and from UTF-8
//! - Byte blobs with a 32-bit length prefix
//! - Legacy date/time: `f64` day count since 1899-12-30 local time
//!
//! ## Architecture
//!
//! - `core/` - Error type and field kinds
//! - `encoding/` - GBK text conversion and legacy time conversion
//! - `packet/` - The packet buffer and its builder
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), bytepacket::CodecError> {
//! use bytepacket::Packet;
//!
//! let mut packet = Packet::default();
//! packet.write_string_gbk("你好")?;
//! packet.write_i32(7);
//!
//! assert_eq!(packet.read_string_gbk()?, "你好");
//! assert_eq!(packet.read_i32()?, 7);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use self::core::{CodecError, FieldKind, Result};

// Value conversions
pub mod encoding;

// Packet buffer
pub mod packet;

pub use packet::{Packet, PacketBuilder, PacketConfig};

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating packets.

use super::Packet;

/// Configuration for creating a packet.
#[derive(Debug, Clone, Default)]
pub struct PacketConfig {
    /// Initial buffer capacity in bytes
    pub capacity: Option<usize>,
    /// Initial bytes to read from
    pub data: Vec<u8>,
}

/// Builder for creating packets.
///
/// # Example
///
/// ```
/// use bytepacket::Packet;
///
/// let packet = Packet::builder()
///     .data(vec![0x2A, 0x00, 0x00, 0x00])
///     .capacity(256)
///     .build();
/// assert_eq!(packet.remaining(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PacketBuilder {
    config: PacketConfig,
}

impl PacketBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: PacketConfig) -> Self {
        Self { config }
    }

    /// Set the initial buffer capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = Some(capacity);
        self
    }

    /// Set the initial bytes.
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.config.data = data.into();
        self
    }

    /// Build the packet.
    ///
    /// Capacity never drops below the initial data length.
    pub fn build(self) -> Packet {
        let PacketConfig { capacity, mut data } = self.config;
        if let Some(capacity) = capacity {
            data.reserve(capacity.saturating_sub(data.len()));
        }
        Packet::new(data)
    }
}

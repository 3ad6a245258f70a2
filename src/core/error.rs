// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for bytepacket.
//!
//! Every read and write on a [`Packet`](crate::Packet) reports failure through
//! [`CodecError`]:
//! - Buffer shortage and malformed length prefixes
//! - Text decoding and encoding
//! - Legacy date/time conversion

use std::fmt;

use thiserror::Error;

/// Kind of field being read or written when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Raw little-endian `i16`
    Int16,
    /// Little-endian `i32`
    Int32,
    /// Little-endian IEEE-754 double
    Float64,
    /// GBK text with a 16-bit length prefix
    StringGbk,
    /// UTF-8 text with a 16-bit length prefix
    String,
    /// Byte blob with a 32-bit length prefix
    Bytes,
    /// Day-count double since 1899-12-30
    LegacyDateTime,
}

impl FieldKind {
    /// Static name used in messages and log fields.
    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::Int16 => "int16",
            FieldKind::Int32 => "int32",
            FieldKind::Float64 => "float64",
            FieldKind::StringGbk => "string_gbk",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::LegacyDateTime => "legacy_datetime",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while reading or writing packet fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Fewer bytes remain than the field requires
    #[error("Insufficient data for {field}: requested {requested} bytes at position {position}, but only {available} bytes available")]
    InsufficientData {
        /// Field being read
        field: FieldKind,
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the read started
        position: usize,
    },

    /// A length prefix declared a negative length
    #[error("Invalid {field} length prefix {length} at position {position}")]
    InvalidLength {
        /// Field being read
        field: FieldKind,
        /// Declared length
        length: i64,
        /// Cursor position of the prefix
        position: usize,
    },

    /// Payload does not fit in the field's length prefix
    #[error("{field} payload of {length} bytes exceeds the prefix limit of {max} bytes")]
    LengthOverflow {
        /// Field being written
        field: FieldKind,
        /// Payload length in bytes
        length: usize,
        /// Largest length the prefix can declare
        max: usize,
    },

    /// Bytes are not valid in the source text encoding
    #[error("{encoding} decode error: {message}")]
    Decoding {
        /// Source encoding (e.g., "GBK", "UTF-8")
        encoding: &'static str,
        /// Error message
        message: String,
    },

    /// Character has no representation in the target encoding
    #[error("{encoding} encode error: character {character:?} is unmappable")]
    Encoding {
        /// Target encoding
        encoding: &'static str,
        /// First unmappable character
        character: char,
    },

    /// Value cannot be converted to the requested representation
    #[error("Value out of range for {field}: {message}")]
    OutOfRange {
        /// Field being converted
        field: FieldKind,
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create an insufficient data error.
    pub fn insufficient_data(
        field: FieldKind,
        requested: usize,
        available: usize,
        position: usize,
    ) -> Self {
        CodecError::InsufficientData {
            field,
            requested,
            available,
            position,
        }
    }

    /// Create an invalid length error.
    pub fn invalid_length(field: FieldKind, length: i64, position: usize) -> Self {
        CodecError::InvalidLength {
            field,
            length,
            position,
        }
    }

    /// Create a length overflow error.
    pub fn length_overflow(field: FieldKind, length: usize, max: usize) -> Self {
        CodecError::LengthOverflow { field, length, max }
    }

    /// Create a decoding error.
    pub fn decoding(encoding: &'static str, message: impl Into<String>) -> Self {
        CodecError::Decoding {
            encoding,
            message: message.into(),
        }
    }

    /// Create an encoding error.
    pub fn encoding(encoding: &'static str, character: char) -> Self {
        CodecError::Encoding {
            encoding,
            character,
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(field: FieldKind, message: impl Into<String>) -> Self {
        CodecError::OutOfRange {
            field,
            message: message.into(),
        }
    }

    /// True if the error was caused by running out of buffered bytes.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, CodecError::InsufficientData { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::InsufficientData {
                field,
                requested,
                available,
                position,
            } => vec![
                ("field", field.to_string()),
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidLength {
                field,
                length,
                position,
            } => vec![
                ("field", field.to_string()),
                ("length", length.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::LengthOverflow { field, length, max } => vec![
                ("field", field.to_string()),
                ("length", length.to_string()),
                ("max", max.to_string()),
            ],
            CodecError::Decoding { encoding, message } => {
                vec![("encoding", encoding.to_string()), ("message", message.clone())]
            }
            CodecError::Encoding {
                encoding,
                character,
            } => vec![
                ("encoding", encoding.to_string()),
                ("character", character.to_string()),
            ],
            CodecError::OutOfRange { field, message } => {
                vec![("field", field.to_string()), ("message", message.clone())]
            }
        }
    }
}

/// Result type for bytepacket operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_error() {
        let err = CodecError::insufficient_data(FieldKind::Int32, 4, 1, 10);
        assert!(err.is_insufficient_data());
        assert_eq!(
            err.to_string(),
            "Insufficient data for int32: requested 4 bytes at position 10, but only 1 bytes available"
        );
    }

    #[test]
    fn test_invalid_length_error() {
        let err = CodecError::invalid_length(FieldKind::Bytes, -3, 7);
        assert!(!err.is_insufficient_data());
        assert_eq!(err.to_string(), "Invalid bytes length prefix -3 at position 7");
    }

    #[test]
    fn test_length_overflow_error() {
        let err = CodecError::length_overflow(FieldKind::String, 40000, 32767);
        assert_eq!(
            err.to_string(),
            "string payload of 40000 bytes exceeds the prefix limit of 32767 bytes"
        );
    }

    #[test]
    fn test_decoding_error() {
        let err = CodecError::decoding("GBK", "malformed sequence");
        assert_eq!(err.to_string(), "GBK decode error: malformed sequence");
    }

    #[test]
    fn test_encoding_error() {
        let err = CodecError::encoding("GBK", '\u{1F600}');
        assert!(matches!(err, CodecError::Encoding { character: '\u{1F600}', .. }));
        assert_eq!(
            err.to_string(),
            "GBK encode error: character '\u{1F600}' is unmappable"
        );
    }

    #[test]
    fn test_out_of_range_error() {
        let err = CodecError::out_of_range(FieldKind::LegacyDateTime, "NaN");
        assert_eq!(err.to_string(), "Value out of range for legacy_datetime: NaN");
    }

    #[test]
    fn test_log_fields_insufficient_data() {
        let err = CodecError::insufficient_data(FieldKind::String, 12, 3, 2);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("field", "string".to_string()));
        assert_eq!(fields[1], ("requested", "12".to_string()));
        assert_eq!(fields[2], ("available", "3".to_string()));
        assert_eq!(fields[3], ("position", "2".to_string()));
    }

    #[test]
    fn test_log_fields_encoding() {
        let err = CodecError::encoding("GBK", 'é');
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("encoding", "GBK".to_string()));
        assert_eq!(fields[1], ("character", "é".to_string()));
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::StringGbk.to_string(), "string_gbk");
        assert_eq!(FieldKind::LegacyDateTime.name(), "legacy_datetime");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::decoding("UTF-8", "invalid byte");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}

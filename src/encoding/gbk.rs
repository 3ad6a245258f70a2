// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! GBK <-> UTF-8 text conversion.
//!
//! Stateless wrappers over the `encoding_rs` GBK tables. Both directions are
//! strict: malformed input fails with [`CodecError::Decoding`] and characters
//! outside the GBK repertoire fail with [`CodecError::Encoding`], never with
//! replacement characters or HTML escapes.

use encoding_rs::{EncoderResult, GBK};
use tracing::debug;

use crate::{CodecError, Result};

/// Label used in errors and log events.
pub const GBK_LABEL: &str = "GBK";

/// Decode GBK bytes into a UTF-8 string.
///
/// GB18030 four-byte sequences are rejected even though the underlying
/// decoder understands them; GBK has no four-byte form.
pub fn decode(bytes: &[u8]) -> Result<String> {
    if let Some(offset) = four_byte_sequence(bytes) {
        debug!(offset, bytes = %hex::encode(bytes), "GB18030 four-byte sequence in GBK text");
        return Err(CodecError::decoding(
            GBK_LABEL,
            format!("four-byte GB18030 sequence at offset {offset}"),
        ));
    }
    match GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text.into_owned()),
        None => {
            debug!(bytes = %hex::encode(bytes), "malformed GBK sequence");
            Err(CodecError::decoding(
                GBK_LABEL,
                format!("malformed sequence in {} bytes", bytes.len()),
            ))
        }
    }
}

/// Offset of the first GB18030 four-byte sequence, if any.
///
/// A four-byte sequence starts with a lead byte (0x81-0xFE) whose next byte
/// is an ASCII digit; a two-byte GBK trail is never in 0x30-0x39.
fn four_byte_sequence(bytes: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            0x81..=0xFE => {
                if matches!(bytes.get(i + 1), Some(0x30..=0x39)) {
                    return Some(i);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    None
}

/// Encode a UTF-8 string into GBK bytes.
///
/// Fails on the first character GBK cannot represent.
pub fn encode(text: &str) -> Result<Vec<u8>> {
    let mut encoder = GBK.new_encoder();
    // Every char takes at most two GBK bytes, so this is only None on overflow.
    let capacity = encoder
        .max_buffer_length_from_utf8_without_replacement(text.len())
        .unwrap_or(text.len().saturating_mul(2));
    let mut out = Vec::with_capacity(capacity);

    let (result, _read) = encoder.encode_from_utf8_to_vec_without_replacement(text, &mut out, true);
    match result {
        EncoderResult::InputEmpty => Ok(out),
        EncoderResult::Unmappable(character) => {
            debug!(character = %character, "character has no GBK mapping");
            Err(CodecError::encoding(GBK_LABEL, character))
        }
        // Unreachable: capacity covers the worst case of two bytes per char.
        EncoderResult::OutputFull => Err(CodecError::decoding(
            GBK_LABEL,
            format!("encoder ran out of its {capacity}-byte scratch buffer"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_is_identity() {
        assert_eq!(encode("hello, world").unwrap(), b"hello, world".to_vec());
    }

    #[test]
    fn test_encode_chinese() {
        assert_eq!(encode("中文").unwrap(), vec![0xD6, 0xD0, 0xCE, 0xC4]);
        assert_eq!(encode("你好").unwrap(), vec![0xC4, 0xE3, 0xBA, 0xC3]);
    }

    #[test]
    fn test_decode_chinese() {
        assert_eq!(decode(&[0xD6, 0xD0, 0xCE, 0xC4]).unwrap(), "中文");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]).unwrap(), "");
        assert!(encode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_truncated_lead_byte() {
        let err = decode(&[0xC4, 0xE3, 0xBA]).unwrap_err();
        assert!(matches!(err, CodecError::Decoding { encoding: "GBK", .. }));
    }

    #[test]
    fn test_decode_invalid_lead_byte() {
        assert!(decode(&[0xFF]).is_err());
    }

    #[test]
    fn test_encode_emoji_fails() {
        let err = encode("ok \u{1F600}").unwrap_err();
        assert_eq!(err, CodecError::encoding(GBK_LABEL, '\u{1F600}'));
    }

    #[test]
    fn test_encode_reports_first_unmappable() {
        let err = encode("中\u{0E01}\u{1F600}").unwrap_err();
        assert_eq!(err, CodecError::encoding(GBK_LABEL, '\u{0E01}'));
    }

    #[test]
    fn test_decode_rejects_four_byte_sequences() {
        // U+0080 and U+20000 in GB18030 four-byte form.
        let err = decode(&[0x81, 0x30, 0x81, 0x30]).unwrap_err();
        assert_eq!(
            err,
            CodecError::decoding(GBK_LABEL, "four-byte GB18030 sequence at offset 0")
        );
        let err = decode(&[b'a', 0xD6, 0xD0, 0x95, 0x32, 0x82, 0x36]).unwrap_err();
        assert_eq!(
            err,
            CodecError::decoding(GBK_LABEL, "four-byte GB18030 sequence at offset 3")
        );
    }

    #[test]
    fn test_trail_bytes_are_not_mistaken_for_leads() {
        // 0x81 0x81 is one two-byte char; the 0x30 that follows is plain ASCII.
        let text = decode(&[0x81, 0x81, 0x30]).unwrap();
        assert_eq!(text.chars().count(), 2);
        assert!(text.ends_with('0'));
    }

    #[test]
    fn test_decoded_text_encodes_back() {
        let bytes = [0xC4, 0xE3, 0xBA, 0xC3, b'!', 0x80];
        let text = decode(&bytes).unwrap();
        assert_eq!(encode(&text).unwrap(), bytes.to_vec());
    }
}

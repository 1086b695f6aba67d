//! # Binary Codec
//!
//! Canonical Borsh encoding for everything that goes on the wire or gets
//! signed. The layout rules are fixed by the network:
//!
//! - integers are little-endian at their natural width (`u128` for amounts)
//! - strings and byte vectors carry a `u32` length prefix
//! - arrays and sequences carry a `u32` element count
//! - enums start with a `u8` variant index in declaration order
//! - fixed-size keys, signatures and hashes have no prefix
//!
//! Encoding is deterministic. Decoding consumes the whole buffer and fails
//! on truncation, unknown variant indexes, bad UTF-8, or leftover bytes.

use std::io;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::crypto::keys::KeyError;

/// Message borsh attaches when a read runs past the end of the input.
const UNEXPECTED_LENGTH: &str = "Unexpected length of input";

/// Errors from encoding or decoding wire values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value refused to serialize, e.g. a key with a reserved algorithm.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The input ended before the value was complete.
    #[error("input truncated")]
    Truncated,

    /// A key or signature inside the payload was rejected.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Unknown variant index, invalid UTF-8, trailing bytes, and the like.
    #[error("invalid encoding: {0}")]
    Invalid(String),

    /// The text wrapper around the bytes was not valid base64.
    #[error("invalid base64: {0}")]
    Base64(String),
}

impl CodecError {
    fn from_decode(err: io::Error) -> Self {
        if let Some(key_err) = err.get_ref().and_then(|e| e.downcast_ref::<KeyError>()) {
            return CodecError::Key(key_err.clone());
        }
        let message = err.to_string();
        if err.kind() == io::ErrorKind::UnexpectedEof || message.contains(UNEXPECTED_LENGTH) {
            return CodecError::Truncated;
        }
        CodecError::Invalid(message)
    }

    fn from_encode(err: io::Error) -> Self {
        if let Some(key_err) = err.get_ref().and_then(|e| e.downcast_ref::<KeyError>()) {
            return CodecError::Key(key_err.clone());
        }
        CodecError::Encode(err.to_string())
    }
}

/// Encodes `value` into its canonical bytes.
pub fn encode<T: BorshSerialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    borsh::to_vec(value).map_err(CodecError::from_encode)
}

/// Decodes a complete value from `bytes`. Leftover input is an error.
pub fn decode<T: BorshDeserialize>(bytes: &[u8]) -> Result<T, CodecError> {
    borsh::from_slice(bytes).map_err(CodecError::from_decode)
}

/// Encodes `value` and wraps the bytes in standard base64, the form the
/// RPC layer expects.
pub fn encode_base64<T: BorshSerialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(STANDARD.encode(encode(value)?))
}

/// Inverse of [`encode_base64`].
pub fn decode_base64<T: BorshDeserialize>(text: &str) -> Result<T, CodecError> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| CodecError::Base64(e.to_string()))?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PublicKey;

    #[test]
    fn strings_carry_u32_prefix() {
        let bytes = encode("abc").unwrap();
        assert_eq!(bytes, vec![3, 0, 0, 0, b'a', b'b', b'c']);
        let back: String = decode(&bytes).unwrap();
        assert_eq!(back, "abc");
    }

    #[test]
    fn truncated_input() {
        let bytes = encode(&String::from("hello")).unwrap();
        let err = decode::<String>(&bytes[..bytes.len() - 2]).unwrap_err();
        assert_eq!(err, CodecError::Truncated);
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = encode(&7u64).unwrap();
        bytes.push(0);
        assert!(matches!(decode::<u64>(&bytes), Err(CodecError::Invalid(_))));
    }

    #[test]
    fn bad_utf8_rejected() {
        let bytes = vec![2, 0, 0, 0, 0xC3, 0x28];
        assert!(matches!(decode::<String>(&bytes), Err(CodecError::Invalid(_))));
    }

    #[test]
    fn reserved_key_tag_surfaces_key_error() {
        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&[0u8; 32]);
        let err = decode::<PublicKey>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::Key(KeyError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn base64_wrapper() {
        let text = encode_base64(&42u32).unwrap();
        assert_eq!(text, "KgAAAA==");
        assert_eq!(decode_base64::<u32>(&text).unwrap(), 42);
        assert!(matches!(
            decode_base64::<u32>("%%%"),
            Err(CodecError::Base64(_))
        ));
    }
}

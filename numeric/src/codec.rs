//! Byte layout for persisting values.
//!
//! ```text
//! width:u16 | scale:i16 | signed:u8 | saturated:u8 | padding:u8 | raw
//! ```
//!
//! `raw` is the two's-complement pattern in `ceil(width / 8)` bytes. Every
//! multi-byte field uses the same byte order.

use num_bigint::{BigInt, Sign};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::{byte_order, ByteOrder};
use crate::semantics::{FixedPointSemantics, SemanticsError};
use crate::value::FixedPoint;

pub const HEADER_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("{extra} trailing bytes after value")]
    TrailingBytes { extra: usize },
    #[error("flag byte {field} is {value:#04x}, expected 0 or 1")]
    InvalidFlag { field: &'static str, value: u8 },
    #[error(transparent)]
    Semantics(#[from] SemanticsError),
    #[error("raw value does not fit {semantics}")]
    OutOfRange { semantics: FixedPointSemantics },
}

fn payload_len(semantics: FixedPointSemantics) -> usize {
    usize::from(semantics.width()).div_ceil(8)
}

fn put_u16(out: &mut Vec<u8>, value: u16, order: ByteOrder) {
    match order {
        ByteOrder::Little => out.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::Big => out.extend_from_slice(&value.to_be_bytes()),
    }
}

fn get_u16(bytes: [u8; 2], order: ByteOrder) -> u16 {
    match order {
        ByteOrder::Little => u16::from_le_bytes(bytes),
        ByteOrder::Big => u16::from_be_bytes(bytes),
    }
}

fn get_flag(byte: u8, field: &'static str) -> Result<bool, DecodeError> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(DecodeError::InvalidFlag { field, value }),
    }
}

pub fn encode(value: &FixedPoint, order: ByteOrder) -> Vec<u8> {
    let semantics = value.semantics();
    let len = payload_len(semantics);
    let mut out = Vec::with_capacity(HEADER_LEN + len);

    put_u16(&mut out, semantics.width(), order);
    put_u16(&mut out, semantics.scale() as u16, order);
    out.push(u8::from(semantics.is_signed()));
    out.push(u8::from(semantics.is_saturated()));
    out.push(u8::from(semantics.has_unsigned_padding()));

    let fill = if value.is_negative() { 0xff } else { 0x00 };
    let mut raw = value.raw_value().to_signed_bytes_le();
    raw.resize(len, fill);
    if order == ByteOrder::Big {
        raw.reverse();
    }
    out.extend_from_slice(&raw);
    out
}

pub fn decode(bytes: &[u8], order: ByteOrder) -> Result<FixedPoint, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    }
    let width = get_u16([bytes[0], bytes[1]], order);
    let scale = get_u16([bytes[2], bytes[3]], order) as i16;
    let signed = get_flag(bytes[4], "signed")?;
    let saturated = get_flag(bytes[5], "saturated")?;
    let padding = get_flag(bytes[6], "padding")?;
    let semantics = FixedPointSemantics::new(width, scale, signed, saturated, padding)?;

    let expected = HEADER_LEN + payload_len(semantics);
    if bytes.len() < expected {
        return Err(DecodeError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(DecodeError::TrailingBytes {
            extra: bytes.len() - expected,
        });
    }

    let mut raw = bytes[HEADER_LEN..].to_vec();
    if order == ByteOrder::Big {
        raw.reverse();
    }
    let raw = if signed {
        BigInt::from_signed_bytes_le(&raw)
    } else {
        BigInt::from_bytes_le(Sign::Plus, &raw)
    };
    if !semantics.fits(&raw) {
        tracing::trace!(%semantics, "decoded raw value out of range");
        return Err(DecodeError::OutOfRange { semantics });
    }
    Ok(FixedPoint::from_raw(raw, semantics).0)
}

/// Encodes in the process-wide byte order.
pub fn serialize_bytes(value: &FixedPoint) -> Vec<u8> {
    encode(value, byte_order())
}

/// Decodes in the process-wide byte order.
pub fn deserialize_bytes(bytes: &[u8]) -> Result<FixedPoint, DecodeError> {
    decode(bytes, byte_order())
}

/// SHA-256 of the little-endian encoding, as lowercase hex. Stable across
/// hosts regardless of the configured byte order.
pub fn cache_key(value: &FixedPoint) -> String {
    let digest = Sha256::digest(encode(value, ByteOrder::Little));
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

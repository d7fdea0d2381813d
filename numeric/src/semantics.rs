use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bits::pow2;

/// Shape of a fixed-point type: the value is `raw / 2^scale` with `raw`
/// held in `width` bits.
///
/// Text form: `s8.4`, `u16.8`, `u8.7p` (unsigned with padding bit), with an
/// optional `:sat` suffix for saturating types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FixedPointSemantics {
    width: u16,
    scale: i16,
    signed: bool,
    saturated: bool,
    unsigned_padding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticsError {
    #[error("signed fixed-point type needs at least one bit")]
    SignedZeroWidth,
    #[error("unsigned padding needs an unsigned type of at least one bit")]
    InvalidPadding,
    #[error("malformed semantics `{0}` (expected e.g. s8.4, u16.8, u8.7p, s16.15:sat)")]
    Malformed(String),
}

impl FixedPointSemantics {
    pub fn new(
        width: u16,
        scale: i16,
        signed: bool,
        saturated: bool,
        unsigned_padding: bool,
    ) -> Result<Self, SemanticsError> {
        if signed && width == 0 {
            return Err(SemanticsError::SignedZeroWidth);
        }
        if unsigned_padding && (signed || width == 0) {
            return Err(SemanticsError::InvalidPadding);
        }
        Ok(Self {
            width,
            scale,
            signed,
            saturated,
            unsigned_padding,
        })
    }

    pub fn signed(width: u16, scale: i16) -> Result<Self, SemanticsError> {
        Self::new(width, scale, true, false, false)
    }

    pub const fn unsigned(width: u16, scale: i16) -> Self {
        Self {
            width,
            scale,
            signed: false,
            saturated: false,
            unsigned_padding: false,
        }
    }

    /// Plain integer type of `width` bits.
    pub fn integer(width: u16, signed: bool) -> Self {
        Self::unsigned(width, 0).with_signedness(signed)
    }

    /// Zero-width descriptor for slots that have no real type yet.
    pub const fn placeholder() -> Self {
        Self::unsigned(0, 0)
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn scale(&self) -> i16 {
        self.scale
    }

    #[inline]
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    #[inline]
    pub const fn is_saturated(&self) -> bool {
        self.saturated
    }

    #[inline]
    pub const fn has_unsigned_padding(&self) -> bool {
        self.unsigned_padding
    }

    /// Bits that carry the value; a padding bit is always zero.
    pub const fn value_bits(&self) -> u32 {
        self.width as u32 - self.unsigned_padding as u32
    }

    /// Bits left of the binary point, not counting a sign or padding bit.
    /// Negative when the scale exceeds the width.
    pub const fn integral_bits(&self) -> i32 {
        let reserved = (self.signed || self.unsigned_padding) as i32;
        self.width as i32 - self.scale as i32 - reserved
    }

    pub fn min_raw(&self) -> BigInt {
        if self.signed {
            -pow2(u32::from(self.width) - 1)
        } else {
            BigInt::zero()
        }
    }

    pub fn max_raw(&self) -> BigInt {
        if self.signed {
            pow2(u32::from(self.width) - 1) - BigInt::one()
        } else {
            pow2(self.value_bits()) - BigInt::one()
        }
    }

    pub fn fits(&self, raw: &BigInt) -> bool {
        *raw >= self.min_raw() && *raw <= self.max_raw()
    }

    /// Same type with a different storage width. Signed types keep at least
    /// one bit; a zero-width type drops its padding bit.
    pub fn with_width(self, width: u16) -> Self {
        let mut next = Self { width, ..self };
        if next.signed && width == 0 {
            next.width = 1;
        }
        if next.unsigned_padding && width == 0 {
            next.unsigned_padding = false;
        }
        next
    }

    pub fn with_saturation(self, saturated: bool) -> Self {
        Self { saturated, ..self }
    }

    pub fn with_signedness(self, signed: bool) -> Self {
        let next = Self {
            signed,
            unsigned_padding: self.unsigned_padding && !signed,
            ..self
        };
        next.with_width(next.width)
    }

    /// Type both operands are promoted to before a binary operation: the
    /// finer scale, the wider integral part, signed if either is signed and
    /// saturating if either saturates.
    pub fn common(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        let integral = self.integral_bits().max(other.integral_bits());
        let signed = self.signed || other.signed;
        let unsigned_padding = !signed && self.unsigned_padding && other.unsigned_padding;

        let mut width = integral + i32::from(scale);
        if signed || unsigned_padding {
            width += 1;
        }
        let width = u16::try_from(width.max(0)).unwrap_or(u16::MAX);

        Self {
            width,
            scale,
            signed,
            saturated: self.saturated || other.saturated,
            unsigned_padding,
        }
        .with_width(width)
    }
}

impl fmt::Display for FixedPointSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed { 's' } else { 'u' };
        write!(f, "{sign}{}.{}", self.width, self.scale)?;
        if self.unsigned_padding {
            f.write_str("p")?;
        }
        if self.saturated {
            f.write_str(":sat")?;
        }
        Ok(())
    }
}

impl FromStr for FixedPointSemantics {
    type Err = SemanticsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || SemanticsError::Malformed(text.to_string());

        let trimmed = text.trim();
        let (body, saturated) = match trimmed.strip_suffix(":sat") {
            Some(body) => (body, true),
            None => (trimmed, false),
        };
        let (body, unsigned_padding) = match body.strip_suffix('p') {
            Some(body) => (body, true),
            None => (body, false),
        };
        let signed = match body.chars().next() {
            Some('s') => true,
            Some('u') => false,
            _ => return Err(malformed()),
        };
        let (width, scale) = body[1..].split_once('.').ok_or_else(malformed)?;
        let width = width.parse::<u16>().map_err(|_| malformed())?;
        let scale = scale.parse::<i16>().map_err(|_| malformed())?;

        Self::new(width, scale, signed, saturated, unsigned_padding)
    }
}

impl From<FixedPointSemantics> for String {
    fn from(semantics: FixedPointSemantics) -> Self {
        semantics.to_string()
    }
}

impl TryFrom<String> for FixedPointSemantics {
    type Error = SemanticsError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

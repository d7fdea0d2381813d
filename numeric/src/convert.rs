use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use thiserror::Error;

use crate::bits::{pow2, shift_scale, wrap};
use crate::semantics::FixedPointSemantics;
use crate::value::FixedPoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty fixed-point literal")]
    Empty,
    #[error("invalid character `{ch}` at {offset} in fixed-point literal `{text}`")]
    InvalidChar { text: String, ch: char, offset: usize },
    #[error("fixed-point literal `{0}` has no digits")]
    NoDigits(String),
}

impl FixedPoint {
    /// Integer part (rounded toward zero) as a `target_bits` integer of the
    /// same signedness. Out-of-range parts wrap and set the flag.
    pub fn to_integer(&self, target_bits: u16) -> (BigInt, bool) {
        let target = FixedPointSemantics::integer(target_bits, self.is_signed());
        let int_part = self.int_part();
        if target.fits(&int_part) {
            return (int_part, false);
        }
        (
            wrap(&int_part, target.value_bits(), target.is_signed()),
            true,
        )
    }

    /// `value * 2^scale`, floored when the scale is negative.
    pub fn from_integer(value: &BigInt, semantics: FixedPointSemantics) -> (Self, bool) {
        let exact = shift_scale(value, i32::from(semantics.scale()));
        Self::narrowed(exact, semantics)
    }

    /// Rescales and resizes in one step. The flag is set when `target`
    /// cannot hold the value exactly: the integral part does not fit, or
    /// fraction bits were dropped (rounding toward negative infinity).
    pub fn to_semantics(&self, target: FixedPointSemantics) -> (Self, bool) {
        let exact = is_exact_at(
            self.raw_value(),
            i32::from(self.semantics().scale()),
            i32::from(target.scale()),
        );
        let (value, overflow) = self.rescale(target);
        (value, overflow || !exact)
    }

    /// Like [`FixedPoint::to_semantics`], but only a lost integral part sets
    /// the flag. This is the cast between fixed-point types.
    pub fn rescale(&self, target: FixedPointSemantics) -> (Self, bool) {
        let exact = self.raw_at_scale(i32::from(target.scale()));
        Self::narrowed(exact, target)
    }

    /// Parses a decimal literal such as `-3.25`, `7` or `.5` exactly,
    /// rounding toward zero into `semantics`.
    pub fn parse_decimal(
        text: &str,
        semantics: FixedPointSemantics,
    ) -> Result<(Self, bool), ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        let (negative, body) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let mut digits = BigInt::zero();
        let mut digit_count = 0usize;
        let mut frac_digits = 0u32;
        let mut seen_point = false;
        for (offset, ch) in body.char_indices() {
            match ch {
                '0'..='9' => {
                    digits = digits * 10u32 + (ch as u32 - '0' as u32);
                    digit_count += 1;
                    if seen_point {
                        frac_digits += 1;
                    }
                }
                '.' if !seen_point => seen_point = true,
                '_' => {}
                _ => {
                    return Err(ParseError::InvalidChar {
                        text: text.to_string(),
                        ch,
                        offset: offset + (trimmed.len() - body.len()),
                    })
                }
            }
        }
        if digit_count == 0 {
            return Err(ParseError::NoDigits(text.to_string()));
        }

        // |value| = digits / 10^frac_digits; raw = |value| * 2^scale
        let scale = i32::from(semantics.scale());
        let mut numerator = digits;
        let mut denominator = BigInt::from(10u32).pow(frac_digits);
        if scale >= 0 {
            numerator <<= scale as usize;
        } else {
            denominator *= pow2(scale.unsigned_abs());
        }
        let magnitude = numerator / denominator;
        let exact = if negative { -magnitude } else { magnitude };
        Ok(Self::narrowed(exact, semantics))
    }
}

pub(crate) fn is_exact_at(raw: &BigInt, from_scale: i32, to_scale: i32) -> bool {
    if to_scale >= from_scale {
        return true;
    }
    let dropped = pow2((from_scale - to_scale) as u32);
    (raw.abs() % dropped).is_zero()
}

//! Conversion between fixed-point values and IEEE-754 binary formats.

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::semantics::FixedPointSemantics;
use crate::value::FixedPoint;

/// An IEEE-754 binary interchange format no wider than binary64.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FloatFormat {
    /// Significand bits, including the implicit leading bit.
    precision: u32,
    exponent_bits: u32,
}

impl FloatFormat {
    pub const HALF: Self = Self {
        precision: 11,
        exponent_bits: 5,
    };
    pub const SINGLE: Self = Self {
        precision: 24,
        exponent_bits: 8,
    };
    pub const DOUBLE: Self = Self {
        precision: 53,
        exponent_bits: 11,
    };

    /// `None` unless every value of the format is exactly an `f64`.
    pub fn new(precision: u32, exponent_bits: u32) -> Option<Self> {
        if !(2..=53).contains(&precision) || !(2..=11).contains(&exponent_bits) {
            return None;
        }
        Some(Self {
            precision,
            exponent_bits,
        })
    }

    pub const fn precision(&self) -> u32 {
        self.precision
    }

    pub const fn total_bits(&self) -> u32 {
        self.precision + self.exponent_bits
    }

    /// Largest unbiased exponent of a finite value; also the bias.
    pub const fn max_exponent(&self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// Unbiased exponent of the smallest normal value.
    pub const fn min_exponent(&self) -> i32 {
        1 - self.max_exponent()
    }

    fn exponent_mask(&self) -> u64 {
        (1u64 << self.exponent_bits) - 1
    }

    fn fraction_mask(&self) -> u64 {
        (1u64 << (self.precision - 1)) - 1
    }

    fn sign_bit(&self) -> u64 {
        1u64 << (self.total_bits() - 1)
    }
}

/// A float in some [`FloatFormat`], held as its bit pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FloatValue {
    bits: u64,
    format: FloatFormat,
}

impl FloatValue {
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    pub const fn format(&self) -> FloatFormat {
        self.format
    }

    fn exponent_field(&self) -> u64 {
        (self.bits >> (self.format.precision - 1)) & self.format.exponent_mask()
    }

    pub fn is_sign_negative(&self) -> bool {
        self.bits & self.format.sign_bit() != 0
    }

    pub fn is_infinite(&self) -> bool {
        self.exponent_field() == self.format.exponent_mask()
            && self.bits & self.format.fraction_mask() == 0
    }

    pub fn is_zero(&self) -> bool {
        self.bits & !self.format.sign_bit() == 0
    }

    /// Exact: every supported format fits inside binary64.
    pub fn to_f64(&self) -> f64 {
        if self.format == FloatFormat::DOUBLE {
            return f64::from_bits(self.bits);
        }
        let sign = if self.is_sign_negative() { -1.0 } else { 1.0 };
        let exponent_field = self.exponent_field();
        let fraction = self.bits & self.format.fraction_mask();
        let p = self.format.precision as i32;

        if exponent_field == self.format.exponent_mask() {
            return if fraction == 0 {
                sign * f64::INFINITY
            } else {
                f64::NAN
            };
        }
        let (significand, exponent) = if exponent_field == 0 {
            (fraction, self.format.min_exponent() - (p - 1))
        } else {
            (
                fraction | (1u64 << (p - 1)),
                exponent_field as i32 - self.format.max_exponent() - (p - 1),
            )
        };
        sign * mul_pow2(significand as f64, exponent)
    }

    pub fn to_f32(&self) -> f32 {
        if self.format == FloatFormat::SINGLE {
            return f32::from_bits(self.bits as u32);
        }
        self.to_f64() as f32
    }
}

/// `value * 2^exponent` without an intermediate `2^exponent` that
/// underflows; `value` is an integer below `2^53`.
fn mul_pow2(value: f64, exponent: i32) -> f64 {
    if exponent < -1000 {
        value * 2f64.powi(-1000) * 2f64.powi(exponent + 1000)
    } else {
        value * 2f64.powi(exponent)
    }
}

/// What the bits shifted out of a significand were worth, relative to half
/// of its last place.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Loss {
    ExactlyZero,
    LessThanHalf,
    ExactlyHalf,
    MoreThanHalf,
}

fn shift_right_with_loss(value: &BigUint, bits: usize) -> (BigUint, Loss) {
    let quotient = value.clone() >> bits;
    let remainder = value - (quotient.clone() << bits);
    let loss = if remainder.is_zero() {
        Loss::ExactlyZero
    } else {
        match remainder.cmp(&(BigUint::one() << (bits - 1))) {
            Ordering::Less => Loss::LessThanHalf,
            Ordering::Equal => Loss::ExactlyHalf,
            Ordering::Greater => Loss::MoreThanHalf,
        }
    };
    (quotient, loss)
}

/// Round-to-nearest, ties-to-even.
fn round_half_even(value: &BigUint, bits: i64) -> BigUint {
    if bits <= 0 {
        return value.clone() << (-bits) as usize;
    }
    let (quotient, loss) = shift_right_with_loss(value, bits as usize);
    let up = match loss {
        Loss::MoreThanHalf => true,
        Loss::ExactlyHalf => quotient.is_odd(),
        Loss::ExactlyZero | Loss::LessThanHalf => false,
    };
    if up {
        quotient + 1u32
    } else {
        quotient
    }
}

impl FixedPoint {
    /// Nearest value of `format`, ties to even. Magnitudes beyond the
    /// format's range come out as infinities, tiny ones as (signed) zero or
    /// subnormals; there is no separate flag.
    pub fn to_float(&self, format: FloatFormat) -> FloatValue {
        let raw = self.raw_value();
        let sign = if raw.sign() == num_bigint::Sign::Minus {
            format.sign_bit()
        } else {
            0
        };
        let magnitude = raw.magnitude();
        if magnitude.is_zero() {
            return FloatValue { bits: 0, format };
        }

        let p = i64::from(format.precision);
        let scale = i64::from(self.semantics().scale());
        // Unbiased exponent of the leading one bit of |raw| * 2^-scale.
        let top = magnitude.bits() as i64 - 1 - scale;
        let mut lsb = top.max(i64::from(format.min_exponent())) - (p - 1);

        let mut significand = round_half_even(magnitude, lsb + scale);
        if significand.bits() as i64 > p {
            significand >>= 1usize;
            lsb += 1;
        }
        let significand = significand.to_u64().unwrap_or(0);

        let hidden = 1u64 << (p - 1);
        let biased = if significand >= hidden {
            let exponent = lsb + p - 1;
            if exponent > i64::from(format.max_exponent()) {
                let infinity = format.exponent_mask() << (p - 1);
                return FloatValue {
                    bits: sign | infinity,
                    format,
                };
            }
            (exponent + i64::from(format.max_exponent())) as u64
        } else {
            0
        };

        FloatValue {
            bits: sign | (biased << (p - 1)) | (significand & format.fraction_mask()),
            format,
        }
    }

    /// Exact value of `value`, rounded toward zero into `semantics`. NaN
    /// gives zero and infinities give the extreme of their sign; both set
    /// the flag.
    pub fn from_float(value: f64, semantics: FixedPointSemantics) -> (Self, bool) {
        if value.is_nan() {
            return (Self::zero(semantics), true);
        }
        if value.is_infinite() {
            let extreme = if value < 0.0 {
                Self::min_value(semantics)
            } else {
                Self::max_value(semantics)
            };
            return (extreme, true);
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent_field = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        let (significand, exponent) = if exponent_field == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), exponent_field - 1075)
        };

        // |value| * 2^scale = significand * 2^(exponent + scale)
        let shift = exponent + i32::from(semantics.scale());
        let significand = BigInt::from(significand);
        let magnitude = if shift >= 0 {
            significand << shift as usize
        } else {
            significand >> shift.unsigned_abs() as usize
        };
        let exact = if negative { -magnitude } else { magnitude };
        Self::narrowed(exact, semantics)
    }
}

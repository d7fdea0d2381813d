use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::bits::{shift_scale, wrap};
use crate::semantics::FixedPointSemantics;

/// A fixed-point number: `raw / 2^scale` under its semantics.
///
/// `raw` is kept as the integer the bit pattern denotes (sign applied), and
/// always lies in `semantics.min_raw()..=semantics.max_raw()`. Equality is
/// structural: same raw value and same semantics. Use
/// [`FixedPoint::compare`] for numeric comparison across semantics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    raw: BigInt,
    semantics: FixedPointSemantics,
}

impl FixedPoint {
    pub fn zero(semantics: FixedPointSemantics) -> Self {
        Self {
            raw: BigInt::zero(),
            semantics,
        }
    }

    /// Sentinel for storage slots filled before a real type is known.
    pub fn placeholder() -> Self {
        Self::zero(FixedPointSemantics::placeholder())
    }

    /// Reads `raw` as a bit pattern of `semantics`, wrapping values outside
    /// the range. The flag reports whether wrapping happened.
    pub fn from_raw(raw: BigInt, semantics: FixedPointSemantics) -> (Self, bool) {
        if semantics.fits(&raw) {
            return (Self { raw, semantics }, false);
        }
        let raw = wrap(&raw, semantics.value_bits(), semantics.is_signed());
        (Self { raw, semantics }, true)
    }

    /// Stores an exact result in `semantics`: clamped when the type
    /// saturates, wrapped otherwise. The flag reports that the exact value
    /// did not fit.
    pub(crate) fn narrowed(exact: BigInt, semantics: FixedPointSemantics) -> (Self, bool) {
        if semantics.fits(&exact) {
            return (
                Self {
                    raw: exact,
                    semantics,
                },
                false,
            );
        }
        let raw = if !semantics.is_saturated() {
            wrap(&exact, semantics.value_bits(), semantics.is_signed())
        } else if exact.is_negative() {
            semantics.min_raw()
        } else {
            semantics.max_raw()
        };
        (Self { raw, semantics }, true)
    }

    pub fn min_value(semantics: FixedPointSemantics) -> Self {
        Self {
            raw: semantics.min_raw(),
            semantics,
        }
    }

    pub fn max_value(semantics: FixedPointSemantics) -> Self {
        Self {
            raw: semantics.max_raw(),
            semantics,
        }
    }

    /// Smallest positive step, `2^-scale`. Zero for a zero-width type.
    pub fn epsilon(semantics: FixedPointSemantics) -> Self {
        Self::from_raw(BigInt::one(), semantics).0
    }

    #[inline]
    pub fn raw_value(&self) -> &BigInt {
        &self.raw
    }

    #[inline]
    pub fn semantics(&self) -> FixedPointSemantics {
        self.semantics
    }

    #[inline]
    pub fn bit_width(&self) -> u32 {
        u32::from(self.semantics.width())
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.semantics.is_signed()
    }

    pub fn is_placeholder(&self) -> bool {
        self.semantics.width() == 0
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.raw.is_negative()
    }

    /// True for zero as well: this is "not negative".
    pub fn is_positive(&self) -> bool {
        !self.raw.is_negative()
    }

    pub fn is_min(&self) -> bool {
        self.raw == self.semantics.min_raw()
    }

    /// Truth value independent of scale.
    pub fn as_bool(&self) -> bool {
        !self.raw.is_zero()
    }

    /// Integer part, rounded toward zero.
    pub fn int_part(&self) -> BigInt {
        let scale = i32::from(self.semantics.scale());
        if scale <= 0 {
            return shift_scale(&self.raw, -scale);
        }
        let magnitude = self.raw.abs() >> scale as usize;
        if self.raw.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Raw value expressed at another scale. Exact when `scale` is not below
    /// the current one, floored otherwise.
    pub(crate) fn raw_at_scale(&self, scale: i32) -> BigInt {
        shift_scale(&self.raw, scale - i32::from(self.semantics.scale()))
    }

    /// Keeps the low `new_width` bits of the pattern. Never widens; a scale
    /// change goes through [`FixedPoint::to_semantics`] instead.
    pub fn truncate(&self, new_width: u16) -> Self {
        if new_width >= self.semantics.width() {
            return self.clone();
        }
        let semantics = self.semantics.with_width(new_width);
        let raw = wrap(&self.raw, semantics.value_bits(), semantics.is_signed());
        Self { raw, semantics }
    }
}

//! Overflow-reporting arithmetic.
//!
//! Every operation computes the exact result with unbounded integers and
//! narrows it once into the destination semantics. The returned flag is set
//! when the exact result was not representable; the value is then clamped
//! (saturating destinations) or wrapped (all others). Binary operations
//! promote both operands to their common semantics, stored in `dest_width`
//! bits.

use num_bigint::BigInt;

use crate::bits::{pow2, shift_scale};
use crate::semantics::FixedPointSemantics;
use crate::value::FixedPoint;

impl FixedPoint {
    fn binary_dest(&self, rhs: &Self, dest_width: u16) -> FixedPointSemantics {
        self.semantics()
            .common(&rhs.semantics())
            .with_width(dest_width)
    }

    /// Overflows on the signed minimum and on any non-zero unsigned value.
    pub fn overflowing_neg(&self) -> (Self, bool) {
        Self::narrowed(-self.raw_value(), self.semantics())
    }

    pub fn overflowing_add(&self, rhs: &Self, dest_width: u16) -> (Self, bool) {
        let dest = self.binary_dest(rhs, dest_width);
        let scale = i32::from(dest.scale());
        let exact = self.raw_at_scale(scale) + rhs.raw_at_scale(scale);
        Self::narrowed(exact, dest)
    }

    /// `self + (-rhs)` with the negation done exactly, so only the final
    /// narrowing can overflow.
    pub fn overflowing_sub(&self, rhs: &Self, dest_width: u16) -> (Self, bool) {
        let dest = self.binary_dest(rhs, dest_width);
        let scale = i32::from(dest.scale());
        let negated = -rhs.raw_at_scale(scale);
        let exact = self.raw_at_scale(scale) + negated;
        Self::narrowed(exact, dest)
    }

    /// Full product rescaled to the destination scale, rounding toward
    /// negative infinity.
    pub fn overflowing_mul(&self, rhs: &Self, dest_width: u16) -> (Self, bool) {
        let dest = self.binary_dest(rhs, dest_width);
        let product = self.raw_value() * rhs.raw_value();
        let product_scale =
            i32::from(self.semantics().scale()) + i32::from(rhs.semantics().scale());
        let exact = shift_scale(&product, i32::from(dest.scale()) - product_scale);
        Self::narrowed(exact, dest)
    }

    /// Quotient rounded toward zero. Division by zero yields zero in the
    /// destination semantics with the flag set.
    pub fn overflowing_div(&self, rhs: &Self, dest_width: u16) -> (Self, bool) {
        let dest = self.binary_dest(rhs, dest_width);
        if rhs.is_zero() {
            return (Self::zero(dest), true);
        }

        // raw = a * 2^(sb - sa + s) / b
        let shift = i32::from(rhs.semantics().scale()) - i32::from(self.semantics().scale())
            + i32::from(dest.scale());
        let (numerator, denominator) = if shift >= 0 {
            (
                shift_scale(self.raw_value(), shift),
                rhs.raw_value().clone(),
            )
        } else {
            (
                self.raw_value().clone(),
                shift_scale(rhs.raw_value(), -shift),
            )
        };
        Self::narrowed(numerator / denominator, dest)
    }

    /// Adds 1.0 in the value's own semantics.
    pub fn overflowing_inc(&self) -> (Self, bool) {
        self.offset_by_one(false)
    }

    /// Subtracts 1.0 in the value's own semantics.
    pub fn overflowing_dec(&self) -> (Self, bool) {
        self.offset_by_one(true)
    }

    fn offset_by_one(&self, down: bool) -> (Self, bool) {
        let semantics = self.semantics();
        let scale = i32::from(semantics.scale());
        // A negative scale cannot hold 1.0 as a raw integer; work at scale 0.
        let work_scale = scale.max(0);
        let one = pow2(work_scale as u32);
        let current = self.raw_at_scale(work_scale);
        let exact = if down { current - one } else { current + one };
        Self::narrowed(shift_scale(&exact, scale - work_scale), semantics)
    }

    /// Multiplies by `2^bits` within the same semantics.
    pub fn overflowing_shl(&self, bits: u32) -> (Self, bool) {
        let exact: BigInt = self.raw_value().clone() << bits as usize;
        Self::narrowed(exact, self.semantics())
    }
}

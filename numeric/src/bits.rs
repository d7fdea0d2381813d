use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

#[inline]
pub(crate) fn pow2(bits: u32) -> BigInt {
    BigInt::one() << bits as usize
}

/// Multiplies `value` by `2^delta`. A negative `delta` divides and rounds
/// toward negative infinity, like an arithmetic right shift.
pub(crate) fn shift_scale(value: &BigInt, delta: i32) -> BigInt {
    if delta >= 0 {
        value.clone() << delta as usize
    } else {
        value.div_floor(&pow2(delta.unsigned_abs()))
    }
}

/// Two's-complement wrap of `value` into `bits` bits.
pub(crate) fn wrap(value: &BigInt, bits: u32, signed: bool) -> BigInt {
    let modulus = pow2(bits);
    let low = value.mod_floor(&modulus);
    if signed && bits > 0 && low >= pow2(bits - 1) {
        low - modulus
    } else {
        low
    }
}

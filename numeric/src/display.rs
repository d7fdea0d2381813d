use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::bits::{pow2, shift_scale};
use crate::value::FixedPoint;

/// Exact decimal expansion. A positive scale always prints at least one
/// fractional digit (`3.0`); `2^-scale` steps always terminate in base ten.
impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = i32::from(self.semantics().scale());
        if scale <= 0 {
            return write!(f, "{}", shift_scale(self.raw_value(), -scale));
        }

        let scale = scale as u32;
        let magnitude = self.raw_value().abs();
        let int_part = magnitude.clone() >> scale as usize;
        let mut frac = magnitude - (int_part.clone() << scale as usize);

        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{int_part}.")?;

        let unit = pow2(scale);
        loop {
            frac *= 10u32;
            let digit: BigInt = frac.clone() >> scale as usize;
            write!(f, "{digit}")?;
            frac -= &digit * &unit;
            if frac.is_zero() {
                break;
            }
        }
        Ok(())
    }
}

impl FixedPoint {
    /// Value followed by its semantics, e.g. `7.9375 (s8.4:sat)`.
    pub fn to_diagnostic_string(&self) -> String {
        format!("{self} ({})", self.semantics())
    }
}

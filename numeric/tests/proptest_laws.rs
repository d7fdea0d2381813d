use fixvm_numeric::{
    decode, encode, ByteOrder, ComparisonResult, FixedPoint, FixedPointSemantics, FloatFormat,
};
use num_bigint::BigInt;
use proptest::prelude::*;

fn semantics_up_to(max_width: u16) -> impl Strategy<Value = FixedPointSemantics> {
    (
        1u16..=max_width,
        -8i16..=40,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(width, scale, signed, saturated, padding)| {
            FixedPointSemantics::new(width, scale, signed, saturated, padding && !signed).unwrap()
        })
}

fn value_up_to(max_width: u16) -> impl Strategy<Value = FixedPoint> {
    (semantics_up_to(max_width), any::<i64>())
        .prop_map(|(semantics, raw)| FixedPoint::from_raw(BigInt::from(raw), semantics).0)
}

fn value() -> impl Strategy<Value = FixedPoint> {
    value_up_to(96)
}

// Addition does not depend on operand order
proptest! {
    #[test]
    fn prop_add_commutative(a in value(), b in value()) {
        let width = a.semantics().common(&b.semantics()).width();
        prop_assert_eq!(a.overflowing_add(&b, width), b.overflowing_add(&a, width));
    }
}

// Negating twice is the identity whenever the first negation fits
proptest! {
    #[test]
    fn prop_double_negation(a in value()) {
        let (once, overflow) = a.overflowing_neg();
        if overflow {
            return Ok(());
        }
        let (twice, overflow) = once.overflowing_neg();
        prop_assert!(!overflow);
        prop_assert_eq!(twice, a);
    }
}

// compare is reflexive and mirrored
proptest! {
    #[test]
    fn prop_compare_laws(a in value(), b in value()) {
        prop_assert_eq!(a.compare(&a), ComparisonResult::Equal);
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }
}

// Both operands are exact in their common type
proptest! {
    #[test]
    fn prop_common_holds_both(a in value(), b in value()) {
        let common = a.semantics().common(&b.semantics());
        let (promoted, inexact) = a.to_semantics(common);
        prop_assert!(!inexact, "{} does not hold {}", common, a);
        prop_assert!(promoted.numerically_eq(&a));
        prop_assert!(!b.to_semantics(common).1);
    }
}

// A conversion that reports nothing can be undone
proptest! {
    #[test]
    fn prop_lossless_conversion_reverses(a in value(), target in semantics_up_to(96)) {
        let (there, inexact) = a.to_semantics(target);
        if inexact {
            return Ok(());
        }
        let (back, inexact) = there.to_semantics(a.semantics());
        prop_assert!(!inexact);
        prop_assert_eq!(back, a);
    }
}

proptest! {
    #[test]
    fn prop_codec_round_trip(a in value(), big in any::<bool>()) {
        let order = if big { ByteOrder::Big } else { ByteOrder::Little };
        let bytes = encode(&a, order);
        let decoded = decode(&bytes, order);
        prop_assert_eq!(decoded, Ok(a));
    }
}

// Values of at most 50 bits are exact doubles
proptest! {
    #[test]
    fn prop_double_round_trip(a in value_up_to(50)) {
        let double = a.to_float(FloatFormat::DOUBLE).to_f64();
        let (back, overflow) = FixedPoint::from_float(double, a.semantics());
        prop_assert!(!overflow);
        prop_assert_eq!(back, a);
    }
}

use clap::ValueEnum;
use fixvm_numeric::{FixedPoint, FloatFormat};
use num_bigint::BigInt;
use serde_json::Value as JsonValue;

use super::literal::{parse_semantics, parse_value};
use super::output::Report;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatFormatArg {
    Half,
    Single,
    Double,
}

impl FloatFormatArg {
    fn to_format(self) -> FloatFormat {
        match self {
            FloatFormatArg::Half => FloatFormat::HALF,
            FloatFormatArg::Single => FloatFormat::SINGLE,
            FloatFormatArg::Double => FloatFormat::DOUBLE,
        }
    }
}

/// `to_semantics`, or the range-only `rescale` cast.
pub fn run_convert(value: &str, semantics: &str, range_only: bool) -> Result<Report, String> {
    let value = parse_value(value)?;
    let target = parse_semantics(semantics)?;
    let (converted, overflow) = if range_only {
        value.rescale(target)
    } else {
        value.to_semantics(target)
    };
    Ok(Report::new().value(&converted).field("overflow", overflow))
}

pub fn run_to_int(value: &str, bits: u16) -> Result<Report, String> {
    let value = parse_value(value)?;
    let (integer, overflow) = value.to_integer(bits);
    Ok(Report::new()
        .field("integer", integer.to_string())
        .field("overflow", overflow))
}

pub fn run_from_int(integer: &str, semantics: &str) -> Result<Report, String> {
    let integer: BigInt = integer
        .trim()
        .parse()
        .map_err(|e| format!("E_FIXVM_INTEGER `{}` {}", integer, e))?;
    let semantics = parse_semantics(semantics)?;
    let (value, overflow) = FixedPoint::from_integer(&integer, semantics);
    Ok(Report::new().value(&value).field("overflow", overflow))
}

pub fn run_float(value: &str, format: FloatFormatArg) -> Result<Report, String> {
    let value = parse_value(value)?;
    let float = value.to_float(format.to_format());
    let digits = float.format().total_bits().div_ceil(4) as usize;
    Ok(Report::new()
        .field("bits", format!("0x{:0digits$x}", float.bits()))
        .field("float", float_json(float.to_f64()))
        .field("infinite", float.is_infinite()))
}

pub fn run_from_float(number: f64, semantics: &str) -> Result<Report, String> {
    let semantics = parse_semantics(semantics)?;
    let (value, overflow) = FixedPoint::from_float(number, semantics);
    Ok(Report::new().value(&value).field("overflow", overflow))
}

pub fn run_compare(a: &str, b: &str) -> Result<Report, String> {
    let a = parse_value(a)?;
    let b = parse_value(b)?;
    let result = serde_json::to_value(a.compare(&b)).unwrap_or(JsonValue::Null);
    Ok(Report::new().field("result", result))
}

// Infinities have no JSON number form.
fn float_json(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(report: &Report, key: &str) -> String {
        report.text(key).unwrap()
    }

    #[test]
    fn convert_reports_dropped_fraction_unless_range_only() {
        let report = run_convert("3.5@s8.4", "s8.0", false).unwrap();
        assert_eq!(text(&report, "value"), "3");
        assert_eq!(text(&report, "overflow"), "true");

        let report = run_convert("3.5@s8.4", "s8.0", true).unwrap();
        assert_eq!(text(&report, "overflow"), "false");

        let report = run_convert("3.5@s8.4", "s16.8", false).unwrap();
        assert_eq!(text(&report, "raw"), "896");
    }

    #[test]
    fn integer_round_trip() {
        let report = run_to_int("-3.75@s16.8", 8).unwrap();
        assert_eq!(text(&report, "integer"), "-3");
        assert_eq!(text(&report, "overflow"), "false");

        let report = run_from_int("7", "s8.4").unwrap();
        assert_eq!(text(&report, "value"), "7.0");

        let err = run_from_int("seven", "s8.4").unwrap_err();
        assert!(err.starts_with("E_FIXVM_INTEGER "), "{err}");
    }

    #[test]
    fn float_bits_are_padded_to_the_format() {
        let report = run_float("7.9375@s8.4", FloatFormatArg::Single).unwrap();
        assert_eq!(text(&report, "bits"), format!("0x{:08x}", 7.9375f32.to_bits()));
        assert_eq!(text(&report, "float"), "7.9375");
        assert_eq!(text(&report, "infinite"), "false");

        let report = run_float("-1@s8.0", FloatFormatArg::Half).unwrap();
        assert_eq!(text(&report, "bits"), "0xbc00");
    }

    #[test]
    fn from_float_flags_nan() {
        let report = run_from_float(f64::NAN, "s8.4").unwrap();
        assert_eq!(text(&report, "value"), "0.0");
        assert_eq!(text(&report, "overflow"), "true");
    }

    #[test]
    fn compare_names_the_result() {
        let report = run_compare("3.5@s8.4", "3.25@u16.8").unwrap();
        assert_eq!(text(&report, "result"), "greater");
        let report = run_compare("12@u8.-2", "12@s16.4").unwrap();
        assert_eq!(text(&report, "result"), "equal");
    }
}

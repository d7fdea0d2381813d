use fixvm_numeric::{FixedPoint, FixedPointSemantics};

pub fn parse_semantics(text: &str) -> Result<FixedPointSemantics, String> {
    text.parse()
        .map_err(|e| format!("E_FIXVM_SEMANTICS {}", e))
}

/// Reads `<decimal>@<semantics>`, e.g. `-3.25@s16.8:sat`. A literal that
/// does not fit its semantics is rejected rather than wrapped.
pub fn parse_value(text: &str) -> Result<FixedPoint, String> {
    let (number, semantics) = text
        .split_once('@')
        .ok_or_else(|| format!("E_FIXVM_LITERAL `{}` (expected <decimal>@<semantics>)", text))?;
    let semantics = parse_semantics(semantics)?;
    let (value, overflow) = FixedPoint::parse_decimal(number, semantics)
        .map_err(|e| format!("E_FIXVM_LITERAL {}", e))?;
    if overflow {
        return Err(format!(
            "E_FIXVM_LITERAL_RANGE {} does not fit {}",
            number, semantics
        ));
    }
    Ok(value)
}

use fixvm_numeric::{byte_order, cache_key, deserialize_bytes, serialize_bytes, ByteOrder};

use super::literal::parse_value;
use super::output::Report;

fn order_name(order: ByteOrder) -> &'static str {
    match order {
        ByteOrder::Little => "le",
        ByteOrder::Big => "be",
    }
}

/// Bytes in the process-wide order, plus the order-independent cache key.
pub fn run_encode(value: &str) -> Result<Report, String> {
    let value = parse_value(value)?;
    let bytes = serialize_bytes(&value);
    tracing::trace!(len = bytes.len(), "encoded value");
    Ok(Report::new()
        .field("bytes", hex::encode(&bytes))
        .field("byte_order", order_name(byte_order()))
        .field("cache_key", cache_key(&value)))
}

pub fn run_decode(text: &str) -> Result<Report, String> {
    let bytes = hex::decode(text.trim()).map_err(|e| format!("E_FIXVM_HEX {}", e))?;
    let value = deserialize_bytes(&bytes).map_err(|e| format!("E_FIXVM_DECODE {}", e))?;
    Ok(Report::new().value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode() {
        let report = run_encode("3.5@s8.4").unwrap();
        let bytes = report.text("bytes").unwrap();
        assert_eq!(bytes, "0800040001000038");
        assert_eq!(report.text("byte_order").as_deref(), Some("le"));
        assert_eq!(report.text("cache_key").map(|key| key.len()), Some(64));

        let decoded = run_decode(&bytes).unwrap();
        assert_eq!(decoded.text("value").as_deref(), Some("3.5"));
        assert_eq!(decoded.text("semantics").as_deref(), Some("s8.4"));
    }

    #[test]
    fn bad_input_is_coded() {
        let err = run_decode("zz").unwrap_err();
        assert!(err.starts_with("E_FIXVM_HEX "), "{err}");

        let err = run_decode("08000400010000").unwrap_err();
        assert!(err.starts_with("E_FIXVM_DECODE "), "{err}");
    }
}

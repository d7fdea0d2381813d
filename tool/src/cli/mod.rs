pub mod codec;
pub mod convert;
pub mod eval;
pub mod literal;
pub mod output;

use fixvm_numeric::{byte_order_from_env, set_byte_order, ByteOrder};
use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (warnings only by default).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--byte-order` wins over `FIXVM_BYTE_ORDER`; neither leaves little endian.
pub fn configure_byte_order(flag: Option<&str>) -> Result<(), String> {
    let order = match flag {
        Some(text) => Some(parse_byte_order(text)?),
        None => byte_order_from_env().map_err(|e| format!("E_FIXVM_BYTE_ORDER {}", e))?,
    };
    if let Some(order) = order {
        set_byte_order(order).map_err(|e| format!("E_FIXVM_BYTE_ORDER {}", e))?;
        tracing::debug!(?order, "byte order configured");
    }
    Ok(())
}

fn parse_byte_order(text: &str) -> Result<ByteOrder, String> {
    text.parse()
        .map_err(|e| format!("E_FIXVM_BYTE_ORDER {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_flag_is_validated() {
        assert_eq!(parse_byte_order("be"), Ok(ByteOrder::Big));
        assert_eq!(parse_byte_order("LITTLE"), Ok(ByteOrder::Little));
        let err = parse_byte_order("middle").unwrap_err();
        assert!(err.starts_with("E_FIXVM_BYTE_ORDER "), "{err}");
    }
}

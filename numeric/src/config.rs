use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable the tool reads the byte order from.
pub const BYTE_ORDER_ENV: &str = "FIXVM_BYTE_ORDER";

static BYTE_ORDER: OnceLock<ByteOrder> = OnceLock::new();

/// Byte order of serialized values. One order holds for the whole process,
/// matching the other primitives the host persists.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown byte order `{0}` (expected le, be, little or big)")]
    UnknownByteOrder(String),
    #[error("byte order is already set to {current:?}")]
    AlreadySet { current: ByteOrder },
}

impl FromStr for ByteOrder {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "le" | "little" => Ok(ByteOrder::Little),
            "be" | "big" => Ok(ByteOrder::Big),
            _ => Err(ConfigError::UnknownByteOrder(text.to_string())),
        }
    }
}

/// Fixes the process-wide byte order. Setting the same order again is a
/// no-op; a different order is rejected once one is set.
pub fn set_byte_order(order: ByteOrder) -> Result<(), ConfigError> {
    let current = *BYTE_ORDER.get_or_init(|| order);
    if current != order {
        return Err(ConfigError::AlreadySet { current });
    }
    tracing::trace!(?order, "byte order fixed");
    Ok(())
}

/// The process-wide byte order; little endian until set.
pub fn byte_order() -> ByteOrder {
    BYTE_ORDER.get().copied().unwrap_or_default()
}

/// Reads [`BYTE_ORDER_ENV`]; `Ok(None)` when it is unset.
pub fn byte_order_from_env() -> Result<Option<ByteOrder>, ConfigError> {
    match std::env::var(BYTE_ORDER_ENV) {
        Ok(text) => text.parse().map(Some),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_byte_order_names() {
        assert_eq!("le".parse::<ByteOrder>(), Ok(ByteOrder::Little));
        assert_eq!("BIG".parse::<ByteOrder>(), Ok(ByteOrder::Big));
        assert_eq!(
            "middle".parse::<ByteOrder>(),
            Err(ConfigError::UnknownByteOrder("middle".to_string()))
        );
    }

    #[test]
    fn byte_order_is_set_once() {
        // Other unit tests rely on the little-endian default.
        assert_eq!(set_byte_order(ByteOrder::Little), Ok(()));
        assert_eq!(set_byte_order(ByteOrder::Little), Ok(()));
        assert_eq!(
            set_byte_order(ByteOrder::Big),
            Err(ConfigError::AlreadySet {
                current: ByteOrder::Little
            })
        );
        assert_eq!(byte_order(), ByteOrder::Little);
    }
}

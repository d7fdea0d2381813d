mod bits;

pub mod arith;
pub mod codec;
pub mod compare;
pub mod config;
pub mod convert;
pub mod display;
pub mod eval;
pub mod float;
pub mod semantics;
pub mod signals;
pub mod value;

pub use codec::{
    cache_key, decode, deserialize_bytes, encode, serialize_bytes, DecodeError, HEADER_LEN,
};
pub use compare::ComparisonResult;
pub use config::{
    byte_order, byte_order_from_env, set_byte_order, ByteOrder, ConfigError, BYTE_ORDER_ENV,
};
pub use convert::ParseError;
pub use eval::{eval_op, eval_step, EvalError, FixedOp, StepOutcome};
pub use float::{FloatFormat, FloatValue};
pub use semantics::{FixedPointSemantics, SemanticsError};
pub use signals::{
    ArithmeticFaultKind, FaultContext, Signal, SignalSink, SourceSpan, VecSignalSink,
};
pub use value::FixedPoint;

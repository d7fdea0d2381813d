//! Primitive steps as the evaluator runs them: pick the operation, get the
//! value and its overflow flag, and hand faults to a [`SignalSink`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::signals::{ArithmeticFaultKind, FaultContext, Signal, SignalSink};
use crate::value::FixedPoint;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedOp {
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Inc,
    Dec,
}

impl FixedOp {
    pub const ALL: [FixedOp; 7] = [
        FixedOp::Neg,
        FixedOp::Add,
        FixedOp::Sub,
        FixedOp::Mul,
        FixedOp::Div,
        FixedOp::Inc,
        FixedOp::Dec,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FixedOp::Neg => "neg",
            FixedOp::Add => "add",
            FixedOp::Sub => "sub",
            FixedOp::Mul => "mul",
            FixedOp::Div => "div",
            FixedOp::Inc => "inc",
            FixedOp::Dec => "dec",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            FixedOp::Neg | FixedOp::Inc | FixedOp::Dec => 1,
            FixedOp::Add | FixedOp::Sub | FixedOp::Mul | FixedOp::Div => 2,
        }
    }
}

impl fmt::Display for FixedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FixedOp {
    type Err = EvalError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        FixedOp::ALL
            .into_iter()
            .find(|op| op.name() == text)
            .ok_or_else(|| EvalError::UnknownOp(text.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown fixed-point operation `{0}`")]
    UnknownOp(String),
    #[error("`{op}` keeps its operand's width; no destination width allowed")]
    UnaryWidth { op: FixedOp },
    #[error("`{op}` takes {expected} operand(s), got {actual}")]
    Arity {
        op: FixedOp,
        expected: usize,
        actual: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub value: FixedPoint,
    pub overflow: bool,
}

/// Runs one step. Unary steps keep the operand's semantics and reject a
/// `dest_width`; binary steps default it to the common width.
pub fn eval_op(
    op: FixedOp,
    operands: &[FixedPoint],
    dest_width: Option<u16>,
) -> Result<StepOutcome, EvalError> {
    if operands.len() != op.arity() {
        return Err(EvalError::Arity {
            op,
            expected: op.arity(),
            actual: operands.len(),
        });
    }

    if op.arity() == 1 && dest_width.is_some() {
        return Err(EvalError::UnaryWidth { op });
    }

    let (value, overflow) = match (op, operands) {
        (FixedOp::Neg, [a]) => a.overflowing_neg(),
        (FixedOp::Inc, [a]) => a.overflowing_inc(),
        (FixedOp::Dec, [a]) => a.overflowing_dec(),
        (_, [a, b]) => {
            let width =
                dest_width.unwrap_or_else(|| a.semantics().common(&b.semantics()).width());
            match op {
                FixedOp::Add => a.overflowing_add(b, width),
                FixedOp::Sub => a.overflowing_sub(b, width),
                FixedOp::Mul => a.overflowing_mul(b, width),
                _ => a.overflowing_div(b, width),
            }
        }
        _ => {
            return Err(EvalError::Arity {
                op,
                expected: op.arity(),
                actual: operands.len(),
            })
        }
    };
    Ok(StepOutcome { value, overflow })
}

/// Like [`eval_op`], emitting an arithmetic fault when the flag is set. The
/// defined (wrapped or saturated) value is returned either way so the
/// caller may keep evaluating.
pub fn eval_step(
    op: FixedOp,
    operands: &[FixedPoint],
    dest_width: Option<u16>,
    ctx: FaultContext,
    sink: &mut dyn SignalSink,
) -> Result<FixedPoint, EvalError> {
    let outcome = eval_op(op, operands, dest_width)?;
    if outcome.overflow {
        let kind = if op == FixedOp::Div && operands[1].is_zero() {
            ArithmeticFaultKind::DivByZero
        } else {
            ArithmeticFaultKind::Overflow {
                op,
                saturated: outcome.value.semantics().is_saturated(),
            }
        };
        tracing::debug!(
            %op,
            location = ctx.location,
            result = %outcome.value,
            "fixed-point step faulted"
        );
        sink.emit(Signal::ArithmeticFault { ctx, kind });
    }
    Ok(outcome.value)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;
    use crate::semantics::FixedPointSemantics;
    use crate::signals::VecSignalSink;

    fn fx(raw: i64, text: &str) -> FixedPoint {
        let semantics: FixedPointSemantics = text.parse().unwrap();
        FixedPoint::from_raw(BigInt::from(raw), semantics).0
    }

    #[test]
    fn op_names_round_trip() {
        for op in FixedOp::ALL {
            assert_eq!(op.name().parse::<FixedOp>(), Ok(op));
        }
        assert_eq!(
            "mod".parse::<FixedOp>(),
            Err(EvalError::UnknownOp("mod".to_string()))
        );
    }

    #[test]
    fn arity_is_checked() {
        let a = fx(1, "s8.4");
        assert_eq!(
            eval_op(FixedOp::Add, &[a.clone()], None),
            Err(EvalError::Arity {
                op: FixedOp::Add,
                expected: 2,
                actual: 1
            })
        );
        assert!(eval_op(FixedOp::Neg, &[a.clone(), a.clone()], None).is_err());
        assert_eq!(
            eval_op(FixedOp::Neg, &[a], Some(4)),
            Err(EvalError::UnaryWidth { op: FixedOp::Neg })
        );
    }

    #[test]
    fn default_width_is_the_common_width() {
        let out = eval_op(FixedOp::Add, &[fx(1, "s8.4"), fx(1, "u8.0")], None).unwrap();
        assert_eq!(out.value.semantics().width(), 13);
        assert!(!out.overflow);
    }

    #[test]
    fn faults_reach_the_sink() {
        let mut sink = VecSignalSink::default();

        let value = eval_step(
            FixedOp::Add,
            &[fx(56, "s8.4:sat"), fx(72, "s8.4")],
            Some(8),
            FaultContext::at("test:add"),
            &mut sink,
        )
        .unwrap();
        assert_eq!(value.raw_value(), &BigInt::from(127));

        let value = eval_step(
            FixedOp::Div,
            &[fx(9, "u4.0"), fx(0, "u4.0")],
            Some(4),
            FaultContext::at("test:div"),
            &mut sink,
        )
        .unwrap();
        assert!(value.is_zero());

        eval_step(
            FixedOp::Inc,
            &[fx(1, "s8.4")],
            None,
            FaultContext::at("test:inc"),
            &mut sink,
        )
        .unwrap();

        assert_eq!(sink.signals.len(), 2);
        assert_eq!(
            sink.signals[0],
            Signal::ArithmeticFault {
                ctx: FaultContext::at("test:add"),
                kind: ArithmeticFaultKind::Overflow {
                    op: FixedOp::Add,
                    saturated: true
                },
            }
        );
        assert_eq!(sink.signals[1].name(), "division-by-zero");
    }
}

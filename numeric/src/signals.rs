use crate::eval::FixedOp;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultContext {
    /// Where the evaluator was when the step ran.
    pub location: &'static str,
    pub source_span: Option<SourceSpan>,
    pub expr: Option<String>,
}

impl FaultContext {
    pub fn at(location: &'static str) -> Self {
        Self {
            location,
            source_span: None,
            expr: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpan {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArithmeticFaultKind {
    /// The exact result did not fit; `saturated` tells whether the stored
    /// value was clamped rather than wrapped.
    Overflow { op: FixedOp, saturated: bool },
    DivByZero,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    ArithmeticFault {
        ctx: FaultContext,
        kind: ArithmeticFaultKind,
    },
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::ArithmeticFault {
                kind: ArithmeticFaultKind::DivByZero,
                ..
            } => "division-by-zero",
            Signal::ArithmeticFault { .. } => "overflow",
        }
    }
}

pub trait SignalSink {
    fn emit(&mut self, signal: Signal);
}

#[derive(Default)]
pub struct VecSignalSink {
    pub signals: Vec<Signal>,
}

impl SignalSink for VecSignalSink {
    fn emit(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}

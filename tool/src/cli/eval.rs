use fixvm_numeric::{eval_step, FaultContext, FixedOp, VecSignalSink};

use super::literal::parse_value;
use super::output::Report;

pub fn run_eval(op: &str, operands: &[String], width: Option<u16>) -> Result<Report, String> {
    let op: FixedOp = op.parse().map_err(|e| format!("E_FIXVM_OP {}", e))?;
    let values = operands
        .iter()
        .map(|text| parse_value(text))
        .collect::<Result<Vec<_>, _>>()?;

    let ctx = FaultContext {
        expr: Some(format!("{} {}", op, operands.join(" "))),
        ..FaultContext::at("fixvm:eval")
    };
    let mut sink = VecSignalSink::default();
    let value = eval_step(op, &values, width, ctx, &mut sink)
        .map_err(|e| format!("E_FIXVM_EVAL {}", e))?;

    let mut report = Report::new()
        .field("op", op.name())
        .value(&value)
        .field("overflow", !sink.signals.is_empty());
    if let Some(signal) = sink.signals.first() {
        report = report.field("signal", signal.name());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn sum_that_fits() {
        let report = run_eval("add", &args(&["3.5@s8.4", "4@s8.4"]), Some(8)).unwrap();
        assert_eq!(report.text("value").as_deref(), Some("7.5"));
        assert_eq!(report.text("raw").as_deref(), Some("120"));
        assert_eq!(report.text("overflow").as_deref(), Some("false"));
        assert_eq!(report.get("signal"), None);
    }

    #[test]
    fn faults_are_reported_with_the_defined_value() {
        let report = run_eval("add", &args(&["3.5@s8.4", "4.5@s8.4"]), None).unwrap();
        assert_eq!(report.text("value").as_deref(), Some("-8.0"));
        assert_eq!(report.text("signal").as_deref(), Some("overflow"));

        let report = run_eval("div", &args(&["9@u4.0", "0@u4.0"]), None).unwrap();
        assert_eq!(report.text("value").as_deref(), Some("0"));
        assert_eq!(report.text("signal").as_deref(), Some("division-by-zero"));
    }

    #[test]
    fn bad_requests_are_coded() {
        let err = run_eval("mod", &args(&["1@s8.0"]), None).unwrap_err();
        assert!(err.starts_with("E_FIXVM_OP "), "{err}");

        let err = run_eval("neg", &args(&["1@s8.0", "2@s8.0"]), None).unwrap_err();
        assert!(err.starts_with("E_FIXVM_EVAL "), "{err}");

        let err = run_eval("inc", &args(&["1@s8.0"]), Some(4)).unwrap_err();
        assert!(err.starts_with("E_FIXVM_EVAL "), "{err}");
    }
}

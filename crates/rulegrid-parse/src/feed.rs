//! Translate tokenized operators into path-construction events.

use rulegrid_core::{AnalysisResult, Diagnostic, DiagnosticCode, PathOp};

use crate::tokenizer::{Operand, Operator};

fn describe(operand: Option<&Operand>) -> String {
    match operand {
        None => "missing".to_string(),
        Some(Operand::Unparsed(raw)) => format!("{raw:?}"),
        Some(other) => format!("{other:?}"),
    }
}

fn coordinates(op: &Operator) -> Result<(f64, f64), String> {
    let x = op.operands.first();
    let y = op.operands.get(1);
    match (x.and_then(Operand::as_f64), y.and_then(Operand::as_f64)) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(format!(
            "'{}' expects two numbers, got {} and {}",
            op.name,
            describe(x),
            describe(y)
        )),
    }
}

/// Extract the `m` / `l` events of a page from its operator sequence.
///
/// Every other operator is ignored, including `re` and the painting
/// operators. An `m` or `l` whose first two operands are not both numbers is
/// dropped and reported as [`DiagnosticCode::MalformedOperand`] with its
/// position in `ops`.
pub fn path_ops(ops: &[Operator]) -> AnalysisResult<Vec<PathOp>> {
    let mut events = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, op) in ops.iter().enumerate() {
        let build: fn(f64, f64) -> PathOp = match op.name.as_str() {
            "m" => PathOp::move_to,
            "l" => PathOp::line_to,
            _ => continue,
        };
        match coordinates(op) {
            Ok((x, y)) => events.push(build(x, y)),
            Err(description) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("skipping operator #{}: {}", index, description);
                diagnostics.push(
                    Diagnostic::new(DiagnosticCode::MalformedOperand, description)
                        .at_operator(index)
                        .with_element(op.name.clone()),
                );
            }
        }
    }

    AnalysisResult::with_diagnostics(events, diagnostics)
}

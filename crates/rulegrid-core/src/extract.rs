//! Line extraction from a page's path-construction events.

use crate::error::{AnalysisResult, Diagnostic, DiagnosticCode};
use crate::geometry::Point;
use crate::line::LineInfo;
use crate::path::PathOp;
use crate::settings::GridSettings;

/// Pen state threaded through the event sequence of one page.
///
/// The pen starts at the page origin.
#[derive(Debug, Default)]
struct PenState {
    current_point: Point,
    placed: bool,
    lines: Vec<LineInfo>,
    diagnostics: Vec<Diagnostic>,
}

impl PenState {
    fn apply(mut self, (index, op): (usize, PathOp), settings: &GridSettings) -> Self {
        let target = op.point();
        if !target.is_finite() {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::MalformedOperand,
                    format!("non-numeric operands ({}, {})", target.x, target.y),
                )
                .at_operator(index)
                .with_element(op.operator()),
            );
            return self;
        }

        if let PathOp::LineTo { .. } = op {
            if !self.placed {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::MissingCurrentPoint,
                        "line_to before any move_to, drawing from the origin",
                    )
                    .at_operator(index)
                    .with_element(op.operator()),
                );
            }
            let line = LineInfo::with_threshold(
                self.current_point,
                target,
                settings.horizontal_threshold,
            );
            if line.length() > settings.min_line_length {
                self.lines.push(line);
            }
        }
        self.current_point = target;
        self.placed = true;
        self
    }
}

/// Turn one page's `move_to` / `line_to` events into ruling lines.
///
/// Every `line_to` whose length exceeds `settings.min_line_length` yields a
/// [`LineInfo`] from the pen position to its target. Events with non-finite
/// operands are skipped without moving the pen. A `line_to` before any
/// `move_to` draws from the origin and is reported as `MissingCurrentPoint`.
pub fn extract_lines<I>(ops: I, settings: &GridSettings) -> AnalysisResult<Vec<LineInfo>>
where
    I: IntoIterator<Item = PathOp>,
{
    let state = ops
        .into_iter()
        .enumerate()
        .fold(PenState::default(), |state, event| state.apply(event, settings));
    AnalysisResult::with_diagnostics(state.lines, state.diagnostics)
}

use crate::geometry::Point;

/// A path-construction event from a page's content stream.
///
/// Operands arrive in the page's native coordinate space. A non-finite
/// operand marks an event whose source operands were not a well-formed
/// numeric pair; such events are skipped by the extractor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOp {
    /// `m`: relocate the pen without drawing.
    MoveTo { x: f64, y: f64 },
    /// `l`: draw from the pen position to the target, then relocate the pen.
    LineTo { x: f64, y: f64 },
}

impl PathOp {
    pub fn move_to(x: f64, y: f64) -> Self {
        PathOp::MoveTo { x, y }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        PathOp::LineTo { x, y }
    }

    /// Target point of the event.
    pub fn point(&self) -> Point {
        match *self {
            PathOp::MoveTo { x, y } | PathOp::LineTo { x, y } => Point::new(x, y),
        }
    }

    /// Content stream operator name for this event.
    pub fn operator(&self) -> &'static str {
        match self {
            PathOp::MoveTo { .. } => "m",
            PathOp::LineTo { .. } => "l",
        }
    }
}

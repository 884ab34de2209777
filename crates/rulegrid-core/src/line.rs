use std::fmt;

use crate::geometry::Point;
use crate::settings::HORIZONTAL_THRESHOLD;

/// A straight ruling-line segment.
///
/// Endpoints are normalized on construction so that `start.x <= end.x` and
/// `start.y <= end.y`; the drawing direction of the source operators is not
/// preserved. Values are immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineInfo {
    start: Point,
    end: Point,
    is_horizontal: bool,
    length: f64,
}

impl LineInfo {
    /// Build a line between two points using the default horizontal threshold.
    pub fn new(a: Point, b: Point) -> Self {
        Self::with_threshold(a, b, HORIZONTAL_THRESHOLD)
    }

    /// Build a line, classifying it as horizontal when `|a.y - b.y| < threshold`.
    pub fn with_threshold(a: Point, b: Point, threshold: f64) -> Self {
        let start = Point::new(a.x.min(b.x), a.y.min(b.y));
        let end = Point::new(a.x.max(b.x), a.y.max(b.y));
        Self {
            start,
            end,
            is_horizontal: (a.y - b.y).abs() < threshold,
            length: start.distance_to(end),
        }
    }

    /// Copy of this line with new endpoints but the same classification.
    pub(crate) fn reshaped(&self, start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            is_horizontal: self.is_horizontal,
            length: start.distance_to(end),
        }
    }

    /// Endpoint with the smaller coordinates.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Endpoint with the larger coordinates.
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn is_horizontal(&self) -> bool {
        self.is_horizontal
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

impl fmt::Display for LineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line[{}]: ({:.2},{:.2}) -> ({:.2},{:.2}) len={:.2}",
            if self.is_horizontal { "H" } else { "V" },
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            self.length
        )
    }
}

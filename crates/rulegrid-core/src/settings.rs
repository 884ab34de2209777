//! Tunable thresholds for the reconstruction pipeline.

use crate::error::Error;

/// Lines at or below this length are dropped at extraction time.
pub const MIN_LINE_LENGTH: f64 = 5.0;
/// A line is horizontal when its endpoints differ by less than this in y.
pub const HORIZONTAL_THRESHOLD: f64 = 1.0;
/// Two lines are proximate when their distance is below this.
pub const INTERSECTION_TOLERANCE: f64 = 3.0;
/// Amount added to both ends of a line before intersection testing.
pub const EXTEND_LENGTH: f64 = 50.0;
/// Fewer intersection points than this cannot bound a cell.
pub const MIN_INTERSECTIONS: usize = 4;

/// How two lines are judged to "meet" when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Proximity {
    /// Distance from the first line's midpoint to the second segment.
    ///
    /// Asymmetric: only evaluated for each unordered pair in input order,
    /// so the grouping can depend on the order lines were drawn in.
    MidpointToSegment,
    /// Smaller of the two midpoint-to-segment distances.
    Symmetric,
    /// Minimum distance between the two segments (zero when they cross).
    #[default]
    SegmentDistance,
}

/// Configuration for table reconstruction.
///
/// Defaults reproduce the reference thresholds; see the module constants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSettings {
    /// Segments must be strictly longer than this to become lines.
    pub min_line_length: f64,
    /// `|Δy|` below which a line counts as horizontal.
    pub horizontal_threshold: f64,
    /// Distance below which two lines are grouped together.
    pub intersection_tolerance: f64,
    /// Extension applied to each end of a line along its own axis.
    pub extend_length: f64,
    /// Minimum number of distinct intersection points for a table.
    pub min_intersections: usize,
    /// Line proximity test used for grouping.
    pub proximity: Proximity,
    /// Cluster grid coordinates closer than this to their mean.
    ///
    /// `None` keeps every distinct coordinate exactly as computed.
    pub coordinate_snap: Option<f64>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            min_line_length: MIN_LINE_LENGTH,
            horizontal_threshold: HORIZONTAL_THRESHOLD,
            intersection_tolerance: INTERSECTION_TOLERANCE,
            extend_length: EXTEND_LENGTH,
            min_intersections: MIN_INTERSECTIONS,
            proximity: Proximity::default(),
            coordinate_snap: None,
        }
    }
}

impl GridSettings {
    /// Check that every tolerance is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let tolerances = [
            ("min_line_length", self.min_line_length),
            ("horizontal_threshold", self.horizontal_threshold),
            ("intersection_tolerance", self.intersection_tolerance),
            ("extend_length", self.extend_length),
        ];
        for (name, value) in tolerances {
            check_tolerance(name, value)?;
        }
        if let Some(snap) = self.coordinate_snap {
            check_tolerance("coordinate_snap", snap)?;
        }
        if self.min_intersections < MIN_INTERSECTIONS {
            return Err(Error::InvalidSettings(format!(
                "min_intersections must be at least {MIN_INTERSECTIONS}, got {}",
                self.min_intersections
            )));
        }
        Ok(())
    }
}

fn check_tolerance(name: &str, value: f64) -> Result<(), Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidSettings(format!(
            "{name} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}

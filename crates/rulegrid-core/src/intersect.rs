use std::collections::HashSet;

use crate::geometry::Point;
use crate::line::LineInfo;

/// Intersection of a horizontal and a vertical line, if they cross.
///
/// The vertical line is represented by its start x, the horizontal line by
/// its start y. Both range checks are inclusive.
pub fn intersection(horizontal: &LineInfo, vertical: &LineInfo) -> Option<Point> {
    let x = vertical.start().x;
    let y = horizontal.start().y;
    let within_x = x >= horizontal.start().x && x <= horizontal.end().x;
    let within_y = y >= vertical.start().y && y <= vertical.end().y;
    (within_x && within_y).then(|| Point::new(x, y))
}

/// All horizontal × vertical intersection points of a line group.
///
/// Points are deduplicated by exact equality; no tolerance merging happens
/// here. Horizontal × horizontal and vertical × vertical pairs never meet.
pub fn intersection_points(lines: &[LineInfo]) -> HashSet<Point> {
    let (horizontals, verticals): (Vec<&LineInfo>, Vec<&LineInfo>) =
        lines.iter().partition(|line| line.is_horizontal());

    horizontals
        .iter()
        .flat_map(|h| verticals.iter().filter_map(move |v| intersection(h, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> LineInfo {
        LineInfo::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_crossing_lines() {
        let h = line(0.0, 50.0, 100.0, 50.0);
        let v = line(30.0, 0.0, 30.0, 100.0);
        assert_eq!(intersection(&h, &v), Some(Point::new(30.0, 50.0)));
    }

    #[test]
    fn test_endpoint_touch_is_inclusive() {
        let h = line(0.0, 0.0, 100.0, 0.0);
        let v = line(100.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection(&h, &v), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_vertical_outside_horizontal_range() {
        let h = line(0.0, 50.0, 100.0, 50.0);
        let v = line(101.0, 0.0, 101.0, 100.0);
        assert_eq!(intersection(&h, &v), None);
    }

    #[test]
    fn test_horizontal_outside_vertical_range() {
        let h = line(0.0, 150.0, 100.0, 150.0);
        let v = line(50.0, 0.0, 50.0, 100.0);
        assert_eq!(intersection(&h, &v), None);
    }

    #[test]
    fn test_parallel_lines_never_intersect() {
        let lines = vec![
            line(0.0, 0.0, 100.0, 0.0),
            line(0.0, 0.0, 100.0, 0.0),
            line(0.0, 0.0, 0.0, 100.0),
            line(0.0, 0.0, 0.0, 100.0),
        ];
        // Two identical H and two identical V lines meet in one point.
        assert_eq!(intersection_points(&lines).len(), 1);
        assert!(intersection_points(&lines[..2]).is_empty());
    }

    #[test]
    fn test_box_has_four_corners() {
        let lines = vec![
            line(-50.0, 0.0, 150.0, 0.0),
            line(-50.0, 100.0, 150.0, 100.0),
            line(0.0, -50.0, 0.0, 150.0),
            line(100.0, -50.0, 100.0, 150.0),
        ];
        let points = intersection_points(&lines);
        assert_eq!(points.len(), 4);
        for corner in [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0)] {
            assert!(points.contains(&Point::new(corner.0, corner.1)));
        }
    }

    #[test]
    fn test_near_duplicates_are_kept_distinct() {
        let lines = vec![
            line(0.0, 50.0, 100.0, 50.0),
            line(40.0, 0.0, 40.0, 100.0),
            line(40.3, 0.0, 40.3, 100.0),
        ];
        assert_eq!(intersection_points(&lines).len(), 2);
    }
}

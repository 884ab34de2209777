use crate::geometry::Point;
use crate::line::LineInfo;

/// Lengthen `line` by `amount` at both ends along its own axis.
///
/// Horizontal lines grow in x, every other line grows in y. The cross
/// coordinate is left untouched, so a slightly sloped line keeps its
/// endpoints' differing values on that axis.
pub fn extend_line(line: &LineInfo, amount: f64) -> LineInfo {
    let (start, end) = (line.start(), line.end());
    if line.is_horizontal() {
        line.reshaped(
            Point::new(start.x - amount, start.y),
            Point::new(end.x + amount, end.y),
        )
    } else {
        line.reshaped(
            Point::new(start.x, start.y - amount),
            Point::new(end.x, end.y + amount),
        )
    }
}

/// Extended copies of every line in a group, in the same order.
pub fn extend_group(lines: &[LineInfo], amount: f64) -> Vec<LineInfo> {
    lines.iter().map(|line| extend_line(line, amount)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> LineInfo {
        LineInfo::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_extend_horizontal() {
        let extended = extend_line(&line(0.0, 10.0, 100.0, 10.0), 50.0);
        assert!(extended.is_horizontal());
        assert_eq!(extended.start(), Point::new(-50.0, 10.0));
        assert_eq!(extended.end(), Point::new(150.0, 10.0));
        assert_eq!(extended.length(), 200.0);
    }

    #[test]
    fn test_extend_vertical() {
        let extended = extend_line(&line(20.0, 0.0, 20.0, 100.0), 50.0);
        assert!(!extended.is_horizontal());
        assert_eq!(extended.start(), Point::new(20.0, -50.0));
        assert_eq!(extended.end(), Point::new(20.0, 150.0));
    }

    #[test]
    fn test_extend_keeps_near_horizontal_classification() {
        let original = line(0.0, 10.0, 100.0, 10.4);
        let extended = extend_line(&original, 50.0);
        assert!(extended.is_horizontal());
        assert_eq!(extended.start().y, 10.0);
        assert_eq!(extended.end().y, 10.4);
    }

    #[test]
    fn test_extend_zero_is_identity() {
        let original = line(0.0, 0.0, 0.0, 100.0);
        assert_eq!(extend_line(&original, 0.0), original);
    }

    #[test]
    fn test_extend_group_preserves_order() {
        let lines = vec![line(0.0, 0.0, 100.0, 0.0), line(0.0, 0.0, 0.0, 100.0)];
        let extended = extend_group(&lines, 10.0);
        assert_eq!(extended.len(), 2);
        assert!(extended[0].is_horizontal());
        assert_eq!(extended[1].start(), Point::new(0.0, -10.0));
    }
}

//! Connectivity analysis: partition lines into candidate tables.
//!
//! Two lines are linked when the configured [`Proximity`] test finds them
//! closer than `intersection_tolerance`. Linking is transitively closed via
//! union-find, so a group is a connected component of the proximity graph.

use crate::geometry::Point;
use crate::line::LineInfo;
use crate::settings::{GridSettings, Proximity};

/// Index of a line in the per-page line arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// Union-find over [`LineId`]s with path compression.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<LineId>,
}

impl DisjointSet {
    /// One singleton set per line.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).map(LineId).collect(),
        }
    }

    /// Representative of the set containing `id`.
    pub fn find(&mut self, id: LineId) -> LineId {
        let mut root = id;
        while self.parent[root.0] != root {
            root = self.parent[root.0];
        }
        let mut current = id;
        while self.parent[current.0] != root {
            let next = self.parent[current.0];
            self.parent[current.0] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`. The root of `a` survives.
    pub fn union(&mut self, a: LineId, b: LineId) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_b.0] = root_a;
        }
    }

    /// Returns true if `a` and `b` are in the same set.
    pub fn connected(&mut self, a: LineId, b: LineId) -> bool {
        self.find(a) == self.find(b)
    }
}

/// Distance from `p` to the segment `a`–`b`.
///
/// The projection of `p` is clamped to the segment; a degenerate segment
/// degrades to point distance.
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn segments_cross(a: &LineInfo, b: &LineInfo) -> bool {
    let (p1, p2, p3, p4) = (a.start(), a.end(), b.start(), b.end());
    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);
    // Touching and collinear cases fall through to the endpoint distances.
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Minimum distance between two segments (zero when they cross).
pub fn segment_distance(a: &LineInfo, b: &LineInfo) -> f64 {
    if segments_cross(a, b) {
        return 0.0;
    }
    [
        point_to_segment_distance(a.start(), b.start(), b.end()),
        point_to_segment_distance(a.end(), b.start(), b.end()),
        point_to_segment_distance(b.start(), a.start(), a.end()),
        point_to_segment_distance(b.end(), a.start(), a.end()),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}

/// Distance from `a`'s midpoint to segment `b`. Not symmetric.
pub fn midpoint_distance(a: &LineInfo, b: &LineInfo) -> f64 {
    point_to_segment_distance(a.midpoint(), b.start(), b.end())
}

/// Whether `a` and `b` meet under the given proximity test.
///
/// For [`Proximity::MidpointToSegment`] the argument order matters.
pub fn lines_intersect(a: &LineInfo, b: &LineInfo, proximity: Proximity, tolerance: f64) -> bool {
    let distance = match proximity {
        Proximity::MidpointToSegment => midpoint_distance(a, b),
        Proximity::Symmetric => midpoint_distance(a, b).min(midpoint_distance(b, a)),
        Proximity::SegmentDistance => segment_distance(a, b),
    };
    distance < tolerance
}

/// Partition `lines` into connected groups.
///
/// Every unordered pair `(i, j)` with `i < j` is tested once as
/// `lines_intersect(lines[i], lines[j])`. Groups come back ordered by their
/// lowest line index, members in input order. Isolated lines form singleton
/// groups.
pub fn group_lines(lines: &[LineInfo], settings: &GridSettings) -> Vec<Vec<LineInfo>> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut sets = DisjointSet::new(lines.len());
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            if lines_intersect(
                &lines[i],
                &lines[j],
                settings.proximity,
                settings.intersection_tolerance,
            ) {
                sets.union(LineId(i), LineId(j));
            }
        }
    }

    let mut roots: Vec<LineId> = Vec::new();
    let mut groups: Vec<Vec<LineInfo>> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let root = sets.find(LineId(i));
        match roots.iter().position(|r| *r == root) {
            Some(slot) => groups[slot].push(*line),
            None => {
                roots.push(root);
                groups.push(vec![*line]);
            }
        }
    }
    groups
}

//! Grid synthesis from a cloud of intersection points.

use std::collections::HashSet;

use crate::error::GridRejection;
use crate::geometry::{Point, Rect};
use crate::settings::GridSettings;
use crate::table::{Table, TableBuilder, TableCell};

/// Sorted distinct values, compared exactly.
pub fn distinct_sorted<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut values: Vec<f64> = values.into_iter().map(|v| v + 0.0).collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Collapse runs of sorted coordinates within `tolerance` to their mean.
///
/// A run starts at its smallest value and absorbs every following value no
/// further than `tolerance` from that start.
pub fn snap_coordinates(sorted: &[f64], tolerance: f64) -> Vec<f64> {
    let mut snapped = Vec::with_capacity(sorted.len());
    let mut cluster_start = 0;
    for i in 1..=sorted.len() {
        let end_of_cluster =
            i == sorted.len() || (sorted[i] - sorted[cluster_start]).abs() > tolerance;
        if end_of_cluster {
            let cluster = &sorted[cluster_start..i];
            snapped.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
            cluster_start = i;
        }
    }
    snapped
}

fn boundaries<I>(values: I, snap: Option<f64>) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let exact = distinct_sorted(values);
    match snap {
        Some(tolerance) if !exact.is_empty() => snap_coordinates(&exact, tolerance),
        _ => exact,
    }
}

/// Build a complete rectangular grid from a group's intersection points.
///
/// Every combination of adjacent row and column boundaries yields a cell,
/// whether or not a ruling line was actually drawn there.
///
/// # Errors
///
/// Returns a [`GridRejection`] when there are fewer than
/// `settings.min_intersections` points, or fewer than two distinct x or y
/// boundaries.
pub fn reconstruct_grid(
    points: &HashSet<Point>,
    settings: &GridSettings,
) -> Result<Table, GridRejection> {
    if points.len() < settings.min_intersections {
        return Err(GridRejection::TooFewIntersections {
            found: points.len(),
            required: settings.min_intersections,
        });
    }

    let xs = boundaries(points.iter().map(|p| p.x), settings.coordinate_snap);
    let ys = boundaries(points.iter().map(|p| p.y), settings.coordinate_snap);
    if xs.len() < 2 {
        return Err(GridRejection::TooFewColumns {
            distinct_x: xs.len(),
        });
    }
    if ys.len() < 2 {
        return Err(GridRejection::TooFewRows {
            distinct_y: ys.len(),
        });
    }

    let mut builder = TableBuilder::new();
    for (row, y) in ys.windows(2).enumerate() {
        for (col, x) in xs.windows(2).enumerate() {
            let bounds = Rect::new(x[0], y[0], x[1] - x[0], y[1] - y[0]);
            builder.add_cell(TableCell::empty(bounds, row, col));
        }
    }

    let (min_x, max_x) = (xs[0], xs[xs.len() - 1]);
    let (min_y, max_y) = (ys[0], ys[ys.len() - 1]);
    Ok(builder.build(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)))
}

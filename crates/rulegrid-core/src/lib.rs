//! rulegrid-core: Backend-independent data types and the table reconstruction pipeline.
//!
//! Takes the `move_to` / `line_to` events of a page and rebuilds the row and
//! column grid of every ruled table on it from line geometry alone:
//!
//! 1. [`extract_lines`] turns path events into [`LineInfo`] segments.
//! 2. [`group_lines`] partitions them into connected groups (union-find).
//! 3. [`extend_group`] lengthens each line along its own axis.
//! 4. [`intersection_points`] collects horizontal × vertical crossings.
//! 5. [`reconstruct_grid`] synthesizes a complete grid of [`TableCell`]s.
//!
//! [`analyze_page`] and [`analyze_pages`] run the whole pipeline. Nothing here
//! performs I/O; non-fatal events come back as [`Diagnostic`] values.

pub mod analyze;
pub mod error;
pub mod extend;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod group;
pub mod intersect;
pub mod line;
pub mod path;
pub mod settings;
pub mod table;

pub use analyze::{
    DocumentTables, PageTables, analyze_group, analyze_page, analyze_pages, find_tables,
};
pub use error::{AnalysisResult, Diagnostic, DiagnosticCode, Error, GridRejection};
pub use extend::{extend_group, extend_line};
pub use extract::extract_lines;
pub use geometry::{Point, Rect};
pub use grid::{reconstruct_grid, snap_coordinates};
pub use group::{DisjointSet, LineId, group_lines, lines_intersect, segment_distance};
pub use intersect::{intersection, intersection_points};
pub use line::LineInfo;
pub use path::PathOp;
pub use settings::{GridSettings, Proximity};
pub use table::{Table, TableBuilder, TableCell, cell_key, dimensions_from_keys, parse_cell_key};

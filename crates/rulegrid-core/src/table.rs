//! Reconstructed tables and their cells.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;

use crate::geometry::Rect;

/// One grid cell of a reconstructed [`Table`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableCell {
    /// Cell rectangle in page coordinates.
    pub bounds: Rect,
    /// Text placed in the cell; empty unless a caller populated it.
    pub content: String,
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl TableCell {
    /// Create a cell. Surrounding whitespace in `content` is trimmed.
    pub fn new(bounds: Rect, content: impl AsRef<str>, row: usize, col: usize) -> Self {
        Self {
            bounds,
            content: content.as_ref().trim().to_string(),
            row,
            col,
        }
    }

    /// An empty cell.
    pub fn empty(bounds: Rect, row: usize, col: usize) -> Self {
        Self::new(bounds, "", row, col)
    }

    /// Human-facing key of this cell, e.g. `R1C1` for row 0, column 0.
    pub fn key(&self) -> String {
        cell_key(self.row, self.col)
    }
}

impl fmt::Display for TableCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell[R{},C{}]: '{}' at ({:.1},{:.1},{:.1},{:.1})",
            self.row,
            self.col,
            self.content,
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.bounds.height
        )
    }
}

/// Accumulates cells for a [`Table`].
///
/// Row and column counts grow as `max(row) + 1` and `max(col) + 1` over the
/// cells added. A cell added at an occupied `(row, col)` replaces the
/// previous one.
#[derive(Debug, Default)]
pub struct TableBuilder {
    cells: BTreeMap<(usize, usize), TableCell>,
    row_count: usize,
    col_count: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cell(&mut self, cell: TableCell) -> &mut Self {
        self.row_count = self.row_count.max(cell.row + 1);
        self.col_count = self.col_count.max(cell.col + 1);
        self.cells.insert((cell.row, cell.col), cell);
        self
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Finish the table with its overall bounding rectangle.
    pub fn build(self, bounds: Rect) -> Table {
        Table {
            cells: self.cells.into_values().collect(),
            row_count: self.row_count,
            col_count: self.col_count,
            bounds,
        }
    }
}

/// A table reconstructed from one group of ruling lines.
///
/// Cells are kept in row-major order and the value is immutable once built.
/// Deserialized tables are rebuilt through [`TableBuilder`], so the same
/// ordering and count invariants hold for them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "TableFields"))]
pub struct Table {
    cells: Vec<TableCell>,
    row_count: usize,
    col_count: usize,
    bounds: Rect,
}

impl Table {
    /// All cells, row-major.
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.cells
            .binary_search_by(|c| (c.row, c.col).cmp(&(row, col)))
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Cells grouped by row, top to bottom.
    pub fn rows(&self) -> Vec<Vec<&TableCell>> {
        let mut rows: Vec<Vec<&TableCell>> = vec![Vec::new(); self.row_count];
        for cell in &self.cells {
            if let Some(row) = rows.get_mut(cell.row) {
                row.push(cell);
            }
        }
        rows
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Bounding rectangle of the whole grid.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Flat `R{row+1}C{col+1}` → content mapping in row-major order.
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.cells
            .iter()
            .map(|cell| (cell.key(), cell.content.clone()))
            .collect()
    }

    /// Replace every cell's content with the text `fill` returns for it.
    ///
    /// Returned text is trimmed like any other cell content.
    pub fn with_contents<F>(mut self, mut fill: F) -> Table
    where
        F: FnMut(&TableCell) -> String,
    {
        for cell in &mut self.cells {
            let text = fill(cell);
            cell.content = text.trim().to_string();
        }
        self
    }
}

/// Serialized shape of a [`Table`], before its invariants are restored.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TableFields {
    cells: Vec<TableCell>,
    row_count: usize,
    col_count: usize,
    bounds: Rect,
}

#[cfg(feature = "serde")]
impl From<TableFields> for Table {
    fn from(fields: TableFields) -> Self {
        let mut builder = TableBuilder::new();
        for cell in fields.cells {
            builder.add_cell(cell);
        }
        builder.row_count = builder.row_count.max(fields.row_count);
        builder.col_count = builder.col_count.max(fields.col_count);
        builder.build(fields.bounds)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table ({}x{}):", self.row_count, self.col_count)?;
        writeln!(
            f,
            "Bounds: ({:.1},{:.1},{:.1},{:.1})",
            self.bounds.x, self.bounds.y, self.bounds.width, self.bounds.height
        )?;
        for row in 0..self.row_count {
            write!(f, "  Row {}: ", row + 1)?;
            for col in 0..self.col_count {
                let content = self.cell(row, col).map_or("", |c| c.content.as_str());
                write!(f, "| {content} ")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

/// Map key for a zero-based cell position.
pub fn cell_key(row: usize, col: usize) -> String {
    format!("R{}C{}", row + 1, col + 1)
}

/// Parse an `R{n}C{m}` key back into a zero-based `(row, col)`.
///
/// Returns `None` for anything that is not a well-formed 1-based key.
pub fn parse_cell_key(key: &str) -> Option<(usize, usize)> {
    let rest = key.strip_prefix('R')?;
    let (row, col) = rest.split_once('C')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(row) || !digits(col) {
        return None;
    }
    let row: usize = row.parse().ok()?;
    let col: usize = col.parse().ok()?;
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

/// Re-derive `(row_count, col_count)` from serialized cell keys.
///
/// Malformed keys are ignored. Returns `(0, 0)` when no key parses.
pub fn dimensions_from_keys<'a, I>(keys: I) -> (usize, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .filter_map(parse_cell_key)
        .fold((0, 0), |(rows, cols), (r, c)| (rows.max(r + 1), cols.max(c + 1)))
}

//! rulegrid: Reconstruct ruled tables from the line geometry of PDF pages.
//!
//! This is the public API facade crate. It re-exports types from
//! rulegrid-core and uses rulegrid-parse to read page content streams.
//!
//! # Architecture
//!
//! - **rulegrid-core**: Backend-independent data types and the table pipeline
//! - **rulegrid-parse**: Content stream tokenizer and lopdf page backend
//! - **rulegrid** (this crate): Public API that ties everything together
//!
//! # Example
//!
//! ```ignore
//! use rulegrid::Document;
//!
//! let doc = Document::open_file("report.pdf", None)?;
//! let page = doc.page(0)?;
//! for table in page.find_tables().value {
//!     println!("{table}");
//! }
//! ```

mod document;
mod page;

pub use document::{Document, PagesIter};
pub use page::Page;

pub use rulegrid_core;
pub use rulegrid_core::{
    AnalysisResult, Diagnostic, DiagnosticCode, DocumentTables, Error, GridRejection,
    GridSettings, LineInfo, PageTables, PathOp, Point, Proximity, Rect, Table, TableBuilder,
    TableCell, cell_key, parse_cell_key,
};
pub use rulegrid_parse;
pub use rulegrid_parse::ContentSource;

//! Per-page and per-document table analysis.
//!
//! Ties the stages together: extract lines, group them, then for each group
//! extend, intersect and reconstruct a grid. Groups that yield no grid are
//! reported as [`DiagnosticCode::GroupRejected`]; pages that fail before
//! reaching the pipeline are reported as [`DiagnosticCode::PageSkipped`].

use std::fmt;

use crate::error::{AnalysisResult, Diagnostic, DiagnosticCode, GridRejection};
use crate::extend::extend_group;
use crate::extract::extract_lines;
use crate::grid::reconstruct_grid;
use crate::group::group_lines;
use crate::intersect::intersection_points;
use crate::line::LineInfo;
use crate::path::PathOp;
use crate::settings::GridSettings;
use crate::table::Table;

/// Reconstruct a table from one line group.
///
/// # Errors
///
/// Returns the [`GridRejection`] explaining why the group is not a table.
pub fn analyze_group(lines: &[LineInfo], settings: &GridSettings) -> Result<Table, GridRejection> {
    let extended = extend_group(lines, settings.extend_length);
    let points = intersection_points(&extended);
    reconstruct_grid(&points, settings)
}

/// Group already-extracted lines and reconstruct every table among them.
pub fn find_tables(lines: &[LineInfo], settings: &GridSettings) -> AnalysisResult<Vec<Table>> {
    let mut tables = Vec::new();
    let mut diagnostics = Vec::new();
    for (index, group) in group_lines(lines, settings).iter().enumerate() {
        match analyze_group(group, settings) {
            Ok(table) => tables.push(table),
            Err(rejection) => diagnostics.push(
                Diagnostic::new(DiagnosticCode::GroupRejected, rejection.to_string())
                    .with_element(format!("group {index} ({} lines)", group.len())),
            ),
        }
    }
    AnalysisResult::with_diagnostics(tables, diagnostics)
}

/// Run the full pipeline over one page's path events.
pub fn analyze_page<I>(ops: I, settings: &GridSettings) -> AnalysisResult<Vec<Table>>
where
    I: IntoIterator<Item = PathOp>,
{
    let extracted = extract_lines(ops, settings);
    let found = find_tables(&extracted.value, settings);
    let mut diagnostics = extracted.diagnostics;
    diagnostics.extend(found.diagnostics);
    AnalysisResult::with_diagnostics(found.value, diagnostics)
}

/// Tables found on a single page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageTables {
    /// 0-based page index.
    pub page: usize,
    pub tables: Vec<Table>,
}

/// Result of a document-wide scan.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentTables {
    /// One entry per page that was analyzed, in page order.
    pub pages: Vec<PageTables>,
    /// Diagnostics from every page, each tagged with its page index.
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentTables {
    /// All tables, in page order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.pages.iter().flat_map(|p| p.tables.iter())
    }

    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }

    /// Indices of pages skipped after a page-level failure.
    pub fn skipped_pages(&self) -> Vec<usize> {
        self.diagnostics
            .iter()
            .filter(|d| d.code == DiagnosticCode::PageSkipped)
            .filter_map(|d| d.page)
            .collect()
    }
}

/// Analyze a sequence of pages strictly in order.
///
/// Each item is one page's path events (optionally with diagnostics already
/// raised while reading them), or the error that prevented reading them. A
/// failed page is skipped and recorded as a `PageSkipped` diagnostic; it
/// never affects the other pages.
pub fn analyze_pages<I, P, E>(pages: I, settings: &GridSettings) -> DocumentTables
where
    I: IntoIterator<Item = Result<P, E>>,
    P: Into<AnalysisResult<Vec<PathOp>>>,
    E: fmt::Display,
{
    let mut result = DocumentTables::default();
    for (page, feed) in pages.into_iter().enumerate() {
        match feed {
            Ok(feed) => {
                let feed: AnalysisResult<Vec<PathOp>> = feed.into();
                let analysis = analyze_page(feed.value, settings);
                result.diagnostics.extend(
                    feed.diagnostics
                        .into_iter()
                        .chain(analysis.diagnostics)
                        .map(|d| d.on_page(page)),
                );
                result.pages.push(PageTables {
                    page,
                    tables: analysis.value,
                });
            }
            Err(err) => result.diagnostics.push(
                Diagnostic::new(DiagnosticCode::PageSkipped, err.to_string()).on_page(page),
            ),
        }
    }
    result
}

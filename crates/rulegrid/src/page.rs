//! Page type holding one page's path events.

use rulegrid_core::{
    AnalysisResult, Diagnostic, GridSettings, LineInfo, PathOp, Table, analyze_page,
    extract_lines,
};

/// A single page of a [`Document`](crate::Document).
///
/// Holds the `m` / `l` events read from the page's content stream together
/// with any diagnostics raised while reading them. Constructed by
/// [`Document::page`](crate::Document::page).
#[derive(Debug, Clone)]
pub struct Page {
    /// Page index (0-based).
    index: usize,
    path_ops: Vec<PathOp>,
    diagnostics: Vec<Diagnostic>,
    settings: GridSettings,
}

impl Page {
    /// Create a page from already extracted path events.
    pub fn new(
        index: usize,
        path_ops: Vec<PathOp>,
        diagnostics: Vec<Diagnostic>,
        settings: GridSettings,
    ) -> Self {
        Self {
            index,
            path_ops,
            diagnostics,
            settings,
        }
    }

    /// Page index (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path_ops(&self) -> &[PathOp] {
        &self.path_ops
    }

    /// Diagnostics raised while reading the content stream.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Ruling lines drawn on this page.
    pub fn lines(&self) -> Vec<LineInfo> {
        extract_lines(self.path_ops.iter().copied(), &self.settings).value
    }

    /// Reconstruct every table on this page.
    ///
    /// Diagnostics include those raised while reading the page, each tagged
    /// with the page index.
    pub fn find_tables(&self) -> AnalysisResult<Vec<Table>> {
        let analysis = analyze_page(self.path_ops.iter().copied(), &self.settings);
        let diagnostics = self
            .diagnostics
            .iter()
            .cloned()
            .chain(analysis.diagnostics)
            .map(|d| d.on_page(self.index))
            .collect();
        AnalysisResult::with_diagnostics(analysis.value, diagnostics)
    }

    /// Split into the path events and their read diagnostics.
    pub fn into_feed(self) -> AnalysisResult<Vec<PathOp>> {
        AnalysisResult::with_diagnostics(self.path_ops, self.diagnostics)
    }
}

//! Top-level document type for opening PDFs and scanning them for tables.

use rulegrid_core::{
    Diagnostic, DiagnosticCode, DocumentTables, Error, GridSettings, analyze_pages,
};
use rulegrid_parse::{ContentSource, LopdfDocument};
use tracing::{debug, warn};

use crate::Page;

/// Iterator over the pages of a [`Document`], reading each on demand.
///
/// Created by [`Document::pages_iter()`].
pub struct PagesIter<'a> {
    doc: &'a Document,
    current: usize,
    count: usize,
}

impl Iterator for PagesIter<'_> {
    type Item = Result<Page, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.count {
            return None;
        }
        let result = self.doc.page(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PagesIter<'_> {}

/// A document opened for table reconstruction.
///
/// # Example
///
/// ```ignore
/// let doc = Document::open(&bytes, None)?;
/// for page in doc.analyze_tables().pages {
///     println!("page {}: {} tables", page.page + 1, page.tables.len());
/// }
/// ```
pub struct Document {
    source: Box<dyn ContentSource>,
    settings: GridSettings,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("page_count", &self.page_count())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Open a PDF document from bytes.
    ///
    /// * `bytes` - Raw PDF file bytes.
    /// * `settings` - Reconstruction settings. Uses defaults if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] if `settings` fail validation, or
    /// [`Error::ParseError`] if the bytes are not a readable PDF.
    pub fn open(bytes: &[u8], settings: Option<GridSettings>) -> Result<Self, Error> {
        let settings = settings.unwrap_or_default();
        settings.validate()?;
        let doc = LopdfDocument::open(bytes)?;
        debug!("opened PDF with {} pages", doc.page_count());
        Ok(Self {
            source: Box::new(doc),
            settings,
        })
    }

    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoError`] if the file cannot be read, otherwise the
    /// same errors as [`Document::open`].
    #[cfg(feature = "std")]
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        settings: Option<GridSettings>,
    ) -> Result<Self, Error> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, settings)
    }

    /// Wrap any [`ContentSource`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] if `settings` fail validation.
    pub fn from_source(
        source: impl ContentSource + 'static,
        settings: GridSettings,
    ) -> Result<Self, Error> {
        settings.validate()?;
        Ok(Self {
            source: Box::new(source),
            settings,
        })
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn page_count(&self) -> usize {
        self.source.page_count()
    }

    /// Read the page at 0-based `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageOutOfRange`] for a bad index, or the error that
    /// prevented the page's content stream from being read or tokenized.
    pub fn page(&self, index: usize) -> Result<Page, Error> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(Error::PageOutOfRange { index, page_count });
        }
        let feed = self.source.page_path_ops(index)?;
        let diagnostics = feed
            .diagnostics
            .into_iter()
            .map(|d| d.on_page(index))
            .collect();
        Ok(Page::new(index, feed.value, diagnostics, self.settings.clone()))
    }

    /// Iterate over pages, reading each lazily.
    pub fn pages_iter(&self) -> PagesIter<'_> {
        PagesIter {
            doc: self,
            current: 0,
            count: self.page_count(),
        }
    }

    /// Reconstruct the tables of every page, in page order.
    ///
    /// A page that cannot be read is logged, recorded as a
    /// [`DiagnosticCode::PageSkipped`] diagnostic and skipped; tables from
    /// all other pages are still returned.
    pub fn analyze_tables(&self) -> DocumentTables {
        let indices: Vec<usize> = (0..self.page_count()).collect();
        self.analyze_selected(&indices)
    }

    /// Like [`Document::analyze_tables`], restricted to the 0-based page
    /// `indices` in the order given.
    ///
    /// Page numbers in the result, including those on diagnostics, are the
    /// document indices. An index past the last page is skipped with a
    /// [`Error::PageOutOfRange`] diagnostic.
    pub fn analyze_selected(&self, indices: &[usize]) -> DocumentTables {
        let feeds = indices.iter().map(|&index| {
            self.page(index).map(Page::into_feed).inspect_err(|err| {
                warn!("skipping page {}: {}", index + 1, err);
            })
        });
        let mut result = analyze_pages(feeds, &self.settings);

        // analyze_pages numbers pages by feed position
        for page in &mut result.pages {
            page.page = indices[page.page];
        }
        for diagnostic in &mut result.diagnostics {
            diagnostic.page = diagnostic.page.map(|position| indices[position]);
        }

        for page in &result.pages {
            let diagnostics = result
                .diagnostics
                .iter()
                .filter(|d| d.page == Some(page.page))
                .count();
            debug!(
                "page {}: {} tables, {} diagnostics",
                page.page + 1,
                page.tables.len(),
                diagnostics
            );
        }
        for diagnostic in result
            .diagnostics
            .iter()
            .filter(|d| d.code != DiagnosticCode::PageSkipped)
        {
            log_diagnostic(diagnostic);
        }
        result
    }
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic.code {
        DiagnosticCode::GroupRejected => debug!("{}", diagnostic),
        _ => warn!("{}", diagnostic),
    }
}

//! Error and diagnostic types for rulegrid.
//!
//! Provides [`Error`] for fatal conditions at the document and page
//! boundary, [`Diagnostic`] for non-fatal events recorded while the pipeline
//! runs, [`AnalysisResult`] for pairing a value with those diagnostics, and
//! [`GridRejection`] describing why a line group produced no table.
//!
//! Nothing inside the line pipeline returns [`Error`]: malformed operands,
//! degenerate lines and under-connected groups are all absorbed and at most
//! reported as diagnostics.

use std::fmt;

/// Fatal error types.
///
/// These stop processing of a document or of a single page. A document-wide
/// scan isolates them per page (see [`analyze_pages`](crate::analyze_pages)).
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading document data.
    IoError(String),
    /// Error while tokenizing or interpreting a content stream.
    InterpreterError(String),
    /// A page index outside the document was requested.
    PageOutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// Number of pages in the document.
        page_count: usize,
    },
    /// A [`GridSettings`](crate::GridSettings) value failed validation.
    InvalidSettings(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(msg) => write!(f, "parse error: {msg}"),
            Error::IoError(msg) => write!(f, "I/O error: {msg}"),
            Error::InterpreterError(msg) => write!(f, "interpreter error: {msg}"),
            Error::PageOutOfRange { index, page_count } => write!(
                f,
                "page index {index} out of range (document has {page_count} pages)"
            ),
            Error::InvalidSettings(msg) => write!(f, "invalid settings: {msg}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

/// Machine-readable code for categorizing diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum DiagnosticCode {
    /// A path operator carried operands that are not a numeric pair.
    MalformedOperand,
    /// A `line_to` arrived before any `move_to` and was drawn from the origin.
    MissingCurrentPoint,
    /// A line group did not yield a table.
    GroupRejected,
    /// A whole page was skipped after a page-level failure.
    PageSkipped,
    /// Any other diagnostic not covered by specific variants.
    Other(String),
}

impl DiagnosticCode {
    /// Returns the string tag for this code.
    pub fn as_str(&self) -> &str {
        match self {
            DiagnosticCode::MalformedOperand => "MALFORMED_OPERAND",
            DiagnosticCode::MissingCurrentPoint => "MISSING_CURRENT_POINT",
            DiagnosticCode::GroupRejected => "GROUP_REJECTED",
            DiagnosticCode::PageSkipped => "PAGE_SKIPPED",
            DiagnosticCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal event recorded while analyzing a page.
///
/// Diagnostics replace a global logging side channel: the pipeline returns
/// them as data and the caller decides whether to log, count or ignore them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Machine-readable code.
    pub code: DiagnosticCode,
    /// Human-readable description.
    pub description: String,
    /// Page index (0-based), if known.
    pub page: Option<usize>,
    /// Index of the path operator in the page feed, if applicable.
    pub operator_index: Option<usize>,
    /// Element context (e.g., "group 2").
    pub element: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with a specific code and description.
    pub fn new(code: DiagnosticCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            operator_index: None,
            element: None,
        }
    }

    /// Attach a page index (builder pattern).
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Attach an operator index (builder pattern).
    pub fn at_operator(mut self, index: usize) -> Self {
        self.operator_index = Some(index);
        self
    }

    /// Attach element context (builder pattern).
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if let Some(index) = self.operator_index {
            write!(f, " [operator #{index}]")?;
        }
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected diagnostics.
#[derive(Debug, Clone)]
pub struct AnalysisResult<T> {
    /// The produced value.
    pub value: T,
    /// Diagnostics collected while producing it.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> AnalysisResult<T> {
    /// Create a result with no diagnostics.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Create a result with diagnostics.
    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// Returns true if there are no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Transform the value while preserving diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AnalysisResult<U> {
        AnalysisResult {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}

impl<T> From<T> for AnalysisResult<T> {
    fn from(value: T) -> Self {
        Self::ok(value)
    }
}

/// Why a line group did not produce a table.
///
/// This is a normal negative outcome of the heuristic, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRejection {
    /// Fewer intersection points than needed to bound a single cell.
    TooFewIntersections { found: usize, required: usize },
    /// Fewer than two distinct x coordinates.
    TooFewColumns { distinct_x: usize },
    /// Fewer than two distinct y coordinates.
    TooFewRows { distinct_y: usize },
}

impl fmt::Display for GridRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridRejection::TooFewIntersections { found, required } => write!(
                f,
                "{found} intersection points, at least {required} required"
            ),
            GridRejection::TooFewColumns { distinct_x } => {
                write!(f, "{distinct_x} distinct x coordinates, at least 2 required")
            }
            GridRejection::TooFewRows { distinct_y } => {
                write!(f, "{distinct_y} distinct y coordinates, at least 2 required")
            }
        }
    }
}

//! Page content backend trait.
//!
//! Defines [`ContentSource`], the seam between a document reader and the
//! table pipeline: something that has pages and can hand out each page's
//! decoded content stream bytes.

use rulegrid_core::{AnalysisResult, PathOp};

use crate::error::BackendError;
use crate::feed::path_ops;
use crate::tokenizer::tokenize;

/// A paginated document that can produce raw page content.
///
/// # Usage
///
/// ```ignore
/// let source = LopdfDocument::open(pdf_bytes)?;
/// for index in 0..source.page_count() {
///     let events = source.page_path_ops(index)?;
/// }
/// ```
pub trait ContentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Decoded content stream bytes of the page at 0-based `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the page content
    /// cannot be resolved or decoded.
    fn page_content(&self, index: usize) -> Result<Vec<u8>, BackendError>;

    /// Tokenize a page and extract its `m` / `l` events.
    ///
    /// # Errors
    ///
    /// Propagates [`page_content`](Self::page_content) failures and
    /// tokenizer errors. Malformed path operands are not errors; they come
    /// back as diagnostics.
    fn page_path_ops(&self, index: usize) -> Result<AnalysisResult<Vec<PathOp>>, BackendError> {
        let content = self.page_content(index)?;
        let ops = tokenize(&content)?;
        Ok(path_ops(&ops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulegrid_core::Error;

    struct InMemory(Vec<&'static [u8]>);

    impl ContentSource for InMemory {
        fn page_count(&self) -> usize {
            self.0.len()
        }

        fn page_content(&self, index: usize) -> Result<Vec<u8>, BackendError> {
            self.0
                .get(index)
                .map(|bytes| bytes.to_vec())
                .ok_or(BackendError::Core(Error::PageOutOfRange {
                    index,
                    page_count: self.0.len(),
                }))
        }
    }

    #[test]
    fn page_path_ops_tokenizes_and_feeds() {
        let source = InMemory(vec![b"0 0 m 100 0 l S"]);
        let result = source.page_path_ops(0).unwrap();
        assert_eq!(
            result.value,
            vec![PathOp::move_to(0.0, 0.0), PathOp::line_to(100.0, 0.0)]
        );
    }

    #[test]
    fn page_path_ops_propagates_tokenizer_error() {
        let source = InMemory(vec![b"0 0 m (oops"]);
        let err = source.page_path_ops(0).unwrap_err();
        assert!(matches!(err, BackendError::Interpreter(_)));
    }

    #[test]
    fn page_path_ops_out_of_range() {
        let source = InMemory(vec![]);
        let err: Error = source.page_path_ops(2).unwrap_err().into();
        assert_eq!(
            err,
            Error::PageOutOfRange {
                index: 2,
                page_count: 0
            }
        );
    }
}

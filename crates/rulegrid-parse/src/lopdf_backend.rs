//! lopdf-based document backend.
//!
//! Implements [`ContentSource`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. Only page enumeration and content stream decoding are needed;
//! resources, fonts and Form XObjects are not followed.

use rulegrid_core::Error;

use crate::backend::ContentSource;
use crate::error::BackendError;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    inner: lopdf::Document,
    /// Page object ids in page order.
    page_ids: Vec<lopdf::ObjectId>,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl LopdfDocument {
    /// Parse PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Parse`] if the bytes are not a readable PDF,
    /// or if the document is encrypted.
    pub fn open(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;
        if inner.is_encrypted() {
            return Err(BackendError::Parse(
                "encrypted documents are not supported".to_string(),
            ));
        }
        // get_pages is keyed by 1-based page number, so values are in order.
        let page_ids = inner.get_pages().into_values().collect();
        Ok(Self { inner, page_ids })
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    fn page_id(&self, index: usize) -> Result<lopdf::ObjectId, BackendError> {
        self.page_ids.get(index).copied().ok_or(BackendError::Core(
            Error::PageOutOfRange {
                index,
                page_count: self.page_ids.len(),
            },
        ))
    }

    fn resolve_stream(&self, obj: &lopdf::Object) -> Result<Vec<u8>, BackendError> {
        let obj = match obj {
            lopdf::Object::Reference(id) => self
                .inner
                .get_object(*id)
                .map_err(|e| BackendError::Parse(format!("failed to resolve /Contents: {e}")))?,
            other => other,
        };
        let stream = obj
            .as_stream()
            .map_err(|e| BackendError::Parse(format!("/Contents is not a stream: {e}")))?;
        if stream.dict.get(b"Filter").is_ok() {
            stream.decompressed_content().map_err(|e| {
                BackendError::Parse(format!("failed to decompress content stream: {e}"))
            })
        } else {
            Ok(stream.content.clone())
        }
    }
}

impl ContentSource for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Content streams of an array `/Contents` are joined with a space.
    /// A page without `/Contents` has empty content.
    fn page_content(&self, index: usize) -> Result<Vec<u8>, BackendError> {
        let page_id = self.page_id(index)?;
        let page = self
            .inner
            .get_dictionary(page_id)
            .map_err(|e| BackendError::Parse(format!("page {index} is not a dictionary: {e}")))?;
        let Ok(contents) = page.get(b"Contents") else {
            return Ok(Vec::new());
        };

        let contents = match contents {
            lopdf::Object::Reference(id) => self
                .inner
                .get_object(*id)
                .map_err(|e| BackendError::Parse(format!("failed to resolve /Contents: {e}")))?,
            other => other,
        };
        match contents {
            lopdf::Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    let bytes = self.resolve_stream(part)?;
                    if !content.is_empty() {
                        content.push(b' ');
                    }
                    content.extend_from_slice(&bytes);
                }
                Ok(content)
            }
            lopdf::Object::Stream(_) => self.resolve_stream(contents),
            _ => Err(BackendError::Parse(
                "/Contents is not a stream or array".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Object, ObjectId, Stream, dictionary};

    /// Build a PDF whose pages carry the given content streams. `None`
    /// leaves the page without `/Contents`.
    fn create_test_pdf(pages: &[Option<&[u8]>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::new();
        for content in pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            };
            if let Some(content) = content {
                let stream_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
                page.set("Contents", stream_id);
            }
            kids.push(doc.add_object(page).into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages.len() as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }

    #[test]
    fn open_and_count_pages() {
        let bytes = create_test_pdf(&[None, None, None]);
        let doc = LopdfDocument::open(&bytes).unwrap();
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn open_invalid_bytes_returns_error() {
        let err = LopdfDocument::open(b"not a pdf").unwrap_err();
        let core: Error = err.into();
        assert!(matches!(core, Error::ParseError(_)));
    }

    #[test]
    fn page_content_bytes() {
        let bytes = create_test_pdf(&[Some(b"0 0 m 100 0 l S")]);
        let doc = LopdfDocument::open(&bytes).unwrap();
        assert_eq!(doc.page_content(0).unwrap(), b"0 0 m 100 0 l S".to_vec());
    }

    #[test]
    fn page_without_contents_is_empty() {
        let bytes = create_test_pdf(&[None]);
        let doc = LopdfDocument::open(&bytes).unwrap();
        assert!(doc.page_content(0).unwrap().is_empty());
    }

    #[test]
    fn page_content_out_of_range() {
        let bytes = create_test_pdf(&[None]);
        let doc = LopdfDocument::open(&bytes).unwrap();
        let err = doc.page_content(1).unwrap_err();
        assert!(matches!(
            err,
            BackendError::Core(Error::PageOutOfRange {
                index: 1,
                page_count: 1
            })
        ));
    }

    #[test]
    fn page_path_ops_through_lopdf() {
        let bytes = create_test_pdf(&[Some(b"10 10 m 200 10 l 200 80 l S")]);
        let doc = LopdfDocument::open(&bytes).unwrap();
        let result = doc.page_path_ops(0).unwrap();
        assert_eq!(result.value.len(), 3);
        assert!(result.is_clean());
    }

    #[test]
    fn debug_shows_page_count() {
        let bytes = create_test_pdf(&[None, None]);
        let doc = LopdfDocument::open(&bytes).unwrap();
        assert!(format!("{doc:?}").contains("page_count: 2"));
    }
}

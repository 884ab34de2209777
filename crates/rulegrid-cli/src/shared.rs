use std::path::Path;

use rulegrid::{Document, GridSettings, Page};
use tracing::warn;

use crate::cli::GridArgs;
use crate::page_range::parse_page_range;

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found,
/// the settings are invalid, or the file cannot be parsed as a PDF.
pub fn open_document(file: &Path, settings: GridSettings) -> Result<Document, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    Document::open_file(file, Some(settings)).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// If `pages` is `None`, returns all pages.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Read the selected pages in order, skipping any that cannot be read.
pub fn read_pages(doc: &Document, indices: &[usize]) -> Vec<Page> {
    indices
        .iter()
        .filter_map(|&index| match doc.page(index) {
            Ok(page) => Some(page),
            Err(e) => {
                warn!("skipping page {}: {}", index + 1, e);
                None
            }
        })
        .collect()
}

pub fn grid_settings(args: &GridArgs) -> GridSettings {
    GridSettings {
        min_line_length: args.min_line_length,
        intersection_tolerance: args.intersection_tolerance,
        extend_length: args.extend_length,
        proximity: args.proximity.into(),
        coordinate_snap: args.snap,
        ..GridSettings::default()
    }
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProximityArg;
    use rulegrid::Proximity;

    #[test]
    fn csv_escape_plain_text() {
        assert_eq!(csv_escape("hello"), "hello");
        assert_eq!(csv_escape(""), "");
    }

    #[test]
    fn csv_escape_with_comma() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
    }

    #[test]
    fn csv_escape_with_quotes() {
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn csv_escape_with_newline() {
        assert_eq!(csv_escape("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn open_document_file_not_found() {
        let result = open_document(Path::new("/nonexistent/file.pdf"), GridSettings::default());
        assert_eq!(result.unwrap_err(), 1);
    }

    #[test]
    fn resolve_pages_none_returns_all() {
        assert_eq!(resolve_pages(None, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn resolve_pages_invalid_range() {
        assert_eq!(resolve_pages(Some("0"), 5).unwrap_err(), 1);
    }

    #[test]
    fn grid_settings_from_args() {
        let args = GridArgs {
            proximity: ProximityArg::Symmetric,
            extend_length: 12.0,
            intersection_tolerance: 2.0,
            min_line_length: 3.0,
            snap: Some(0.5),
        };
        let settings = grid_settings(&args);
        assert_eq!(settings.proximity, Proximity::Symmetric);
        assert_eq!(settings.extend_length, 12.0);
        assert_eq!(settings.intersection_tolerance, 2.0);
        assert_eq!(settings.min_line_length, 3.0);
        assert_eq!(settings.coordinate_snap, Some(0.5));
        assert_eq!(
            settings.horizontal_threshold,
            GridSettings::default().horizontal_threshold
        );
    }
}

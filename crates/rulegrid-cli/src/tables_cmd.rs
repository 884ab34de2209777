use std::path::Path;

use rulegrid::{DocumentTables, Table};

use crate::cli::{GridArgs, OutputFormat};
use crate::shared::{csv_escape, grid_settings, open_document, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    grid: &GridArgs,
) -> Result<(), i32> {
    let doc = open_document(file, grid_settings(grid))?;
    let page_indices = resolve_pages(pages, doc.page_count())?;
    let found = flatten_tables(doc.analyze_selected(&page_indices));

    match format {
        OutputFormat::Text => write_text(&found),
        OutputFormat::Json => write_json(&found),
        OutputFormat::Csv => write_csv(&found),
    }
}

/// Tables in page order, paired with the page's 0-based index.
fn flatten_tables(result: DocumentTables) -> Vec<(usize, Table)> {
    result
        .pages
        .into_iter()
        .flat_map(|page| {
            let index = page.page;
            page.tables.into_iter().map(move |table| (index, table))
        })
        .collect()
}

fn write_text(found: &[(usize, Table)]) -> Result<(), i32> {
    if found.is_empty() {
        println!("No tables found.");
        return Ok(());
    }

    for (num, (page, table)) in found.iter().enumerate() {
        println!("--- Table {} (page {}) ---", num + 1, page + 1);
        print!("{table}");
        println!();
    }
    Ok(())
}

fn write_json(found: &[(usize, Table)]) -> Result<(), i32> {
    let tables: Vec<_> = found
        .iter()
        .map(|(page, table)| {
            serde_json::json!({
                "page": page + 1,
                "rows": table.row_count(),
                "cols": table.col_count(),
                "bounds": table.bounds(),
                "cells": table.to_map(),
            })
        })
        .collect();

    let json_str = serde_json::to_string(&tables).map_err(|e| {
        eprintln!("Error: failed to serialize tables: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

fn write_csv(found: &[(usize, Table)]) -> Result<(), i32> {
    println!("table,page,cell,x,y,width,height,content");
    for (num, (page, table)) in found.iter().enumerate() {
        for cell in table.cells() {
            println!(
                "{},{},{},{:.1},{:.1},{:.1},{:.1},{}",
                num + 1,
                page + 1,
                cell.key(),
                cell.bounds.x,
                cell.bounds.y,
                cell.bounds.width,
                cell.bounds.height,
                csv_escape(&cell.content),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulegrid::{Diagnostic, DiagnosticCode, PageTables, Rect, TableBuilder, TableCell};

    fn boxed_table(x: f64) -> Table {
        let bounds = Rect::new(x, 0.0, 100.0, 50.0);
        let mut builder = TableBuilder::new();
        builder.add_cell(TableCell::empty(bounds, 0, 0));
        builder.build(bounds)
    }

    #[test]
    fn flatten_tables_keeps_page_indices() {
        let result = DocumentTables {
            pages: vec![
                PageTables {
                    page: 0,
                    tables: vec![boxed_table(0.0)],
                },
                PageTables {
                    page: 3,
                    tables: vec![boxed_table(200.0), boxed_table(400.0)],
                },
            ],
            diagnostics: vec![
                Diagnostic::new(DiagnosticCode::PageSkipped, "damaged").on_page(2),
            ],
        };
        let found = flatten_tables(result);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].0, 0);
        assert_eq!(found[1].0, 3);
        assert_eq!(found[2].1.bounds().x, 400.0);
    }

    #[test]
    fn flatten_tables_empty_page() {
        let result = DocumentTables {
            pages: vec![PageTables {
                page: 0,
                tables: Vec::new(),
            }],
            diagnostics: Vec::new(),
        };
        assert!(flatten_tables(result).is_empty());
    }
}

use std::path::Path;

use rulegrid::{GridSettings, LineInfo};

use crate::cli::OutputFormat;
use crate::shared::{open_document, read_pages, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    min_line_length: f64,
) -> Result<(), i32> {
    let settings = GridSettings {
        min_line_length,
        ..GridSettings::default()
    };
    let doc = open_document(file, settings)?;
    let page_indices = resolve_pages(pages, doc.page_count())?;
    let lines: Vec<(usize, Vec<LineInfo>)> = read_pages(&doc, &page_indices)
        .iter()
        .map(|page| (page.index(), page.lines()))
        .collect();

    match format {
        OutputFormat::Text => write_text(&lines),
        OutputFormat::Json => write_json(&lines),
        OutputFormat::Csv => write_csv(&lines),
    }
}

fn orientation(line: &LineInfo) -> &'static str {
    if line.is_horizontal() {
        "horizontal"
    } else {
        "vertical"
    }
}

fn write_text(pages: &[(usize, Vec<LineInfo>)]) -> Result<(), i32> {
    for (page, lines) in pages {
        println!("--- Page {} ({} lines) ---", page + 1, lines.len());
        for line in lines {
            let (start, end) = (line.start(), line.end());
            println!(
                "{:<10} ({:.1}, {:.1}) -> ({:.1}, {:.1})  length {:.1}",
                orientation(line),
                start.x,
                start.y,
                end.x,
                end.y,
                line.length()
            );
        }
    }
    Ok(())
}

fn write_json(pages: &[(usize, Vec<LineInfo>)]) -> Result<(), i32> {
    let output: Vec<_> = pages
        .iter()
        .map(|(page, lines)| {
            serde_json::json!({
                "page": page + 1,
                "lines": lines,
            })
        })
        .collect();

    let json_str = serde_json::to_string(&output).map_err(|e| {
        eprintln!("Error: failed to serialize lines: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

fn write_csv(pages: &[(usize, Vec<LineInfo>)]) -> Result<(), i32> {
    println!("page,orientation,x1,y1,x2,y2,length");
    for (page, lines) in pages {
        for line in lines {
            let (start, end) = (line.start(), line.end());
            println!(
                "{},{},{:.1},{:.1},{:.1},{:.1},{:.1}",
                page + 1,
                orientation(line),
                start.x,
                start.y,
                end.x,
                end.y,
                line.length()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulegrid::Point;

    #[test]
    fn orientation_labels() {
        let h = LineInfo::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let v = LineInfo::new(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        assert_eq!(orientation(&h), "horizontal");
        assert_eq!(orientation(&v), "vertical");
    }
}

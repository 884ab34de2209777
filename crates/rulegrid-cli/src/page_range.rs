use std::collections::BTreeSet;

/// Parse a 1-based page selection like "1,3-5" into sorted, distinct 0-based indices.
///
/// Every page must lie within `1..=page_count`; ranges must not run backwards.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = BTreeSet::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((first, last)) => {
                let first = page_number(first, page_count)?;
                let last = page_number(last, page_count)?;
                if first > last {
                    return Err(format!("invalid page range: '{part}' runs backwards"));
                }
                pages.extend(first - 1..last);
            }
            None => {
                pages.insert(page_number(part, page_count)? - 1);
            }
        }
    }

    Ok(pages.into_iter().collect())
}

fn page_number(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page() {
        assert_eq!(parse_page_range("1", 5).unwrap(), vec![0]);
        assert_eq!(parse_page_range("5", 5).unwrap(), vec![4]);
    }

    #[test]
    fn ranges_and_lists() {
        assert_eq!(parse_page_range("2-4", 5).unwrap(), vec![1, 2, 3]);
        assert_eq!(
            parse_page_range("1,3-5,8", 8).unwrap(),
            vec![0, 2, 3, 4, 7]
        );
    }

    #[test]
    fn overlapping_selections_merge() {
        assert_eq!(parse_page_range("3,1-3,2", 5).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn whitespace_and_empty_parts() {
        assert_eq!(parse_page_range(" 1 , 3 - 4 ,", 5).unwrap(), vec![0, 2, 3]);
        assert!(parse_page_range("", 5).unwrap().is_empty());
    }

    #[test]
    fn page_zero_invalid() {
        assert!(parse_page_range("0", 5).unwrap_err().contains("start at 1"));
        assert!(parse_page_range("0-2", 5).unwrap_err().contains("start at 1"));
    }

    #[test]
    fn page_exceeds_count() {
        assert!(parse_page_range("6", 5).unwrap_err().contains("exceeds"));
        assert!(parse_page_range("4-9", 5).unwrap_err().contains("exceeds"));
    }

    #[test]
    fn backwards_range_invalid() {
        assert!(parse_page_range("4-2", 5).unwrap_err().contains("backwards"));
    }

    #[test]
    fn garbage_invalid() {
        assert!(parse_page_range("one", 5).unwrap_err().contains("'one'"));
        assert!(parse_page_range("1-", 5).unwrap_err().contains("invalid page number"));
    }
}

//! Live title search over already-loaded rows
//!
//! Never touches the network: only rows the controller has accumulated are
//! searched. An empty query is the identity filter.

use super::PhotoRow;

/// Rows whose title contains `query`, ignoring case, in their original order
#[must_use]
pub fn filter_rows(rows: &[PhotoRow], query: &str) -> Vec<PhotoRow> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row.photo.title_contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::Photo;

    fn rows(titles: &[&str]) -> Vec<PhotoRow> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| PhotoRow::new(Photo::new(1, i as i64 + 1, *title), false))
            .collect()
    }

    fn titles(rows: &[PhotoRow]) -> Vec<&str> {
        rows.iter().map(|r| r.photo.title.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let all = rows(&["alpha", "beta", "gamma"]);
        assert_eq!(filter_rows(&all, ""), all);
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let all = rows(&["officia porro iure", "natus nisi omnis", "PORRO quia", "porr"]);
        assert_eq!(
            titles(&filter_rows(&all, "Porro")),
            vec!["officia porro iure", "PORRO quia"]
        );
    }

    #[test]
    fn test_no_match() {
        let all = rows(&["alpha", "beta"]);
        assert!(filter_rows(&all, "abc").is_empty());
    }

    #[test]
    fn test_whitespace_is_significant() {
        let all = rows(&["a b", "ab"]);
        assert_eq!(titles(&filter_rows(&all, " ")), vec!["a b"]);
    }

    #[test]
    fn test_non_ascii_titles() {
        let all = rows(&["Ärger im Büro", "ärger", "other"]);
        assert_eq!(titles(&filter_rows(&all, "ÄRGER")), vec!["Ärger im Büro", "ärger"]);
    }
}

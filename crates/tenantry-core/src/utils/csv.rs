//! Minimal CSV splitting for bulk imports.
//!
//! Lines are split on commas positionally. Quoted fields are not
//! reassembled, so a comma inside quotes still starts a new cell.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// Parse newline-delimited, comma-delimited text into headers and records.
pub fn parse_csv(text: &str) -> CsvTable {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(line) => line.split(',').map(strip_header).collect(),
        None => return CsvTable::default(),
    };

    let rows = lines
        .map(|line| {
            let mut cells = line.split(',').map(str::trim);
            headers
                .iter()
                .map(|header| {
                    let value = cells.next().unwrap_or_default();
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect();

    CsvTable { headers, rows }
}

fn strip_header(cell: &str) -> String {
    let cell = cell.trim();
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    let cell = cell.strip_suffix('"').unwrap_or(cell);
    cell.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_csv("a,b\n1,2\n3");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(
            table.rows,
            vec![row(&[("a", "1"), ("b", "2")]), row(&[("a", "3"), ("b", "")])]
        );
    }

    #[test]
    fn test_empty_input() {
        let table = parse_csv("");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());

        assert_eq!(parse_csv("\n   \n\t\n"), CsvTable::default());
    }

    #[test]
    fn test_blank_lines_dropped_before_headers() {
        let table = parse_csv("\n\nemail,name\n\nann@example.com,Ann\n  \nbob@example.com,Bob\n");
        assert_eq!(table.headers, vec!["email", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1]["name"], "Bob");
    }

    #[test]
    fn test_extra_fields_dropped() {
        let table = parse_csv("a\n1,2,3");
        assert_eq!(table.rows, vec![row(&[("a", "1")])]);
    }

    #[test]
    fn test_header_quotes_stripped_once() {
        let table = parse_csv("\"email\",\"\"name\"\"\nx,y");
        assert_eq!(table.headers, vec!["email", "\"name\""]);
        assert!(table.has_column("email"));
    }

    #[test]
    fn test_quoted_commas_not_reassembled() {
        let table = parse_csv("name,city\n\"Doe, Jane\",Lagos");
        assert_eq!(table.rows[0]["name"], "\"Doe");
        assert_eq!(table.rows[0]["city"], "Jane\"");
    }

    #[test]
    fn test_crlf_input() {
        let table = parse_csv("a,b\r\n1,2\r\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![row(&[("a", "1"), ("b", "2")])]);
    }
}

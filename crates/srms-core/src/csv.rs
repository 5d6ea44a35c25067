//! Line-oriented CSV parsing for bulk-import files
//!
//! The parser is a plain line/comma splitter: quoted fields, escaped commas
//! and embedded newlines are not understood. A field holding a literal comma
//! will shift every column after it.

use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

/// One data line keyed by header name
///
/// Entries are kept in header order. The key set always equals the set of
/// headers of the [`ParsedCsv`] the row came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Value stored under `header`
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == header)
            .map(|(_, value)| value.as_str())
    }

    /// Set `header` to `value`, replacing any earlier value for the same key
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == header) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((header, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Header names in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// `(header, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::default();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Header list plus the data rows of one CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether `header` appears on the header line
    pub fn has_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }
}

/// Parse raw CSV text into headers and keyed rows.
///
/// Line 0 is the header line. Whitespace-only lines after it are skipped.
/// Short rows are padded with empty strings and long rows lose their extra
/// fields. Fails only when `text` is empty.
pub fn parse(text: &str) -> Result<ParsedCsv> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut lines = text.split('\n');
    let headers: Vec<String> = match lines.next() {
        Some(line) => split_fields(line).map(str::to_string).collect(),
        None => return Err(Error::EmptyInput),
    };
    debug!(columns = headers.len(), "Parsed CSV header line");

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            trace!(line = index + 1, "Skipping blank line");
            continue;
        }
        rows.push(build_row(&headers, line));
    }

    debug!(rows = rows.len(), "Parsed CSV data rows");
    Ok(ParsedCsv { headers, rows })
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

fn build_row(headers: &[String], line: &str) -> Row {
    let values: Vec<&str> = split_fields(line).collect();
    let mut row = Row::default();
    for (position, header) in headers.iter().enumerate() {
        row.insert(header.as_str(), values.get(position).copied().unwrap_or(""));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_basic() {
        let parsed = parse("a,b\n1,2\n3,4").unwrap();
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert_eq!(
            parsed.rows,
            vec![row(&[("a", "1"), ("b", "2")]), row(&[("a", "3"), ("b", "4")])]
        );
    }

    #[test]
    fn test_short_row_is_padded() {
        let parsed = parse("a,b\n1").unwrap();
        assert_eq!(parsed.rows, vec![row(&[("a", "1"), ("b", "")])]);
    }

    #[test]
    fn test_long_row_drops_extras() {
        let parsed = parse("a,b\n1,2,3").unwrap();
        assert_eq!(parsed.rows, vec![row(&[("a", "1"), ("b", "2")])]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let parsed = parse("a,b\n1,2\n\n   \n3,4\n").unwrap();
        assert_eq!(parsed.row_count(), 2);
        assert_eq!(parsed.rows[1].get("a"), Some("3"));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let parsed = parse(" roll_no , name \r\n 42 ,  Asha \r\n").unwrap();
        assert_eq!(parsed.headers, vec!["roll_no", "name"]);
        assert_eq!(parsed.rows, vec![row(&[("roll_no", "42"), ("name", "Asha")])]);
    }

    #[test]
    fn test_header_only() {
        let parsed = parse("roll_no,name").unwrap();
        assert_eq!(parsed.headers, vec!["roll_no", "name"]);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(parse(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_quoted_comma_is_not_special() {
        let parsed = parse("name,city\n\"Rao, K\",Pune").unwrap();
        assert_eq!(parsed.rows[0].get("name"), Some("\"Rao"));
        assert_eq!(parsed.rows[0].get("city"), Some("K\""));
    }

    #[test]
    fn test_duplicate_header_last_value_wins() {
        let parsed = parse("a,a,b\n1,2,3").unwrap();
        let first = &parsed.rows[0];
        assert_eq!(first.len(), 2);
        assert_eq!(first.get("a"), Some("2"));
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_row_serializes_in_header_order() {
        let parsed = parse("z,a\n1,2").unwrap();
        let json = serde_json::to_string(&parsed.rows[0]).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    proptest! {
        #[test]
        fn prop_row_count_and_keys(
            headers in proptest::collection::vec("[a-z_]{1,8}", 1..6),
            lines in proptest::collection::vec(
                proptest::collection::vec("[A-Za-z0-9]{0,6}", 0..8),
                0..20,
            ),
        ) {
            let mut text = headers.join(",");
            let mut expected_rows = 0;
            for fields in &lines {
                text.push('\n');
                let line = fields.join(",");
                if !line.trim().is_empty() {
                    expected_rows += 1;
                }
                text.push_str(&line);
            }

            let parsed = parse(&text).unwrap();
            prop_assert_eq!(&parsed.headers, &headers);
            prop_assert_eq!(parsed.row_count(), expected_rows);

            let mut unique: Vec<&str> = Vec::new();
            for h in &headers {
                if !unique.contains(&h.as_str()) {
                    unique.push(h);
                }
            }
            for r in &parsed.rows {
                prop_assert_eq!(r.keys().collect::<Vec<_>>(), unique.clone());
            }
        }
    }
}

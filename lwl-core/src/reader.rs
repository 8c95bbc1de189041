//! CSV ingestion: turn export files into raw (date, value) rows.
//!
//! Rows are kept as text; parsing and dropping of bad cells happens later so the
//! number of dropped rows can be reported.

use crate::error::{LevelError, Result};
use crate::header::{ColumnAliases, HeaderColumns};
use crate::observation::RawRow;
use csv::{ByteRecord, ReaderBuilder};
use log::{info, warn};
use std::path::Path;

fn records(bytes: &[u8]) -> impl Iterator<Item = std::result::Result<ByteRecord, csv::Error>> + '_ {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes)
        .into_byte_records()
}

fn cell(record: &ByteRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_default()
}

fn is_blank(record: &ByteRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, |b| b.iter().all(u8::is_ascii_whitespace))
}

fn to_raw_row(record: &ByteRecord, columns: HeaderColumns) -> RawRow {
    RawRow {
        date: cell(record, columns.date),
        value: cell(record, columns.value),
    }
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// A raw text line of the input and the offset just past its newline.
struct Line<'a> {
    text: std::borrow::Cow<'a, str>,
    next: usize,
}

/// Split on `\n` without interpreting quotes. A leading BOM is skipped.
fn lines(bytes: &[u8]) -> impl Iterator<Item = Line<'_>> + '_ {
    let mut start = if bytes.starts_with(UTF8_BOM) {
        UTF8_BOM.len()
    } else {
        0
    };
    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let end = bytes[start..]
            .iter()
            .position(|b| *b == b'\n')
            .map_or(bytes.len(), |i| start + i);
        let text = String::from_utf8_lossy(&bytes[start..end]);
        let line = Line {
            text,
            next: (end + 1).min(bytes.len()),
        };
        start = end + 1;
        Some(line)
    })
}

fn header_columns(line: &str, aliases: &ColumnAliases) -> Option<HeaderColumns> {
    aliases.match_header(
        line.trim_end_matches('\r')
            .split(',')
            .map(|cell| cell.trim().trim_matches('"')),
    )
}

/// Data rows below the header, read with the flexible CSV reader.
fn data_rows(bytes: &[u8], columns: HeaderColumns) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    for result in records(bytes) {
        let record = result?;
        if !is_blank(&record) {
            rows.push(to_raw_row(&record, columns));
        }
    }
    Ok(rows)
}

/// Parse CSV bytes, scanning lines for the first one that names both a date
/// and a value column. Everything after that line is returned as raw rows.
///
/// Returns `Ok(None)` when no header line is found.
pub fn parse_csv(bytes: &[u8], aliases: &ColumnAliases) -> Result<Option<Vec<RawRow>>> {
    let header = lines(bytes)
        .find_map(|line| header_columns(&line.text, aliases).map(|columns| (columns, line.next)));
    match header {
        Some((columns, next)) => Ok(Some(data_rows(&bytes[next..], columns)?)),
        None => Ok(None),
    }
}

/// Parse CSV bytes whose first line must be the header.
pub fn parse_csv_strict(bytes: &[u8], aliases: &ColumnAliases) -> Result<Vec<RawRow>> {
    let missing = || LevelError::MissingHeader {
        date_columns: aliases.date.clone(),
        value_columns: aliases.value.clone(),
    };
    let first = lines(bytes).next().ok_or_else(missing)?;
    let columns = header_columns(&first.text, aliases).ok_or_else(missing)?;
    data_rows(&bytes[first.next..], columns)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read one file. A file without a recognised header contributes no rows.
pub fn read_csv_file(path: &Path, aliases: &ColumnAliases) -> Result<Vec<RawRow>> {
    let bytes = read_file(path)?;
    match parse_csv(&bytes, aliases)? {
        Some(rows) => {
            info!("Read {} rows from {}", rows.len(), path.display());
            Ok(rows)
        }
        None => {
            warn!(
                "No date/value header found in {}; skipping file",
                path.display()
            );
            Ok(Vec::new())
        }
    }
}

/// Read several files and concatenate their rows in list order.
///
/// Missing or unreadable files are fatal.
pub fn read_csv_files<P: AsRef<Path>>(paths: &[P], aliases: &ColumnAliases) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    for path in paths {
        rows.extend(read_csv_file(path.as_ref(), aliases)?);
    }
    Ok(rows)
}

/// Read one file in strict mode: the first line must be the header.
pub fn read_csv_file_strict(path: &Path, aliases: &ColumnAliases) -> Result<Vec<RawRow>> {
    let bytes = read_file(path)?;
    parse_csv_strict(&bytes, aliases)
}

#[cfg(test)]
mod tests {
    use super::{parse_csv, parse_csv_strict, read_csv_files};
    use crate::error::LevelError;
    use crate::header::ColumnAliases;
    use crate::observation::RawRow;

    // Shape of a gauge office download: metadata lines, then the header.
    const HISTORICAL: &str = r#"Station,02EA010,LAKE LEVEL
Parameter,Water Level
ID,PARAM,Date,Value (m),SYM
02EA010,46,2023-01-01,9.12,
02EA010,46,2023-01-02,9.10,B

02EA010,46,2023-01-03
"#;

    #[test]
    fn test_parse_csv_skips_preamble() {
        let rows = parse_csv(HISTORICAL.as_bytes(), &ColumnAliases::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::new("2023-01-01", "9.12"),
                RawRow::new("2023-01-02", "9.10"),
                RawRow::new("2023-01-03", ""),
            ]
        );
    }

    #[test]
    fn test_parse_csv_without_header() {
        let text = "2024-01-01,10.0\n2024-01-02,12.0\n";
        let rows = parse_csv(text.as_bytes(), &ColumnAliases::default()).unwrap();
        assert_eq!(rows, None);
    }

    #[test]
    fn test_parse_csv_header_only() {
        let rows = parse_csv(b"Date,Value\n", &ColumnAliases::default()).unwrap();
        assert_eq!(rows, Some(vec![]));
    }

    #[test]
    fn test_parse_csv_strict() {
        let rows = parse_csv_strict(
            b"Date,Value\n2024-01-01,10.0\n",
            &ColumnAliases::strict(),
        )
        .unwrap();
        assert_eq!(rows, vec![RawRow::new("2024-01-01", "10.0")]);

        let err = parse_csv_strict(
            b"Station info\nDate,Value\n2024-01-01,10.0\n",
            &ColumnAliases::strict(),
        )
        .unwrap_err();
        assert!(matches!(err, LevelError::MissingHeader { .. }));

        let err = parse_csv_strict(b"", &ColumnAliases::strict()).unwrap_err();
        assert!(matches!(err, LevelError::MissingHeader { .. }));
    }

    #[test]
    fn test_stray_quote_in_preamble() {
        let text = "Note: \"Lake,info\n\"unterminated,x\nDate,Value\n2024-01-01,10.0\n";
        let rows = parse_csv(text.as_bytes(), &ColumnAliases::default()).unwrap();
        assert_eq!(rows, Some(vec![RawRow::new("2024-01-01", "10.0")]));
    }

    #[test]
    fn test_header_variants() {
        let aliases = ColumnAliases::default();
        let bom = "\u{feff}Date,Value\r\n2024-01-01,10.0\r\n";
        assert_eq!(
            parse_csv(bom.as_bytes(), &aliases).unwrap(),
            Some(vec![RawRow::new("2024-01-01", "10.0")])
        );
        let quoted = "\"Date\",\"Value (m)\"\n\"2024-01-02\",\"9.5\"\n";
        assert_eq!(
            parse_csv(quoted.as_bytes(), &aliases).unwrap(),
            Some(vec![RawRow::new("2024-01-02", "9.5")])
        );
        let strict = parse_csv_strict(bom.as_bytes(), &ColumnAliases::strict()).unwrap();
        assert_eq!(strict, vec![RawRow::new("2024-01-01", "10.0")]);
    }

    #[test]
    fn test_read_missing_file_is_fatal() {
        let err = read_csv_files(
            &["/nonexistent/lwl/current_year.csv"][..],
            &ColumnAliases::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}

//! In-memory source table: ordered headers plus raw string rows.
//!
//! Rows are read once, kept only for the duration of the run, and never
//! written back out.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::io_utils;

#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Reads a delimited file into memory, stopping after `limit` rows when
    /// one is given.
    pub fn read(
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
        limit: Option<usize>,
    ) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)?;
        let mut rows = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            if let Some(limit) = limit
                && idx >= limit
            {
                break;
            }
            let record =
                record.with_context(|| format!("Reading row {} in {path:?}", idx + 2))?;
            rows.push(io_utils::decode_record(&record, encoding)?);
        }
        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn read_preserves_header_and_row_order() {
        let file = write_temp("bookID,title\n1,Dune\n2,Emma\n");
        let table = SourceTable::read(file.path(), b',', UTF_8, None).unwrap();
        assert_eq!(table.headers, vec!["bookID", "title"]);
        assert_eq!(table.rows, vec![vec!["1", "Dune"], vec!["2", "Emma"]]);
    }

    #[test]
    fn read_honours_the_row_limit() {
        let file = write_temp("id\n1\n2\n3\n");
        let table = SourceTable::read(file.path(), b',', UTF_8, Some(2)).unwrap();
        assert_eq!(table.row_count(), 2);
    }
}

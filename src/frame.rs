//! In-memory raw tables: a header row plus string cells aligned to it.

use std::path::Path;

use crate::{
    error::{NormalizeError, Result},
    io_utils::{self, ReadOptions, WriteOptions},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table, padding short rows with empty cells.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn read(path: &Path, options: &ReadOptions) -> Result<Self> {
        let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
        let text = io_utils::read_decoded(path, options.encoding)?;
        let mut reader = io_utils::open_csv_reader(text.as_bytes(), delimiter);
        let headers = reader
            .headers()
            .map_err(|err| NormalizeError::csv(path, err))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(NormalizeError::EmptyTable {
                path: path.to_path_buf(),
            });
        }

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|err| NormalizeError::csv(path, err))?;
            if record.len() > headers.len() {
                return Err(NormalizeError::RaggedRow {
                    path: path.to_path_buf(),
                    row: idx + 2,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self::new(table_name(path), headers, rows))
    }

    pub fn write(&self, path: &Path, options: &WriteOptions) -> Result<()> {
        let mut writer = io_utils::buffered_csv_writer(options.delimiter);
        writer
            .write_record(&self.headers)
            .map_err(|err| NormalizeError::csv(path, err))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|err| NormalizeError::csv(path, err))?;
        }
        io_utils::finish_csv_writer(writer, path, options.encoding)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        let column = column.trim();
        self.headers.iter().position(|h| h == column)
    }

    /// Like [`column_index`](Self::column_index) but reports the table name on failure.
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| NormalizeError::MissingColumn {
                column: column.to_string(),
                table: self.name.clone(),
            })
    }

    /// Keeps rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }

    /// Removes the named columns; names not present are ignored.
    /// Returns how many columns were removed.
    pub fn drop_columns(&mut self, columns: &[String]) -> usize {
        let doomed = self
            .headers
            .iter()
            .map(|h| columns.iter().any(|c| c.trim() == h))
            .collect::<Vec<_>>();
        let removed = doomed.iter().filter(|d| **d).count();
        if removed == 0 {
            return 0;
        }
        let keep = |cells: Vec<String>| {
            cells
                .into_iter()
                .zip(doomed.iter())
                .filter(|(_, drop)| !**drop)
                .map(|(cell, _)| cell)
                .collect::<Vec<_>>()
        };
        self.headers = keep(std::mem::take(&mut self.headers));
        self.rows = std::mem::take(&mut self.rows).into_iter().map(keep).collect();
        removed
    }
}

fn table_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn read_pads_short_rows_and_trims_headers() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("leads.csv");
        std::fs::write(&path, " Full Name ,Phone,State\nAnn Lee,555-222-3333\n").expect("write");
        let table = RawTable::read(&path, &ReadOptions::default()).expect("read");
        assert_eq!(table.name(), "leads.csv");
        assert_eq!(table.headers(), strings(&["Full Name", "Phone", "State"]).as_slice());
        assert_eq!(table.rows()[0], strings(&["Ann Lee", "555-222-3333", ""]));
    }

    #[test]
    fn read_rejects_rows_wider_than_header() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "a,b\n1,2\n1,2,3\n").expect("write");
        let err = RawTable::read(&path, &ReadOptions::default()).expect_err("ragged");
        assert!(matches!(
            err,
            NormalizeError::RaggedRow {
                row: 3,
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn read_rejects_empty_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").expect("write");
        let err = RawTable::read(&path, &ReadOptions::default()).expect_err("empty");
        assert!(matches!(err, NormalizeError::EmptyTable { .. }));
    }

    #[test]
    fn drop_columns_ignores_unknown_names() {
        let mut table = RawTable::new(
            "t",
            strings(&["Name", "Other ZIP Code", "Phone"]),
            vec![strings(&["Ann", "12345", "555"])],
        );
        let removed = table.drop_columns(&strings(&["Other ZIP Code", "Missing"]));
        assert_eq!(removed, 1);
        assert_eq!(table.headers(), strings(&["Name", "Phone"]).as_slice());
        assert_eq!(table.rows()[0], strings(&["Ann", "555"]));
    }

    #[test]
    fn require_column_names_the_table() {
        let table = RawTable::new("leads.csv", strings(&["Name"]), Vec::new());
        let err = table.require_column("State").expect_err("missing");
        assert_eq!(err.to_string(), "required column 'State' not found in leads.csv");
    }
}

//! I/O utilities for CSV reading, writing, encoding, and delimiter resolution.
//!
//! All file I/O in lead-normalizer flows through this module:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding and output transcoding via `encoding_rs`,
//!   defaulting to UTF-8. A leading byte-order mark is stripped on read.
//! - **Input discovery**: a directory expands to its `.csv` files in name order.
//! - **stdout**: the `-` output path writes to standard output.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{NormalizeError, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// How input tables are parsed.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// `None` picks the delimiter from the file extension.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// How output tables are written.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
        }
    }
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| NormalizeError::UnknownEncoding(value.to_string())),
        None => Ok(UTF_8),
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn resolve_output_delimiter(path: Option<&Path>, provided: Option<u8>, fallback: u8) -> u8 {
    if let Some(delim) = provided {
        return delim;
    }
    if let Some(path) = path {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => return DEFAULT_TSV_DELIMITER,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => return DEFAULT_CSV_DELIMITER,
            _ => {}
        }
    }
    fallback
}

/// Header-bearing reader. Short rows are tolerated here and padded by the
/// caller; long rows are rejected by the caller.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

/// Reads and decodes a whole file, stripping any byte-order mark.
pub fn read_decoded(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|err| NormalizeError::io(path, err))?;
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(NormalizeError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

/// Lists the CSV inputs named by `path`.
///
/// A directory yields its `*.csv` entries (extension compared
/// case-insensitively) sorted by file name; any other path is returned as is.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let entries = fs::read_dir(path).map_err(|err| NormalizeError::io(path, err))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| NormalizeError::io(path, err))?;
        let candidate = entry.path();
        let is_csv = candidate
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && candidate.is_file() {
            files.push(candidate);
        }
    }
    files.sort();
    Ok(files)
}

/// In-memory CSV writer whose bytes are transcoded on [`finish_csv_writer`].
pub fn buffered_csv_writer(delimiter: u8) -> csv::Writer<Vec<u8>> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    builder.from_writer(Vec::new())
}

pub fn finish_csv_writer(
    writer: csv::Writer<Vec<u8>>,
    path: &Path,
    encoding: &'static Encoding,
) -> Result<()> {
    let bytes = writer.into_inner().map_err(|err| {
        NormalizeError::io(path, std::io::Error::other(err.error().to_string()))
    })?;
    write_encoded(path, &bytes, encoding)
}

/// Writes UTF-8 `bytes` to `path` (or stdout for `-`) in the target encoding,
/// creating missing parent directories.
pub fn write_encoded(path: &Path, bytes: &[u8], encoding: &'static Encoding) -> Result<()> {
    let text = String::from_utf8_lossy(bytes);
    let (encoded, _, had_errors) = encoding.encode(&text);
    if had_errors {
        return Err(NormalizeError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
        });
    }
    if is_dash(path) {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&encoded)
            .and_then(|_| stdout.flush())
            .map_err(|err| NormalizeError::io(path, err))?;
        return Ok(());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|err| NormalizeError::io(parent, err))?;
    }
    fs::write(path, &encoded).map_err(|err| NormalizeError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        assert_eq!(resolve_input_delimiter(Path::new("a.tsv"), None), b'\t');
        assert_eq!(resolve_input_delimiter(Path::new("a.csv"), None), b',');
        assert_eq!(resolve_input_delimiter(Path::new("a.tsv"), Some(b';')), b';');
        assert_eq!(resolve_output_delimiter(Some(Path::new("o.tsv")), None, b','), b'\t');
        assert_eq!(resolve_output_delimiter(None, None, b'|'), b'|');
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(resolve_encoding(Some("utf-8")).is_ok());
        assert!(resolve_encoding(Some(" windows-1252 ")).is_ok());
        let err = resolve_encoding(Some("klingon")).expect_err("unknown label");
        assert!(matches!(err, NormalizeError::UnknownEncoding(label) if label == "klingon"));
    }

    #[test]
    fn collect_inputs_sorts_csv_files_only() {
        let dir = tempdir().expect("temp dir");
        for name in ["b.csv", "a.CSV", "notes.txt"] {
            fs::write(dir.path().join(name), "x\n1\n").expect("write");
        }
        fs::create_dir(dir.path().join("nested.csv")).expect("mkdir");
        let files = collect_inputs(dir.path()).expect("collect");
        let names = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn write_encoded_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("out").join("deeper").join("file.csv");
        write_encoded(&target, b"a,b\n", UTF_8).expect("write");
        assert_eq!(fs::read_to_string(&target).expect("read"), "a,b\n");
    }

    #[test]
    fn read_decoded_strips_bom_and_transcodes() {
        let dir = tempdir().expect("temp dir");
        let utf8 = dir.path().join("bom.csv");
        fs::write(&utf8, b"\xEF\xBB\xBFName\nJos\xC3\xA9\n").expect("write");
        assert_eq!(read_decoded(&utf8, UTF_8).expect("decode"), "Name\nJosé\n");

        let latin = dir.path().join("latin.csv");
        fs::write(&latin, b"Name\nJos\xE9\n").expect("write");
        let encoding = resolve_encoding(Some("windows-1252")).expect("encoding");
        assert_eq!(read_decoded(&latin, encoding).expect("decode"), "Name\nJosé\n");
    }
}

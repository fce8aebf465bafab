//! Error types for reading, projecting and writing lead tables.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;

/// Failures surfaced by the normalization pipeline.
///
/// Value-level problems (an unparseable phone, zip or name) never show up here:
/// the normalizers in [`crate::values`] degrade those to empty strings.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A column the operation depends on is absent from the table.
    #[error("required column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    #[error("I/O failure on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to decode {path:?} as {encoding}")]
    Decode { path: PathBuf, encoding: String },

    /// A data row carries more cells than the header declares.
    #[error("row {row} in {path:?} has {found} field(s) but the header has {expected}")]
    RaggedRow {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no header row found in {path:?}")]
    EmptyTable { path: PathBuf },

    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("no CSV files found in {path:?}")]
    NoInputFiles { path: PathBuf },

    /// Nothing survived table processing, so there is nothing to write.
    #[error("no data was processed successfully")]
    NoData,
}

impl NormalizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NormalizeError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        NormalizeError::Csv {
            path: path.into(),
            source,
        }
    }
}

//! Batch normalization of a directory (or single file) of lead exports into
//! one canonical CSV.
//!
//! Each table is read and projected independently. A table that fails is
//! logged and skipped while the rest of the batch carries on; in single-file
//! mode the failure is returned instead. Surviving records are concatenated in
//! input order, zip codes are cleaned, rows without a 10-digit phone are
//! removed, and the optional state filter runs last.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{NormalizeError, Result},
    fields::FieldMatcher,
    frame::RawTable,
    io_utils::{self, ReadOptions, WriteOptions},
    project::{CanonicalRecord, project_table},
    states,
    values::{clean_phone, clean_zip},
};

/// Minimum phone length a row needs to survive the terminal filter.
pub const MIN_PHONE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub read: ReadOptions,
    pub write: WriteOptions,
    /// Keep only rows in the target states, rewriting names to postal codes.
    pub state_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedTable {
    pub table: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub tables_processed: usize,
    pub tables_skipped: Vec<SkippedTable>,
    /// Data rows read across all processed tables.
    pub rows_read: usize,
    /// Rows after phone fan-out, before any filtering.
    pub rows_expanded: usize,
    pub rows_without_phone: usize,
    pub rows_outside_states: usize,
    pub rows_written: usize,
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<CanonicalRecord>,
    pub summary: BatchSummary,
}

/// Normalizes every table under `input` without writing anything.
pub fn normalize_inputs(
    input: &Path,
    options: &BatchOptions,
    matcher: &FieldMatcher,
) -> Result<BatchOutcome> {
    let single_file = !input.is_dir();
    let files = io_utils::collect_inputs(input)?;
    if files.is_empty() {
        return Err(NormalizeError::NoInputFiles {
            path: input.to_path_buf(),
        });
    }

    let mut summary = BatchSummary::default();
    let mut records = Vec::new();
    for path in &files {
        info!("Processing {}...", display_name(path));
        let table = match RawTable::read(path, &options.read) {
            Ok(table) => table,
            Err(err) if single_file => return Err(err),
            Err(err) => {
                warn!("Skipping {}: {err}", display_name(path));
                summary.tables_skipped.push(SkippedTable {
                    table: display_name(path),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let projected = project_table(&table, matcher);
        if !projected.report.dropped.is_empty() {
            info!(
                "{}: ignored {} unmatched column(s)",
                projected.report.table,
                projected.report.dropped.len()
            );
        }
        summary.tables_processed += 1;
        summary.rows_read += projected.report.raw_rows;
        summary.rows_expanded += projected.report.expanded_rows;
        records.extend(projected.records);
    }

    if summary.tables_processed == 0 || records.is_empty() {
        return Err(NormalizeError::NoData);
    }

    for record in &mut records {
        record.zip = clean_zip(&record.zip);
        record.phone = clean_phone(&record.phone);
    }

    let before = records.len();
    records.retain(|record| record.phone.len() >= MIN_PHONE_LEN);
    summary.rows_without_phone = before - records.len();
    info!(
        "Removed {} rows without valid phone numbers",
        summary.rows_without_phone
    );

    if options.state_filter {
        summary.rows_outside_states = states::filter_records(&mut records);
        info!(
            "Removed {} rows outside the target states",
            summary.rows_outside_states
        );
    }

    summary.rows_written = records.len();
    Ok(BatchOutcome { records, summary })
}

/// Writes canonical records with the fixed seven-column header.
pub fn write_records(path: &Path, records: &[CanonicalRecord], options: &WriteOptions) -> Result<()> {
    let mut writer = io_utils::buffered_csv_writer(options.delimiter);
    if records.is_empty() {
        // serialize() only emits the header alongside the first record
        writer
            .write_record(crate::fields::CanonicalField::headers())
            .map_err(|err| NormalizeError::csv(path, err))?;
    }
    for record in records {
        writer
            .serialize(record)
            .map_err(|err| NormalizeError::csv(path, err))?;
    }
    io_utils::finish_csv_writer(writer, path, options.encoding)
}

/// Normalizes `input` and writes the combined table to `output`.
pub fn run(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
    matcher: &FieldMatcher,
) -> Result<BatchSummary> {
    let outcome = normalize_inputs(input, options, matcher)?;
    write_records(output, &outcome.records, &options.write)?;
    info!(
        "Normalized data saved to {} ({} row(s) from {} table(s), {} skipped)",
        output.display(),
        outcome.summary.rows_written,
        outcome.summary.tables_processed,
        outcome.summary.tables_skipped.len()
    );
    Ok(outcome.summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

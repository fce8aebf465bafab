use std::fs;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    batch::{self, BatchOptions},
    cli::NormalizeArgs,
    fields, read_options, write_options,
};

pub fn execute(args: &NormalizeArgs) -> Result<()> {
    let options = BatchOptions {
        read: read_options(&args.input_options)?,
        write: write_options(Some(args.output.as_path()), &args.output_options)?,
        state_filter: args.state_filter,
    };
    info!(
        "Normalizing {:?} -> {:?}{}",
        args.input,
        args.output,
        if args.state_filter {
            " (state filter on)"
        } else {
            ""
        }
    );

    let summary = batch::run(&args.input, &args.output, &options, fields::canonical_matcher())
        .with_context(|| format!("Normalizing {:?}", args.input))?;

    for skipped in &summary.tables_skipped {
        warn!("Skipped {}: {}", skipped.table, skipped.reason);
    }
    info!(
        "Processed {} table(s), skipped {}; final number of rows: {}",
        summary.tables_processed,
        summary.tables_skipped.len(),
        summary.rows_written
    );

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary).context("Serializing run summary")?;
        fs::write(path, json).with_context(|| format!("Writing summary to {path:?}"))?;
        info!("Run summary written to {:?}", path);
    }
    Ok(())
}

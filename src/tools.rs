//! Single-file companion commands: phone fan-out, state filtering, phone
//! counts and previews, distinct values, and column removal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;

use crate::{
    cli::{DropColumnsArgs, ExpandArgs, FilterStatesArgs, PhoneColumnArgs, PhonesArgs, UniqueArgs},
    error::NormalizeError,
    expand, fields,
    frame::RawTable,
    read_options, states,
    table::print_table,
    write_options,
};

pub fn execute_expand(args: &ExpandArgs) -> Result<()> {
    let input = read_table(&args.input, &args.input_options)?;
    let expanded = expand::expand_table(&input, fields::canonical_matcher(), &args.phone_header);
    let options = write_options(Some(args.output.as_path()), &args.output_options)?;
    expanded
        .write(&args.output, &options)
        .with_context(|| format!("Writing expanded rows to {:?}", args.output))?;
    info!(
        "Expanded {} row(s) from {:?} into {} row(s) -> {:?}",
        input.len(),
        args.input,
        expanded.len(),
        args.output
    );
    Ok(())
}

pub fn execute_filter_states(args: &FilterStatesArgs) -> Result<()> {
    let mut table = read_table(&args.input, &args.input_options)?;
    let removed = states::filter_table(&mut table, &args.column)
        .with_context(|| format!("Filtering states in {:?}", args.input))?;
    let options = write_options(Some(args.output.as_path()), &args.output_options)?;
    table
        .write(&args.output, &options)
        .with_context(|| format!("Writing filtered rows to {:?}", args.output))?;
    info!(
        "Kept {} row(s) in the target states, removed {} -> {:?}",
        table.len(),
        removed,
        args.output
    );
    Ok(())
}

pub fn execute_count_phones(args: &PhoneColumnArgs) -> Result<()> {
    let table = read_table(&args.input, &args.input_options)?;
    let count = rows_with_value(&table, &args.column)?.len();
    println!(
        "Number of rows with a value in the '{}' column: {count}",
        args.column
    );
    Ok(())
}

pub fn execute_phones(args: &PhonesArgs) -> Result<()> {
    let target = &args.target;
    let table = read_table(&target.input, &target.input_options)?;
    let mut rows = rows_with_value(&table, &target.column)?;
    let total = rows.len();
    if args.rows > 0 {
        rows.truncate(args.rows);
    }
    print_table(table.headers(), &rows);
    info!(
        "Displayed {} of {} row(s) with a '{}' value",
        rows.len(),
        total,
        target.column
    );
    Ok(())
}

pub fn execute_unique(args: &UniqueArgs) -> Result<()> {
    let table = read_table(&args.input, &args.input_options)?;
    let values = unique_values(&table, &args.column)?;
    println!("Unique values in the '{}' column:", args.column);
    for value in &values {
        println!("{value}");
    }
    Ok(())
}

pub fn execute_drop_columns(args: &DropColumnsArgs) -> Result<()> {
    let mut table = read_table(&args.input, &args.input_options)?;
    let original = table.headers().len();
    let removed = table.drop_columns(&args.columns);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_drop_output(&args.input));
    let options = write_options(Some(output.as_path()), &args.output_options)?;
    table
        .write(&output, &options)
        .with_context(|| format!("Writing {:?}", output))?;
    info!(
        "Removed {removed} of {original} column(s); {} remaining -> {:?}",
        table.headers().len(),
        output
    );
    info!("Remaining columns: {}", table.headers().iter().join(", "));
    Ok(())
}

fn read_table(path: &Path, options: &crate::cli::InputOptions) -> Result<RawTable> {
    let read = read_options(options)?;
    RawTable::read(path, &read).with_context(|| format!("Reading {path:?}"))
}

/// Rows whose `column` cell is non-blank, in input order.
pub fn rows_with_value(table: &RawTable, column: &str) -> Result<Vec<Vec<String>>, NormalizeError> {
    let idx = table.require_column(column)?;
    Ok(table
        .rows()
        .iter()
        .filter(|row| !row[idx].trim().is_empty())
        .cloned()
        .collect())
}

/// Distinct non-blank values of `column` in first-seen order.
pub fn unique_values(table: &RawTable, column: &str) -> Result<Vec<String>, NormalizeError> {
    let idx = table.require_column(column)?;
    Ok(table
        .rows()
        .iter()
        .map(|row| row[idx].trim())
        .filter(|value| !value.is_empty())
        .unique()
        .map(str::to_string)
        .collect())
}

/// `leads.csv` becomes `leads_filtered.csv` next to the input.
pub fn default_drop_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    input.with_file_name(format!("{stem}_filtered.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> RawTable {
        RawTable::new(
            "leads.csv",
            strings(&["Name", "Phone", "State"]),
            vec![
                strings(&["Ann", "5551112222", "Ohio"]),
                strings(&["Bob", " ", "Texas"]),
                strings(&["Cy", "5553334444", "Ohio"]),
                strings(&["Dee", "", ""]),
            ],
        )
    }

    #[test]
    fn rows_with_value_skips_blank_cells() {
        let rows = rows_with_value(&sample(), "Phone").expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Cy");
        assert!(matches!(
            rows_with_value(&sample(), "Mobile"),
            Err(NormalizeError::MissingColumn { .. })
        ));
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        assert_eq!(
            unique_values(&sample(), "State").expect("unique"),
            strings(&["Ohio", "Texas"])
        );
    }

    #[test]
    fn default_drop_output_appends_suffix() {
        assert_eq!(
            default_drop_output(Path::new("data/leads.csv")),
            PathBuf::from("data/leads_filtered.csv")
        );
        assert_eq!(
            default_drop_output(Path::new("export")),
            PathBuf::from("export_filtered.csv")
        );
    }
}

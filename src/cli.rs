use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Normalize lead/contact CSV exports into one canonical schema",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Combine a directory (or single file) of exports into one canonical CSV
    Normalize(NormalizeArgs),
    /// Fan phone columns out into one row per phone number
    Expand(ExpandArgs),
    /// Keep only rows in the target states, mapping names to postal codes
    FilterStates(FilterStatesArgs),
    /// Count rows that have a phone value
    CountPhones(PhoneColumnArgs),
    /// Show rows that have a phone value as a table
    Phones(PhonesArgs),
    /// List distinct values of a column
    Unique(UniqueArgs),
    /// Remove columns from a CSV file
    DropColumns(DropColumnsArgs),
}

/// Options shared by every command that reads CSV input.
#[derive(Debug, Clone, Args)]
pub struct InputOptions {
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file(s) (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct OutputOptions {
    /// Delimiter to use for output (defaults to ',' or the output extension)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding for the output file (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Directory of CSV exports, or a single CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Combined canonical CSV to write (`-` for stdout)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Keep only rows in the target states, rewriting state names to codes
    #[arg(long = "state-filter")]
    pub state_filter: bool,
    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
    #[command(flatten)]
    pub input_options: InputOptions,
    #[command(flatten)]
    pub output_options: OutputOptions,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (`-` for stdout)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Header for the single phone column in the output
    #[arg(long = "phone-header", default_value = "Phone")]
    pub phone_header: String,
    #[command(flatten)]
    pub input_options: InputOptions,
    #[command(flatten)]
    pub output_options: OutputOptions,
}

#[derive(Debug, Args)]
pub struct FilterStatesArgs {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (may be the same as the input)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Column holding state names or codes
    #[arg(short = 'c', long = "column", default_value = "State")]
    pub column: String,
    #[command(flatten)]
    pub input_options: InputOptions,
    #[command(flatten)]
    pub output_options: OutputOptions,
}

#[derive(Debug, Args)]
pub struct PhoneColumnArgs {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Column holding phone numbers
    #[arg(short = 'c', long = "column", default_value = "Phone")]
    pub column: String,
    #[command(flatten)]
    pub input_options: InputOptions,
}

#[derive(Debug, Args)]
pub struct PhonesArgs {
    #[command(flatten)]
    pub target: PhoneColumnArgs,
    /// Maximum number of rows to display (0 = all)
    #[arg(long, default_value_t = 0)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct UniqueArgs {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Column to list distinct values for
    #[arg(short = 'c', long = "column", default_value = "State")]
    pub column: String,
    #[command(flatten)]
    pub input_options: InputOptions,
}

#[derive(Debug, Args)]
pub struct DropColumnsArgs {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (defaults to `<input stem>_filtered.csv`)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Comma-separated list of columns to remove
    #[arg(
        short = 'C',
        long = "columns",
        value_delimiter = ',',
        required = true,
        action = clap::ArgAction::Append
    )]
    pub columns: Vec<String>,
    #[command(flatten)]
    pub input_options: InputOptions,
    #[command(flatten)]
    pub output_options: OutputOptions,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "," | "comma" => Ok(b','),
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        ";" | "semicolon" => Ok(b';'),
        "|" | "pipe" => Ok(b'|'),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
                _ => Err(format!(
                    "Unsupported delimiter '{other}'. Use a single ASCII character, 'tab', 'comma', 'semicolon' or 'pipe'."
                )),
            }
        }
    }
}

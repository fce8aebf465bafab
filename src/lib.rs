pub mod batch;
pub mod cli;
pub mod error;
pub mod expand;
pub mod fields;
pub mod frame;
pub mod io_utils;
pub mod normalize;
pub mod project;
pub mod states;
pub mod table;
pub mod tools;
pub mod values;

use std::{env, path::Path, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::{
    cli::{Cli, Commands, InputOptions, OutputOptions},
    io_utils::{ReadOptions, WriteOptions},
};

pub use crate::{
    batch::{BatchOptions, BatchSummary},
    error::NormalizeError,
    fields::{CanonicalField, FieldMatcher, Target},
    project::CanonicalRecord,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("lead_normalizer", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Normalize(args) => normalize::execute(&args),
        Commands::Expand(args) => tools::execute_expand(&args),
        Commands::FilterStates(args) => tools::execute_filter_states(&args),
        Commands::CountPhones(args) => tools::execute_count_phones(&args),
        Commands::Phones(args) => tools::execute_phones(&args),
        Commands::Unique(args) => tools::execute_unique(&args),
        Commands::DropColumns(args) => tools::execute_drop_columns(&args),
    }
}

pub(crate) fn read_options(options: &InputOptions) -> Result<ReadOptions> {
    Ok(ReadOptions {
        delimiter: options.delimiter,
        encoding: io_utils::resolve_encoding(options.input_encoding.as_deref())?,
    })
}

pub(crate) fn write_options(output: Option<&Path>, options: &OutputOptions) -> Result<WriteOptions> {
    Ok(WriteOptions {
        delimiter: io_utils::resolve_output_delimiter(
            output,
            options.output_delimiter,
            io_utils::DEFAULT_CSV_DELIMITER,
        ),
        encoding: io_utils::resolve_encoding(options.output_encoding.as_deref())?,
    })
}

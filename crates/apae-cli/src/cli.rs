//! CLI argument definitions for the assistido SQL converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "apae-sql",
    version,
    about = "Convert the APAE assistido spreadsheet export into a SQL INSERT script",
    long_about = "Convert the APAE social-support spreadsheet (CSV export) into a\n\
                  transactional SQL script for the `assistido` table.\n\n\
                  Dates, CPF, sex, status, medication and city are normalized;\n\
                  problems are reported inside the script and on the terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (names, CPF, dates) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a spreadsheet export into an INSERT script.
    Convert(ConvertArgs),

    /// List the cities of an export and whether the lookup table knows them.
    Cities(CitiesArgs),

    /// List the destination columns and the headers that feed them.
    Columns,
}

/// Options shared by every command that reads an export.
#[derive(Parser)]
pub struct InputArgs {
    /// CSV export, or a directory holding exactly one.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// City lookup table (CSV with `municipio` and `id` columns).
    ///
    /// Falls back to the APAE_CITY_TABLE environment variable, then to the
    /// embedded table.
    #[arg(long = "cities", value_name = "PATH")]
    pub cities: Option<PathBuf>,

    /// Number of lines before the header row (detected when omitted).
    #[arg(long = "skip-rows", value_name = "N")]
    pub skip_rows: Option<usize>,

    /// Field delimiter (detected from the header line when omitted).
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// State assumed when the city cell carries no `/UF` suffix.
    #[arg(long = "default-state", value_name = "UF", default_value = "RS")]
    pub default_state: String,
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Script path (default: assistidos_da_planilha.sql next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Convert and report without writing the script.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CitiesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only list cities missing from the lookup table.
    #[arg(long = "unmapped")]
    pub unmapped: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

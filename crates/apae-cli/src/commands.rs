use anyhow::{Context, Result, bail};
use apae_cli::convert::{
    ConvertRequest, ConvertResult, default_read_options, load_cities, run_conversion,
};
use apae_cli::logging::redact_value;
use apae_ingest::{ReadOptions, read_records, resolve_input};
use apae_model::{Column, ConversionOptions};
use apae_transform::{audit_cities, fields};
use chrono::Local;
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{debug, info_span};

use crate::cli::{CitiesArgs, ConvertArgs, InputArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let mut request = ConvertRequest::new(&args.input.input, Local::now().naive_local());
    request.output = args.output.clone();
    request.cities = args.input.cities.clone();
    request.read = read_options(&args.input)?;
    request.options = conversion_options(&args.input);
    request.dry_run = args.dry_run;
    run_conversion(&request)
}

pub fn run_cities(args: &CitiesArgs) -> Result<()> {
    let input = resolve_input(&args.input.input)
        .with_context(|| format!("resolve input {}", args.input.input.display()))?;
    let span = info_span!("cities", input = %input.display());
    let _guard = span.enter();

    let cities = load_cities(args.input.cities.as_deref())?;
    let table = read_records(&input, &read_options(&args.input)?)
        .with_context(|| format!("read {}", input.display()))?;
    let audit = audit_cities(&table.records, &cities, &conversion_options(&args.input));

    let mut output = Table::new();
    output.set_header(vec![
        header_cell("City"),
        header_cell("UF"),
        header_cell("Municipality id"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut output);
    align_column(&mut output, 3, CellAlignment::Right);
    let mut unmapped = 0usize;
    for entry in &audit {
        debug!(
            city = redact_value(&entry.location.city),
            mapped = entry.is_mapped(),
            "city audited"
        );
        if !entry.is_mapped() {
            unmapped += 1;
        } else if args.unmapped {
            continue;
        }
        let id = match &entry.id {
            Some(id) => Cell::new(id),
            None => dim_cell("unmapped"),
        };
        output.add_row(vec![
            Cell::new(&entry.location.city),
            Cell::new(&entry.location.state),
            id,
            Cell::new(entry.rows),
        ]);
    }
    println!("{output}");
    println!("{} cities, {unmapped} not in the lookup table", audit.len());
    Ok(())
}

pub fn run_columns() {
    let options = ConversionOptions::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Description"),
        header_cell("Source headers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (position, column) in options.table.columns().iter().enumerate() {
        let sources = match fields::source_aliases(*column) {
            Some(aliases) => Cell::new(aliases.join(", ")),
            None => dim_cell(source_note(*column)),
        };
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(column.sql_name()),
            Cell::new(column.description()),
            sources,
        ]);
    }
    println!("Table: {}", options.table.name());
    println!("{table}");
}

fn source_note(column: Column) -> &'static str {
    match column {
        Column::Id => "generated by the database",
        Column::Notes => "assembled from the remaining columns",
        _ => "-",
    }
}

fn read_options(args: &InputArgs) -> Result<ReadOptions> {
    let mut options = default_read_options();
    if let Some(skip_rows) = args.skip_rows {
        options = options.with_skip_rows(skip_rows);
    }
    if let Some(delimiter) = args.delimiter {
        let Ok(byte) = u8::try_from(delimiter) else {
            bail!("delimiter must be a single ASCII character, got '{delimiter}'");
        };
        if !byte.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{delimiter}'");
        }
        options = options.with_delimiter(byte);
    }
    Ok(options)
}

fn conversion_options(args: &InputArgs) -> ConversionOptions {
    ConversionOptions::default().with_default_state(args.default_state.trim().to_uppercase())
}

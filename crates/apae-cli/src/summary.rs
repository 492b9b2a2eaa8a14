use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use apae_cli::convert::ConvertResult;
use apae_model::DEFAULT_WARNING_LIMIT;

pub fn print_summary(result: &ConvertResult) {
    println!("Input: {} ({})", result.input.display(), result.encoding);
    if result.written {
        println!("Output: {}", result.output.display());
    } else {
        println!("Output: {} (dry run, not written)", result.output.display());
    }

    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Read"), Cell::new(result.records_read)]);
    table.add_row(vec![
        Cell::new("Converted").add_attribute(Attribute::Bold),
        Cell::new(report.converted()).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Blank (no name)"), dim_cell(report.blank())]);
    table.add_row(vec![
        Cell::new("Skipped"),
        count_cell(report.skipped(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(report.warning_count(), Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Distinct cities"), Cell::new(result.cities)]);
    println!("{table}");

    let summary = report.summary(DEFAULT_WARNING_LIMIT);
    if summary.shown.is_empty() {
        return;
    }
    println!("Warnings:");
    for (position, message) in summary.shown.iter().enumerate() {
        println!("  {}. {message}", position + 1);
    }
    if summary.remaining > 0 {
        println!("  ... and {} more warnings (see the script header)", summary.remaining);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

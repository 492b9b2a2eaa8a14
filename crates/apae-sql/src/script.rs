//! Full script assembly.

use std::fmt::Write;

use apae_model::{ConversionReport, DEFAULT_WARNING_LIMIT, OutputRow, TargetTable};
use chrono::NaiveDateTime;

use crate::comment::push_comment;
use crate::diagnostics::render_diagnostics;
use crate::footer::render_verification;

/// Indentation of column names and tuple values.
const INDENT: &str = "    ";

/// Marker left in place of the insert when nothing was converted.
pub const NO_RECORDS_MARKER: &str = "-- NO VALID RECORDS FOUND";

/// What goes into a script.
#[derive(Debug, Clone, Copy)]
pub struct ScriptInput<'a> {
    pub table: &'a TargetTable,
    pub rows: &'a [OutputRow],
    pub report: &'a ConversionReport,
    /// City/state labels listed in the header comment block.
    pub cities: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOptions {
    pub generated_at: NaiveDateTime,
    /// Input file name shown in the header.
    pub source: Option<String>,
    pub warning_limit: usize,
}

impl ScriptOptions {
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self {
            generated_at,
            source: None,
            warning_limit: DEFAULT_WARNING_LIMIT,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_warning_limit(mut self, limit: usize) -> Self {
        self.warning_limit = limit;
        self
    }
}

/// Renders the whole migration script.
///
/// With rows: header, `BEGIN;`, cities block, one multi-row `INSERT`,
/// `COMMIT;`, verification queries, processing report. Without rows the
/// insert is replaced by a marker and `ROLLBACK;`.
pub fn render_script(input: ScriptInput<'_>, options: &ScriptOptions) -> String {
    let mut out = render_header(options);
    out.push_str("BEGIN;\n\n");

    if input.rows.is_empty() {
        out.push_str(NO_RECORDS_MARKER);
        out.push_str("\nROLLBACK;\n\n");
    } else {
        if !input.cities.is_empty() {
            push_comment(&mut out, "Cities found in the spreadsheet:");
            for city in input.cities {
                push_comment(&mut out, city);
            }
            out.push('\n');
        }
        out.push_str(&render_insert(input.table, input.rows));
        out.push_str("\nCOMMIT;\n\n");
        out.push_str(&render_verification(input.table, input.rows.len()));
        out.push('\n');
    }

    out.push_str(&render_diagnostics(
        &input.report.summary(options.warning_limit),
    ));
    out
}

fn render_header(options: &ScriptOptions) -> String {
    let mut out = String::new();
    push_comment(&mut out, "SQL script generated from the APAE spreadsheet export");
    push_comment(&mut out, "IMPORTANT: run it against a test database first!");
    if let Some(source) = &options.source {
        push_comment(&mut out, &format!("Source: {source}"));
    }
    push_comment(
        &mut out,
        &format!(
            "Generated at: {}",
            options.generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
    );
    out.push('\n');
    out
}

/// `INSERT INTO table (cols) VALUES` with one tuple per row.
pub fn render_insert(table: &TargetTable, rows: &[OutputRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "INSERT INTO {} (", table.name());
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|column| format!("{INDENT}{column}"))
        .collect();
    out.push_str(&columns.join(",\n"));
    out.push_str("\n) VALUES\n");

    let tuples: Vec<String> = rows.iter().map(render_tuple).collect();
    out.push_str(&tuples.join(",\n"));
    out.push_str(";\n");
    out
}

/// One parenthesized tuple, a value per line.
pub fn render_tuple(row: &OutputRow) -> String {
    let values: Vec<String> = row
        .values()
        .iter()
        .map(|value| format!("{INDENT}{value}"))
        .collect();
    format!("(\n{}\n)", values.join(",\n"))
}

#[cfg(test)]
mod tests {
    use apae_model::{Column, NormalizedField, SqlLiteral};

    use super::*;

    fn small_table() -> TargetTable {
        TargetTable::new("assistido", vec![Column::Id, Column::Name]).unwrap()
    }

    #[test]
    fn tuple_layout() {
        let table = small_table();
        let row = OutputRow::new(
            0,
            vec![
                SqlLiteral::GeneratedId.into(),
                SqlLiteral::text("D'ÁVILA").into(),
            ],
            &table,
        )
        .unwrap();
        assert_eq!(render_tuple(&row), "(\n    gen_random_uuid(),\n    'D''ÁVILA'\n)");
    }

    #[test]
    fn insert_joins_tuples() {
        let table = small_table();
        let rows: Vec<OutputRow> = (0..2)
            .map(|index| {
                OutputRow::new(
                    index,
                    vec![SqlLiteral::GeneratedId.into(), NormalizedField::Null],
                    &table,
                )
                .unwrap()
            })
            .collect();
        let insert = render_insert(&table, &rows);
        assert!(insert.starts_with("INSERT INTO assistido (\n    id,\n    nome\n) VALUES\n(\n"));
        assert!(insert.contains("\n),\n(\n"));
        assert!(insert.ends_with("    null\n);\n"));
    }
}

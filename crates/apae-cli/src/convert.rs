//! The `convert` workflow: read, transform, render, write.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use apae_ingest::{ReadOptions, default_city_table, load_city_table, read_records, resolve_input};
use apae_model::{CityLookupTable, ConversionOptions, ConversionReport};
use apae_sql::{ScriptInput, ScriptOptions, render_script, write_script};
use apae_transform::{ConversionPipeline, fields};
use chrono::NaiveDateTime;
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;

/// File name of the script when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "assistidos_da_planilha.sql";

/// Environment variable naming a city table file.
pub const CITY_TABLE_ENV: &str = "APAE_CITY_TABLE";

/// Everything a conversion run needs.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// CSV file, or a directory holding exactly one.
    pub input: PathBuf,
    /// Script path; next to the input when unset.
    pub output: Option<PathBuf>,
    /// City table file; falls back to `APAE_CITY_TABLE`, then the embedded table.
    pub cities: Option<PathBuf>,
    pub read: ReadOptions,
    pub options: ConversionOptions,
    /// Render and report without writing the script.
    pub dry_run: bool,
    pub generated_at: NaiveDateTime,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>, generated_at: NaiveDateTime) -> Self {
        Self {
            input: input.into(),
            output: None,
            cities: None,
            read: default_read_options(),
            options: ConversionOptions::default(),
            dry_run: false,
            generated_at,
        }
    }
}

/// Outcome of a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: &'static str,
    pub records_read: usize,
    pub report: ConversionReport,
    /// Distinct cities among converted rows.
    pub cities: usize,
    /// False on dry runs.
    pub written: bool,
}

/// Read options with header detection keyed on the name column.
pub fn default_read_options() -> ReadOptions {
    ReadOptions::default().with_header_markers(fields::NAME.iter().copied())
}

/// Script path for `input`: `assistidos_da_planilha.sql` in its directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME), |dir| dir.join(DEFAULT_OUTPUT_NAME))
}

/// Loads the city table: explicit path, then `APAE_CITY_TABLE`, then the
/// embedded default.
pub fn load_cities(path: Option<&Path>) -> Result<CityLookupTable> {
    let from_env = std::env::var_os(CITY_TABLE_ENV).map(PathBuf::from);
    match path.map(Path::to_path_buf).or(from_env) {
        Some(path) => load_city_table(&path)
            .with_context(|| format!("load city table {}", path.display())),
        None => default_city_table().context("load embedded city table"),
    }
}

/// Runs a full conversion.
///
/// The script is rendered in memory and written in one step; any hardfail
/// before that leaves the output path untouched.
pub fn run_conversion(request: &ConvertRequest) -> Result<ConvertResult> {
    let input = resolve_input(&request.input)
        .with_context(|| format!("resolve input {}", request.input.display()))?;
    let span = info_span!("convert_file", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let cities = load_cities(request.cities.as_deref())?;
    debug!(cities = cities.len(), "city table ready");

    let table = read_records(&input, &request.read)
        .with_context(|| format!("read {}", input.display()))?;
    let records_read = table.records.len();

    let pipeline = ConversionPipeline::new(cities, request.options.clone());
    let output = pipeline
        .run(&table.records)
        .with_context(|| format!("convert {}", input.display()))?;
    for warning in output.report.warnings() {
        let message = warning.to_string();
        trace!(row = warning.row, warning = redact_value(&message), "row warning");
    }

    let city_labels: Vec<String> = output.cities.iter().map(ToString::to_string).collect();
    let mut script_options = ScriptOptions::new(request.generated_at);
    if let Some(name) = input.file_name() {
        script_options = script_options.with_source(name.to_string_lossy());
    }
    let script = render_script(
        ScriptInput {
            table: &pipeline.options().table,
            rows: &output.rows,
            report: &output.report,
            cities: &city_labels,
        },
        &script_options,
    );

    let output_path = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input));
    if request.dry_run {
        info!(output = %output_path.display(), "dry run, script not written");
    } else {
        write_script(&script, &output_path)
            .with_context(|| format!("write {}", output_path.display()))?;
    }

    info!(
        records = records_read,
        converted = output.report.converted(),
        warnings = output.report.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "conversion finished"
    );

    Ok(ConvertResult {
        input,
        output: output_path,
        encoding: table.encoding,
        records_read,
        cities: city_labels.len(),
        report: output.report,
        written: !request.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/dados/b1.csv")),
            PathBuf::from("/dados/assistidos_da_planilha.sql")
        );
        assert_eq!(
            default_output_path(Path::new("b1.csv")),
            PathBuf::from("assistidos_da_planilha.sql")
        );
    }

    #[test]
    fn test_default_read_options_use_name_aliases() {
        let options = default_read_options();
        assert_eq!(options.header_markers, vec!["Nome", "nome"]);
    }
}

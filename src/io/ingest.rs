//! Reference dataset ingest.
//!
//! This module turns a churn CSV into a typed [`Table`], or reads just its
//! header when only column order is needed.
//!
//! - **Strict schema**: the header must be a permutation of the fixed column
//!   set (missing, unknown or duplicate columns are a schema mismatch)
//! - **Typed cells**: integer columns parse as numbers, flags accept
//!   `True/False/1/0`, categorical cells stay as trimmed text
//! - **Empty cells** become `Value::Missing`; what happens to them is decided
//!   by the codec's imputation policy, not here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Column, ColumnKind, Schema, Table, Value};
use crate::error::PipelineError;

/// Read only the header of a CSV file and validate it as a schema.
pub fn read_schema(path: &Path) -> Result<Schema, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = csv_reader(file);
    let headers = reader.headers()?.clone();
    schema_from_headers(&headers)
}

/// Load a full CSV file.
pub fn read_table(path: &Path) -> Result<Table, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let table = read_table_from(file)?;
    tracing::info!(path = %path.display(), rows = table.len(), "loaded reference dataset");
    Ok(table)
}

/// Load CSV data from any reader (file, in-memory export, ...).
pub fn read_table_from<R: Read>(reader: R) -> Result<Table, PipelineError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let schema = schema_from_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // +2: records start after the header and lines are 1-based.
        let line = record
            .position()
            .map_or(idx + 2, |p| p.line() as usize);
        rows.push(parse_row(&record, &schema, line)?);
    }

    Ok(Table::new(schema, rows))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn schema_from_headers(headers: &StringRecord) -> Result<Schema, PipelineError> {
    let names: Vec<&str> = headers.iter().map(normalize_header_name).collect();
    Schema::from_headers(&names)
}

fn normalize_header_name(name: &str) -> &str {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}')
}

fn parse_row(record: &StringRecord, schema: &Schema, line: usize) -> Result<Vec<Value>, PipelineError> {
    schema
        .columns()
        .iter()
        .enumerate()
        .map(|(j, &column)| parse_cell(column, record.get(j).unwrap_or(""), line))
        .collect()
}

fn parse_cell(column: Column, raw: &str, line: usize) -> Result<Value, PipelineError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Value::Missing);
    }

    let invalid = || PipelineError::InvalidValue {
        column: column.name().to_string(),
        line,
        value: raw.to_string(),
    };

    match column.kind() {
        ColumnKind::Categorical => Ok(Value::Text(raw.to_string())),
        ColumnKind::Integer => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Number)
            .ok_or_else(invalid),
        ColumnKind::Flag => parse_flag(raw).map(Value::Flag).ok_or_else(invalid),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    match raw.parse::<f64>() {
        Ok(v) if v == 1.0 => Some(true),
        Ok(v) if v == 0.0 => Some(false),
        _ => None,
    }
}

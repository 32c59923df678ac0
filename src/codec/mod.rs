//! Categorical codec: label ↔ code conversion for the fixed schema.
//!
//! `encode` turns a typed [`Table`] into a fully numeric [`NumericTable`]:
//! categorical labels become codes, flags become 1/0, integer columns pass
//! through. Values the mapping does not know are resolved by the column's
//! [`Imputation`] policy.
//!
//! `decode` is the inverse for categorical columns. Values are rounded
//! half-to-even (matching how the training data was rounded) and must land on
//! a known code; anything else, NaN included, is a `Decode` error.

use nalgebra::DMatrix;

use crate::domain::{Column, ColumnKind, NumericTable, Table, Value};
use crate::error::PipelineError;

pub mod mapping;

pub use mapping::*;

/// Encode every column of `table` into numeric form.
pub fn encode(table: &Table) -> Result<NumericTable, PipelineError> {
    let nrows = table.len();
    let columns = table.schema.columns();
    let mut values = DMatrix::<f64>::zeros(nrows, columns.len());

    for (j, &column) in columns.iter().enumerate() {
        let encoded = match mapping_for(column) {
            Some(mapping) => encode_categorical(table, j, column, mapping)?,
            None => encode_numeric(table, j, column)?,
        };
        values.set_column(j, &nalgebra::DVector::from_vec(encoded));
    }

    NumericTable::new(table.schema.clone(), values)
}

fn encode_categorical(
    table: &Table,
    j: usize,
    column: Column,
    mapping: &CategoricalMapping,
) -> Result<Vec<f64>, PipelineError> {
    let codes: Vec<Option<f64>> = table
        .rows
        .iter()
        .map(|row| match &row[j] {
            Value::Text(label) => mapping.code(label.trim()).map(|c| c as f64),
            _ => None,
        })
        .collect();

    let unresolved = codes.iter().filter(|c| c.is_none()).count();
    if unresolved == 0 {
        return Ok(codes.into_iter().flatten().collect());
    }

    match imputation_for(column) {
        Imputation::MeanOfEncoded => {
            let known: Vec<f64> = codes.iter().flatten().copied().collect();
            let fill = if known.is_empty() {
                tracing::warn!(column = %column, "no encodable values; imputing code 0");
                0.0
            } else {
                known.iter().sum::<f64>() / known.len() as f64
            };
            tracing::debug!(column = %column, unresolved, fill, "imputed unmapped values");
            Ok(codes.into_iter().map(|c| c.unwrap_or(fill)).collect())
        }
        Imputation::Reject => {
            let row = codes.iter().position(Option::is_none).unwrap_or_default();
            Err(invalid_value(column, row, &table.rows[row][j]))
        }
    }
}

fn encode_numeric(table: &Table, j: usize, column: Column) -> Result<Vec<f64>, PipelineError> {
    let mut out = Vec::with_capacity(table.len());
    for (i, row) in table.rows.iter().enumerate() {
        match row[j].as_f64().filter(|v| v.is_finite()) {
            Some(v) => out.push(v),
            None => return Err(invalid_value(column, i, &row[j])),
        }
    }
    Ok(out)
}

// Row indices are reported as 1-based file lines (header is line 1).
fn invalid_value(column: Column, row: usize, value: &Value) -> PipelineError {
    PipelineError::InvalidValue {
        column: column.name().to_string(),
        line: row + 2,
        value: value.to_string(),
    }
}

/// Decode one categorical code back to its label.
pub fn decode_label(column: Column, value: f64) -> Result<&'static str, PipelineError> {
    let decode_err = || PipelineError::Decode {
        column: column.name().to_string(),
        value,
    };
    let mapping = mapping_for(column).ok_or_else(decode_err)?;
    if !value.is_finite() {
        return Err(decode_err());
    }
    mapping
        .label(value.round_ties_even() as i64)
        .ok_or_else(decode_err)
}

/// Decode the categorical columns of `numeric`; other columns are returned
/// as plain numbers.
pub fn decode(numeric: &NumericTable) -> Result<Table, PipelineError> {
    let columns = numeric.schema.columns();
    let mut rows = Vec::with_capacity(numeric.nrows());
    for row in numeric.values.row_iter() {
        let mut out = Vec::with_capacity(columns.len());
        for (&column, &v) in columns.iter().zip(row.iter()) {
            let cell = match column.kind() {
                ColumnKind::Categorical => Value::Text(decode_label(column, v)?.to_string()),
                ColumnKind::Integer | ColumnKind::Flag => Value::Number(v),
            };
            out.push(cell);
        }
        rows.push(out);
    }
    Ok(Table::new(numeric.schema.clone(), rows))
}

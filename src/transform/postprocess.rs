//! Model output (already unscaled) → human-readable table.
//!
//! Categorical columns go back through the codec. Integer columns are
//! rounded, flag columns become booleans (`round(v) != 0`). A non-finite
//! value in any column is a decode error rather than a silent cast.

use crate::codec;
use crate::domain::{Column, ColumnKind, NumericTable, Table, Value};
use crate::error::PipelineError;

pub fn postprocess(numeric: &NumericTable) -> Result<Table, PipelineError> {
    let mut table = codec::decode(numeric)?;
    let columns: Vec<Column> = table.schema.columns().to_vec();

    for row in &mut table.rows {
        for (cell, &column) in row.iter_mut().zip(&columns) {
            let Value::Number(v) = *cell else {
                continue;
            };
            *cell = cast(column, v)?;
        }
    }

    Ok(table)
}

fn cast(column: Column, value: f64) -> Result<Value, PipelineError> {
    let decode_err = || PipelineError::Decode {
        column: column.name().to_string(),
        value,
    };
    if !value.is_finite() {
        return Err(decode_err());
    }
    let rounded = value.round_ties_even();
    Ok(match column.kind() {
        // 2^63 itself is out of range, hence the strict upper bound.
        ColumnKind::Integer if !(i64::MIN as f64..i64::MAX as f64).contains(&rounded) => {
            return Err(decode_err());
        }
        ColumnKind::Integer => Value::Integer(rounded as i64),
        ColumnKind::Flag => Value::Flag(rounded != 0.0),
        ColumnKind::Categorical => Value::Number(value),
    })
}

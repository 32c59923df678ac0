//! Raw table → model input.

use nalgebra::DMatrix;

use crate::codec;
use crate::domain::{NumericTable, Table};
use crate::error::PipelineError;
use crate::math::Normalizer;

/// Output of [`preprocess`]: the encoded table, its scaled form, and the
/// normalizer fitted on it.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub encoded: NumericTable,
    pub scaled: DMatrix<f64>,
    pub normalizer: Normalizer,
}

/// Encode categorical columns, then fit a min-max normalizer over every
/// column of the encoded table and scale it to [0, 1].
pub fn preprocess(table: &Table) -> Result<Preprocessed, PipelineError> {
    if table.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let encoded = codec::encode(table)?;
    let mut normalizer = Normalizer::new();
    let scaled = normalizer.fit_transform(&encoded.values)?;

    tracing::info!(
        rows = encoded.nrows(),
        columns = encoded.schema.width(),
        "preprocessed dataset"
    );

    Ok(Preprocessed {
        encoded,
        scaled,
        normalizer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, Schema, Value};
    use crate::testing::sample_table;

    #[test]
    fn scaled_values_are_bounded_and_constant_columns_are_zero() {
        let table = sample_table();
        let out = preprocess(&table).unwrap();

        assert_eq!(out.scaled.shape(), (table.len(), Column::ALL.len()));
        assert!(out.scaled.iter().all(|v| (0.0..=1.0).contains(v)));

        // StreamingMovies is "Yes" in every sample row.
        let j = table.schema.position(Column::StreamingMovies).unwrap();
        assert!(out.scaled.column(j).iter().all(|v| *v == 0.0));
        assert!(out.normalizer.is_fitted());
        assert_eq!(out.normalizer.width(), Some(Column::ALL.len()));
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = Table::new(Schema::canonical(), Vec::new());
        assert!(matches!(preprocess(&table), Err(PipelineError::EmptyDataset)));
    }

    #[test]
    fn failed_preprocess_does_not_poison_a_retry() {
        let mut table = sample_table();
        let good = table.clone();
        let j = table.schema.position(Column::Tenure).unwrap();
        table.rows[1][j] = Value::Missing;

        assert!(matches!(preprocess(&table), Err(PipelineError::InvalidValue { .. })));
        assert!(preprocess(&good).is_ok());
    }
}

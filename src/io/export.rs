//! Export generated tables to CSV.
//!
//! The format is what downstream spreadsheets and scripts consume, and what
//! `ingest` reads back: comma-delimited UTF-8, header row in schema order, no
//! index column. Flags are written `True`/`False`, integers without a decimal
//! point, labels verbatim.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Table;
use crate::error::PipelineError;

/// Default file name for exports.
pub const DEFAULT_EXPORT_NAME: &str = "generated_data.csv";

/// Serialize `table` as CSV into `writer`.
pub fn write_csv<W: Write>(writer: W, table: &Table) -> Result<(), PipelineError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.schema.names())?;
    for row in &table.rows {
        out.write_record(row.iter().map(ToString::to_string))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Serialize `table` as CSV bytes.
pub fn export_csv(table: &Table) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, table)?;
    Ok(buf)
}

/// Write `table` to a CSV file.
pub fn write_csv_file(path: &Path, table: &Table) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    write_csv(file, table)?;
    tracing::info!(path = %path.display(), rows = table.len(), "exported CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, Schema, Value};
    use crate::io::ingest::read_table_from;
    use crate::testing::sample_table;
    use crate::transform::preprocess;

    #[test]
    fn header_first_and_no_index_column() {
        let bytes = export_csv(&sample_table()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "CustomerID,Tenure,Contract,InternetService,PaymentMethod,OnlineSecurity,\
             TechSupport,StreamingTV,StreamingMovies,SeniorCitizen,PaperlessBilling,Churn"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,12,One year,DSL,Mailed check,Yes,No,No,Yes,False,True,False"
        );
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn decoded_values_are_written_in_their_semantic_form() {
        let schema = Schema::canonical();
        let row = vec![
            Value::Integer(42),
            Value::Integer(3),
            Value::Text("Month-to-month".into()),
            Value::Text("Fiber optic".into()),
            Value::Text("Bank transfer".into()),
            Value::Text("No".into()),
            Value::Text("No".into()),
            Value::Text("Yes".into()),
            Value::Text("Yes".into()),
            Value::Flag(true),
            Value::Flag(false),
            Value::Flag(true),
        ];
        let table = Table::new(schema, vec![row]);
        let text = String::from_utf8(export_csv(&table).unwrap()).unwrap();
        assert!(text.ends_with("42,3,Month-to-month,Fiber optic,Bank transfer,No,No,Yes,Yes,True,False,True\n"));
    }

    #[test]
    fn export_then_ingest_preserves_scaled_values() {
        let table = sample_table();
        let reloaded = read_table_from(export_csv(&table).unwrap().as_slice()).unwrap();

        let a = preprocess(&table).unwrap();
        let b = preprocess(&reloaded).unwrap();
        assert_eq!(a.scaled.shape(), b.scaled.shape());
        for (x, y) in a.scaled.iter().zip(b.scaled.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(reloaded.schema.position(Column::Churn), Some(11));
    }

    #[test]
    fn export_is_written_to_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        write_csv_file(&path, &sample_table()).unwrap();
        let reloaded = crate::io::ingest::read_table(&path).unwrap();
        assert_eq!(reloaded.len(), 6);
    }
}

//! Shared domain types.
//!
//! The dataset has one fixed schema (telecom churn customer records), so
//! columns are a closed enum rather than free-form strings. Column *order*
//! is still dynamic: it comes from the reference file's header and is carried
//! by [`Schema`] so that flat numeric rows can be re-attached to names.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::PipelineError;

/// Number of rows shown in a generation preview.
pub const PREVIEW_ROWS: usize = 5;

/// How a column is represented before encoding and after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Counts and identifiers; numeric on the way in, rounded to integers on the way out.
    Integer,
    /// Boolean flags; 1.0 / 0.0 numerically.
    Flag,
    /// String labels with a fixed code mapping.
    Categorical,
}

/// Every column of the churn schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    CustomerId,
    Tenure,
    Contract,
    InternetService,
    PaymentMethod,
    OnlineSecurity,
    TechSupport,
    StreamingTv,
    StreamingMovies,
    SeniorCitizen,
    PaperlessBilling,
    Churn,
}

impl Column {
    /// Canonical header order.
    pub const ALL: [Column; 12] = [
        Column::CustomerId,
        Column::Tenure,
        Column::Contract,
        Column::InternetService,
        Column::PaymentMethod,
        Column::OnlineSecurity,
        Column::TechSupport,
        Column::StreamingTv,
        Column::StreamingMovies,
        Column::SeniorCitizen,
        Column::PaperlessBilling,
        Column::Churn,
    ];

    /// Header name as it appears in CSV files.
    pub fn name(self) -> &'static str {
        match self {
            Column::CustomerId => "CustomerID",
            Column::Tenure => "Tenure",
            Column::Contract => "Contract",
            Column::InternetService => "InternetService",
            Column::PaymentMethod => "PaymentMethod",
            Column::OnlineSecurity => "OnlineSecurity",
            Column::TechSupport => "TechSupport",
            Column::StreamingTv => "StreamingTV",
            Column::StreamingMovies => "StreamingMovies",
            Column::SeniorCitizen => "SeniorCitizen",
            Column::PaperlessBilling => "PaperlessBilling",
            Column::Churn => "Churn",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::CustomerId | Column::Tenure => ColumnKind::Integer,
            Column::SeniorCitizen | Column::PaperlessBilling | Column::Churn => ColumnKind::Flag,
            Column::Contract
            | Column::InternetService
            | Column::PaymentMethod
            | Column::OnlineSecurity
            | Column::TechSupport
            | Column::StreamingTv
            | Column::StreamingMovies => ColumnKind::Categorical,
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of columns; each schema column appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Schema in canonical header order.
    pub fn canonical() -> Self {
        Self {
            columns: Column::ALL.to_vec(),
        }
    }

    /// Build a schema from header names, validating that it is a permutation
    /// of the fixed column set.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, PipelineError> {
        let mut columns = Vec::with_capacity(headers.len());
        for header in headers {
            let name = header.as_ref();
            let column = Column::from_name(name)
                .ok_or_else(|| PipelineError::SchemaMismatch(format!("unexpected column `{name}`")))?;
            if columns.contains(&column) {
                return Err(PipelineError::SchemaMismatch(format!("duplicate column `{name}`")));
            }
            columns.push(column);
        }
        Self::from_columns(columns)
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self, PipelineError> {
        let missing: Vec<&str> = Column::ALL
            .iter()
            .filter(|c| !columns.contains(c))
            .map(|c| c.name())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::SchemaMismatch(format!(
                "missing expected column(s): {}",
                missing.join(", ")
            )));
        }
        if columns.len() != Column::ALL.len() {
            return Err(PipelineError::SchemaMismatch("duplicate columns in schema".to_string()));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }
}

/// One cell of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
    Missing,
}

impl Value {
    /// Numeric view used by the encoder for integer and flag columns.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            Value::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(_) | Value::Missing => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Flag(true) => f.write_str("True"),
            Value::Flag(false) => f.write_str("False"),
            Value::Missing => Ok(()),
        }
    }
}

/// Labeled rows of typed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows (or fewer).
    pub fn head(&self, n: usize) -> Table {
        Table {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Fully numeric view of a table: one matrix column per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    pub schema: Schema,
    pub values: DMatrix<f64>,
}

impl NumericTable {
    pub fn new(schema: Schema, values: DMatrix<f64>) -> Result<Self, PipelineError> {
        if values.ncols() != schema.width() {
            return Err(PipelineError::SchemaMismatch(format!(
                "numeric data has {} columns, schema has {}",
                values.ncols(),
                schema.width()
            )));
        }
        Ok(Self { schema, values })
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_accepts_any_permutation() {
        let mut names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        names.reverse();
        let schema = Schema::from_headers(&names).unwrap();
        assert_eq!(schema.names(), names);
        assert_eq!(schema.position(Column::Churn), Some(0));
    }

    #[test]
    fn schema_rejects_missing_unknown_and_duplicate_columns() {
        let names: Vec<&str> = Column::ALL.iter().take(11).map(|c| c.name()).collect();
        let err = Schema::from_headers(&names).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch(ref m) if m.contains("Churn")));

        let mut names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        names.push("gender");
        assert!(matches!(
            Schema::from_headers(&names),
            Err(PipelineError::SchemaMismatch(_))
        ));

        let mut names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        names.push("Tenure");
        assert!(matches!(
            Schema::from_headers(&names),
            Err(PipelineError::SchemaMismatch(m)) if m.contains("duplicate")
        ));
    }

    #[test]
    fn flags_display_like_pandas_booleans() {
        assert_eq!(Value::Flag(true).to_string(), "True");
        assert_eq!(Value::Flag(false).to_string(), "False");
        assert_eq!(Value::Missing.to_string(), "");
    }
}

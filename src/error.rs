//! Error types.
//!
//! Library code returns [`PipelineError`]. The binary converts it into an
//! [`AppError`], which carries the process exit code:
//!
//! - `2`: bad input (paths, schema, cell values, options)
//! - `3`: nothing to work on (empty dataset, nothing generated yet)
//! - `4`: computation failures (decode, sequencing, generator shape)

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the preprocessing / generation / export pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reference or input table does not carry the expected columns.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A numeric value could not be mapped back to its column's representation.
    #[error("cannot decode value {value} in column `{column}`")]
    Decode { column: String, value: f64 },

    /// Generation was requested before the normalizer was fit.
    #[error("normalizer has not been fit; preprocess reference data before generating")]
    Precomposition,

    /// Export was requested before anything was generated.
    #[error("nothing to export yet: generate data first")]
    EmptyResult,

    /// Dataset has no rows to fit or train on.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// A cell could not be parsed (or was missing) for a column that does not impute.
    #[error("invalid value '{value}' in column `{column}` (line {line})")]
    InvalidValue {
        column: String,
        line: usize,
        value: String,
    },

    /// A data directory held no CSV files.
    #[error("no CSV files found in {}", dir.display())]
    NoCsvFound { dir: PathBuf },

    /// The generator returned a batch of the wrong shape.
    #[error("generator returned {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    GeneratorShape {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code used when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::SchemaMismatch(_)
            | PipelineError::InvalidValue { .. }
            | PipelineError::NoCsvFound { .. }
            | PipelineError::InvalidConfig(_)
            | PipelineError::Io { .. }
            | PipelineError::Csv(_)
            | PipelineError::Json(_) => 2,
            PipelineError::EmptyDataset | PipelineError::EmptyResult => 3,
            PipelineError::Decode { .. }
            | PipelineError::Precomposition
            | PipelineError::GeneratorShape { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

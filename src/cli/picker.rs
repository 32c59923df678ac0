//! Data path resolution.
//!
//! `--data` may name a CSV file or a folder of them. A folder resolves to its
//! first `*.csv` file in lexical order (non-recursive), which is how the
//! reference dataset is usually laid out (`data/master/<file>.csv`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Resolve a `--data` argument to a concrete CSV file.
pub fn resolve_data_path(path: &Path) -> Result<PathBuf, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
        ));
    }

    if path.is_dir() {
        let files = discover_csv_files(path)?;
        let first = files
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::NoCsvFound { dir: path.to_path_buf() })?;
        tracing::debug!(path = %first.display(), "resolved data directory");
        return Ok(first);
    }

    validate_csv_path(path)
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, PipelineError> {
    if !is_csv(path) {
        return Err(PipelineError::InvalidConfig(format!(
            "expected a .csv file (got: {})",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// `*.csv` files directly inside `dir`, sorted by name.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut out: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .map(|entry| entry.path())
        .filter(|path| is_csv(path))
        .collect();
    out.sort();
    Ok(out)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

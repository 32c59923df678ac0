//! Shared pipeline logic behind the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! reference CSV -> preprocess (fit normalizer) -> train | generate -> export
//!
//! [`Session`] carries the state that must survive between those steps: the
//! normalizer fitted on the reference data and the last generated dataset.

use std::path::{Path, PathBuf};

use crate::data::{GeneratedDataset, generate_dataset};
use crate::domain::{Schema, Table};
use crate::error::PipelineError;
use crate::io::{GeneratorArtifact, export_csv, read_table};
use crate::math::Normalizer;
use crate::models::{Generator, LATENT_DIM};
use crate::train::{TrainConfig, TrainOutcome, train};
use crate::transform::{Preprocessed, preprocess};

/// Request-scoped state for preprocess → generate → export.
///
/// A failed request leaves the previous state untouched.
#[derive(Debug, Default)]
pub struct Session {
    normalizer: Normalizer,
    schema: Option<Schema>,
    last: Option<GeneratedDataset>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preprocess reference data and keep its normalizer and column order.
    pub fn fit_reference(&mut self, table: &Table) -> Result<Preprocessed, PipelineError> {
        let prep = preprocess(table)?;
        self.normalizer = prep.normalizer.clone();
        self.schema = Some(prep.encoded.schema.clone());
        Ok(prep)
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Generate `num_samples` rows in the reference column order.
    pub fn generate<G>(&mut self, generator: &G, num_samples: usize, seed: u64) -> Result<&GeneratedDataset, PipelineError>
    where
        G: Generator + ?Sized,
    {
        let schema = self.schema.as_ref().ok_or(PipelineError::Precomposition)?;
        let dataset = generate_dataset(schema, generator, &self.normalizer, LATENT_DIM, num_samples, seed)?;
        Ok(self.last.insert(dataset))
    }

    pub fn last_generated(&self) -> Option<&GeneratedDataset> {
        self.last.as_ref()
    }

    /// CSV bytes of the last generated dataset.
    pub fn export_csv(&self) -> Result<Vec<u8>, PipelineError> {
        let dataset = self.last.as_ref().ok_or(PipelineError::EmptyResult)?;
        export_csv(&dataset.table)
    }
}

/// Result of `churn-synth check`.
#[derive(Debug, Clone)]
pub struct CheckOutput {
    pub path: PathBuf,
    pub schema: Schema,
    pub rows: usize,
}

pub fn run_check(data: &Path) -> Result<CheckOutput, PipelineError> {
    let table = read_table(data)?;
    // Encoding catches cell-level problems the loader lets through (e.g. missing tenure).
    preprocess(&table)?;
    Ok(CheckOutput {
        path: data.to_path_buf(),
        rows: table.len(),
        schema: table.schema,
    })
}

/// Result of `churn-synth train`.
#[derive(Debug, Clone)]
pub struct TrainRun {
    pub rows: usize,
    pub outcome: TrainOutcome,
    pub artifact: GeneratorArtifact,
}

pub fn run_train(data: &Path, config: &TrainConfig) -> Result<TrainRun, PipelineError> {
    let table = read_table(data)?;
    let prep = preprocess(&table)?;
    let outcome = train(&prep.scaled, config)?;
    let artifact = GeneratorArtifact::new(&prep.encoded.schema, outcome.accuracy, outcome.generator.clone());
    Ok(TrainRun {
        rows: table.len(),
        outcome,
        artifact,
    })
}

/// Fit on the reference data at `data`, then generate with `artifact`.
pub fn run_generate(
    data: &Path,
    artifact: &GeneratorArtifact,
    num_samples: usize,
    seed: u64,
) -> Result<Session, PipelineError> {
    let table = read_table(data)?;
    artifact.ensure_matches(&table.schema)?;

    let mut session = Session::new();
    session.fit_reference(&table)?;
    session.generate(&artifact.generator, num_samples, seed)?;
    Ok(session)
}

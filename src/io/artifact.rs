//! Read/write trained generator artifacts.
//!
//! An artifact is the portable result of `churn-synth train`:
//! - the trained generator network
//! - the column order it was trained on
//! - the discriminator accuracy reported at the end of training
//! - when it was produced

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Schema;
use crate::error::PipelineError;
use crate::models::MlpGenerator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorArtifact {
    pub tool: String,
    pub trained_at: DateTime<Utc>,
    pub columns: Vec<String>,
    pub accuracy: f64,
    pub generator: MlpGenerator,
}

impl GeneratorArtifact {
    pub fn new(schema: &Schema, accuracy: f64, generator: MlpGenerator) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            trained_at: Utc::now(),
            columns: schema.names().into_iter().map(str::to_string).collect(),
            accuracy,
            generator,
        }
    }

    /// The generator only makes sense for data laid out the way it was trained.
    pub fn ensure_matches(&self, schema: &Schema) -> Result<(), PipelineError> {
        let names = schema.names();
        if self.columns.iter().map(String::as_str).ne(names.iter().copied()) {
            return Err(PipelineError::SchemaMismatch(format!(
                "generator was trained on columns [{}], reference data has [{}]",
                self.columns.join(", "),
                names.join(", ")
            )));
        }
        Ok(())
    }
}

/// Write an artifact as pretty JSON.
pub fn write_artifact(path: &Path, artifact: &GeneratorArtifact) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    serde_json::to_writer_pretty(file, artifact)?;
    tracing::info!(path = %path.display(), "wrote generator artifact");
    Ok(())
}

/// Read an artifact written by [`write_artifact`].
pub fn read_artifact(path: &Path) -> Result<GeneratorArtifact, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let artifact: GeneratorArtifact = serde_json::from_reader(file)?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Column;
    use crate::models::LATENT_DIM;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn artifact() -> GeneratorArtifact {
        let mut rng = StdRng::seed_from_u64(5);
        let generator = MlpGenerator::new(LATENT_DIM, 4, 12, &mut rng);
        GeneratorArtifact::new(&Schema::canonical(), 87.5, generator)
    }

    #[test]
    fn artifact_survives_a_disk_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models").join("generator.json");
        let original = artifact();

        write_artifact(&path, &original).unwrap();
        let loaded = read_artifact(&path).unwrap();

        assert_eq!(loaded.columns, original.columns);
        assert_eq!(loaded.accuracy, 87.5);
        assert_eq!(loaded.generator.width(), 12);
        assert_eq!(loaded.generator.latent_dim(), LATENT_DIM);
    }

    #[test]
    fn column_order_must_match_reference() {
        let a = artifact();
        assert!(a.ensure_matches(&Schema::canonical()).is_ok());

        let mut reversed = Column::ALL.to_vec();
        reversed.reverse();
        let schema = Schema::from_columns(reversed).unwrap();
        assert!(matches!(a.ensure_matches(&schema), Err(PipelineError::SchemaMismatch(_))));
    }
}

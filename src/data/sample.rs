//! Synthetic dataset generation from a trained generator.
//!
//! Steps:
//! 1. draw `num_samples` latent vectors from N(0, 1)
//! 2. run them through the generator
//! 3. unscale with the normalizer fitted on the reference data
//! 4. attach the reference column names and decode back to labels/types

use nalgebra::DMatrix;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{NumericTable, PREVIEW_ROWS, Schema, Table};
use crate::error::PipelineError;
use crate::math::Normalizer;
use crate::models::Generator;
use crate::transform::postprocess;

/// Largest number of rows one generation request may ask for.
pub const MAX_SAMPLES: usize = 10_000;

/// A generated table plus its first rows for display.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDataset {
    pub table: Table,
    pub preview: Table,
}

/// Draw a `(num_samples, latent_dim)` batch of i.i.d. standard normal noise.
pub fn sample_latent<R: Rng + ?Sized>(
    rng: &mut R,
    num_samples: usize,
    latent_dim: usize,
) -> Result<DMatrix<f64>, PipelineError> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| PipelineError::InvalidConfig(format!("noise distribution error: {e}")))?;
    Ok(DMatrix::from_fn(num_samples, latent_dim, |_, _| normal.sample(rng)))
}

/// Run latent noise through `generator` and map the output back to the
/// original numeric ranges.
///
/// Returns `num_samples` rows, one column per column the normalizer was fit on.
pub fn generate<G, R>(
    generator: &G,
    normalizer: &Normalizer,
    latent_dim: usize,
    num_samples: usize,
    rng: &mut R,
) -> Result<DMatrix<f64>, PipelineError>
where
    G: Generator + ?Sized,
    R: Rng + ?Sized,
{
    let width = normalizer.width().ok_or(PipelineError::Precomposition)?;
    if num_samples == 0 {
        return Err(PipelineError::InvalidConfig("sample count must be > 0".to_string()));
    }
    if num_samples > MAX_SAMPLES {
        return Err(PipelineError::InvalidConfig(format!(
            "sample count must be at most {MAX_SAMPLES} (got {num_samples})"
        )));
    }
    if latent_dim == 0 {
        return Err(PipelineError::InvalidConfig("latent dimension must be > 0".to_string()));
    }

    let latent = sample_latent(rng, num_samples, latent_dim)?;
    let raw = generator.generate_batch(&latent)?;
    if raw.shape() != (num_samples, width) {
        return Err(PipelineError::GeneratorShape {
            expected_rows: num_samples,
            expected_cols: width,
            rows: raw.nrows(),
            cols: raw.ncols(),
        });
    }

    normalizer.inverse_transform(&raw)
}

/// Generate a labeled synthetic table in `schema`'s column order.
pub fn generate_dataset<G>(
    schema: &Schema,
    generator: &G,
    normalizer: &Normalizer,
    latent_dim: usize,
    num_samples: usize,
    seed: u64,
) -> Result<GeneratedDataset, PipelineError>
where
    G: Generator + ?Sized,
{
    let width = normalizer.width().ok_or(PipelineError::Precomposition)?;
    if width != schema.width() {
        return Err(PipelineError::SchemaMismatch(format!(
            "reference schema has {} columns, normalizer was fit on {width}",
            schema.width()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let raw = generate(generator, normalizer, latent_dim, num_samples, &mut rng)?;
    let numeric = NumericTable::new(schema.clone(), raw)?;
    let table = postprocess(&numeric)?;

    tracing::info!(rows = table.len(), seed, "generated synthetic dataset");

    Ok(GeneratedDataset {
        preview: table.head(PREVIEW_ROWS),
        table,
    })
}

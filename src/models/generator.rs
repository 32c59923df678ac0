//! Generator abstraction and the dense-network generator produced by training.
//!
//! The pipeline only ever calls [`Generator::generate_batch`]: a latent batch
//! of shape `(n, latent_dim)` goes in, a raw batch of shape `(n, width)`
//! comes out. Anything that can do that (a trained network, a closure in a
//! test, a model served from elsewhere) plugs in here.

use nalgebra::DMatrix;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::math::{Activation, Mlp};

/// Dimension of the latent space the generator is sampled from.
pub const LATENT_DIM: usize = 10;

/// Slope of the negative side of hidden-layer LeakyReLUs.
pub const LEAKY_SLOPE: f64 = 0.2;

pub trait Generator {
    fn generate_batch(&self, latent: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError>;
}

impl<F> Generator for F
where
    F: Fn(&DMatrix<f64>) -> DMatrix<f64>,
{
    fn generate_batch(&self, latent: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        Ok(self(latent))
    }
}

/// latent → hidden → hidden → width, sigmoid output (training data is scaled to [0, 1]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpGenerator {
    pub network: Mlp,
}

impl MlpGenerator {
    pub fn new<R: Rng>(latent_dim: usize, hidden_dim: usize, width: usize, rng: &mut R) -> Self {
        let network = Mlp::new(
            &[latent_dim, hidden_dim, hidden_dim, width],
            Activation::LeakyRelu(LEAKY_SLOPE),
            Activation::Sigmoid,
            rng,
        );
        Self { network }
    }

    pub fn latent_dim(&self) -> usize {
        self.network.input_dim()
    }

    pub fn width(&self) -> usize {
        self.network.output_dim()
    }
}

impl Generator for MlpGenerator {
    fn generate_batch(&self, latent: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        if latent.ncols() != self.latent_dim() {
            return Err(PipelineError::InvalidConfig(format!(
                "generator expects latent dimension {}, got {}",
                self.latent_dim(),
                latent.ncols()
            )));
        }
        Ok(self.network.forward(latent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mlp_generator_maps_latent_batch_to_schema_width() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = MlpGenerator::new(LATENT_DIM, 8, 12, &mut rng);
        let latent = DMatrix::from_element(4, LATENT_DIM, 0.1);
        let out = generator.generate_batch(&latent).unwrap();
        assert_eq!(out.shape(), (4, 12));
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn wrong_latent_dimension_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = MlpGenerator::new(LATENT_DIM, 8, 12, &mut rng);
        let latent = DMatrix::from_element(4, 3, 0.1);
        assert!(matches!(
            generator.generate_batch(&latent),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn closures_are_generators() {
        let constant = |latent: &DMatrix<f64>| DMatrix::from_element(latent.nrows(), 2, 0.5);
        let out = constant.generate_batch(&DMatrix::zeros(3, LATENT_DIM)).unwrap();
        assert_eq!(out.shape(), (3, 2));
    }
}

//! Adversarial training loop.
//!
//! Each epoch runs one discriminator step (a real minibatch labeled 1 and a
//! generated minibatch labeled 0) followed by one generator step with the
//! non-saturating loss (generated minibatch labeled 1, gradient taken through
//! the discriminator without updating it). Both networks use binary
//! cross-entropy and Adam.

use nalgebra::DMatrix;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::data::{MAX_SAMPLES, sample_latent};
use crate::error::PipelineError;
use crate::math::{Activation, Mlp};
use crate::models::{LATENT_DIM, LEAKY_SLOPE, MlpGenerator};
use crate::train::adam::Adam;

/// Probabilities are clamped away from 0 and 1 before taking logs.
const PROB_EPS: f64 = 1e-7;

pub const MAX_EPOCHS: usize = 10_000;

/// Upper bound on latent and hidden layer widths.
pub const MAX_LAYER_WIDTH: usize = 1024;

#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub latent_dim: usize,
    pub hidden_dim: usize,
    pub learning_rate: f64,
    pub beta1: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 32,
            latent_dim: LATENT_DIM,
            hidden_dim: 32,
            learning_rate: 0.0002,
            beta1: 0.5,
            seed: 42,
        }
    }
}

impl TrainConfig {
    fn validate(&self) -> Result<(), PipelineError> {
        if !(1..=MAX_EPOCHS).contains(&self.epochs) {
            return Err(PipelineError::InvalidConfig(format!(
                "epochs must be in 1..={MAX_EPOCHS} (got {})",
                self.epochs
            )));
        }
        if !(1..=MAX_SAMPLES).contains(&self.batch_size) {
            return Err(PipelineError::InvalidConfig(format!(
                "batch size must be in 1..={MAX_SAMPLES} (got {})",
                self.batch_size
            )));
        }
        let widths = 1..=MAX_LAYER_WIDTH;
        if !widths.contains(&self.latent_dim) || !widths.contains(&self.hidden_dim) {
            return Err(PipelineError::InvalidConfig(format!(
                "latent and hidden dimensions must be in 1..={MAX_LAYER_WIDTH}"
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PipelineError::InvalidConfig("learning rate must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.beta1) {
            return Err(PipelineError::InvalidConfig("beta1 must be in [0, 1)".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub generator: MlpGenerator,
    /// Discriminator accuracy (percent) on a final real + generated batch.
    pub accuracy: f64,
    pub discriminator_loss: f64,
    pub generator_loss: f64,
}

/// Train a GAN on `data` (rows already scaled to [0, 1]).
pub fn train(data: &DMatrix<f64>, config: &TrainConfig) -> Result<TrainOutcome, PipelineError> {
    config.validate()?;
    if data.nrows() == 0 {
        return Err(PipelineError::EmptyDataset);
    }

    let width = data.ncols();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut generator = MlpGenerator::new(config.latent_dim, config.hidden_dim, width, &mut rng);
    let mut discriminator = Mlp::new(
        &[width, config.hidden_dim, 1],
        Activation::LeakyRelu(LEAKY_SLOPE),
        Activation::Sigmoid,
        &mut rng,
    );
    let mut g_opt = Adam::new(&generator.network, config.learning_rate, config.beta1);
    let mut d_opt = Adam::new(&discriminator, config.learning_rate, config.beta1);

    let batch = config.batch_size;
    let mut d_loss = f64::NAN;
    let mut g_loss = f64::NAN;

    tracing::info!(rows = data.nrows(), width, epochs = config.epochs, batch, "training GAN");

    for epoch in 0..config.epochs {
        // Discriminator step.
        let real = sample_rows(data, batch, &mut rng);
        let z = sample_latent(&mut rng, batch, config.latent_dim)?;
        let fake = generator.network.forward(&z);

        let (p_real, c_real) = discriminator.forward_cached(&real);
        let (grads_real, _) = discriminator.backward(&c_real, &bce_grad(&p_real, 1.0));
        let (p_fake, c_fake) = discriminator.forward_cached(&fake);
        let (grads_fake, _) = discriminator.backward(&c_fake, &bce_grad(&p_fake, 0.0));
        d_opt.step(&mut discriminator, &grads_real.add(&grads_fake));
        d_loss = 0.5 * (bce(&p_real, 1.0) + bce(&p_fake, 0.0));

        // Generator step.
        let z = sample_latent(&mut rng, batch, config.latent_dim)?;
        let (fake, g_caches) = generator.network.forward_cached(&z);
        let (p_fake, d_caches) = discriminator.forward_cached(&fake);
        let (_, d_fake) = discriminator.backward(&d_caches, &bce_grad(&p_fake, 1.0));
        let (g_grads, _) = generator.network.backward(&g_caches, &d_fake);
        g_opt.step(&mut generator.network, &g_grads);
        g_loss = bce(&p_fake, 1.0);

        tracing::debug!(epoch = epoch + 1, d_loss, g_loss, "epoch finished");
    }

    let accuracy = evaluate(&discriminator, &generator, data, batch, config.latent_dim, &mut rng)?;
    tracing::info!(accuracy, d_loss, g_loss, "training finished");

    Ok(TrainOutcome {
        generator,
        accuracy,
        discriminator_loss: d_loss,
        generator_loss: g_loss,
    })
}

/// Percentage of a real batch scored > 0.5 plus a generated batch scored <= 0.5.
fn evaluate(
    discriminator: &Mlp,
    generator: &MlpGenerator,
    data: &DMatrix<f64>,
    batch: usize,
    latent_dim: usize,
    rng: &mut StdRng,
) -> Result<f64, PipelineError> {
    let real = sample_rows(data, batch, rng);
    let z = sample_latent(rng, batch, latent_dim)?;
    let fake = generator.network.forward(&z);

    let correct_real = discriminator.forward(&real).iter().filter(|&&p| p > 0.5).count();
    let correct_fake = discriminator.forward(&fake).iter().filter(|&&p| p <= 0.5).count();
    Ok(100.0 * (correct_real + correct_fake) as f64 / (2 * batch) as f64)
}

/// Rows drawn uniformly with replacement.
fn sample_rows(data: &DMatrix<f64>, n: usize, rng: &mut StdRng) -> DMatrix<f64> {
    let idx: Vec<usize> = (0..n).map(|_| rng.gen_range(0..data.nrows())).collect();
    DMatrix::from_fn(n, data.ncols(), |i, j| data[(idx[i], j)])
}

/// Mean binary cross-entropy of predictions against a constant label.
fn bce(pred: &DMatrix<f64>, target: f64) -> f64 {
    let n = pred.len().max(1) as f64;
    pred.iter()
        .map(|&p| {
            let p = p.clamp(PROB_EPS, 1.0 - PROB_EPS);
            -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
        })
        .sum::<f64>()
        / n
}

/// d(bce)/d(pred) for each prediction.
fn bce_grad(pred: &DMatrix<f64>, target: f64) -> DMatrix<f64> {
    let n = pred.len().max(1) as f64;
    pred.map(|p| {
        let p = p.clamp(PROB_EPS, 1.0 - PROB_EPS);
        (p - target) / (p * (1.0 - p)) / n
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Generator;
    use crate::testing::sample_table;
    use crate::transform::preprocess;

    fn quick_config() -> TrainConfig {
        TrainConfig {
            epochs: 25,
            batch_size: 8,
            hidden_dim: 8,
            learning_rate: 0.01,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn training_yields_schema_width_generator_and_bounded_accuracy() {
        let prep = preprocess(&sample_table()).unwrap();
        let outcome = train(&prep.scaled, &quick_config()).unwrap();

        assert_eq!(outcome.generator.width(), 12);
        assert_eq!(outcome.generator.latent_dim(), LATENT_DIM);
        assert!((0.0..=100.0).contains(&outcome.accuracy));
        assert!(outcome.discriminator_loss.is_finite());
        assert!(outcome.generator_loss.is_finite());

        let batch = outcome.generator.generate_batch(&DMatrix::zeros(3, LATENT_DIM)).unwrap();
        assert_eq!(batch.shape(), (3, 12));
    }

    #[test]
    fn training_is_reproducible_for_a_seed() {
        let prep = preprocess(&sample_table()).unwrap();
        let a = train(&prep.scaled, &quick_config()).unwrap();
        let b = train(&prep.scaled, &quick_config()).unwrap();
        assert_eq!(a.generator, b.generator);
        assert_eq!(a.accuracy, b.accuracy);
    }

    #[test]
    fn invalid_config_and_empty_data_are_rejected() {
        let data = DMatrix::from_element(4, 3, 0.5);
        let zero_epochs = TrainConfig {
            epochs: 0,
            ..TrainConfig::default()
        };
        assert!(matches!(train(&data, &zero_epochs), Err(PipelineError::InvalidConfig(_))));
        assert!(matches!(
            train(&DMatrix::zeros(0, 3), &TrainConfig::default()),
            Err(PipelineError::EmptyDataset)
        ));
    }

    #[test]
    fn oversized_config_is_rejected_before_allocating() {
        let data = DMatrix::from_element(4, 3, 0.5);
        let too_many_epochs = TrainConfig {
            epochs: MAX_EPOCHS + 1,
            ..TrainConfig::default()
        };
        let huge_batch = TrainConfig {
            batch_size: usize::MAX / 4,
            ..TrainConfig::default()
        };
        let wide_hidden = TrainConfig {
            hidden_dim: MAX_LAYER_WIDTH + 1,
            ..TrainConfig::default()
        };
        for config in [too_many_epochs, huge_batch, wide_hidden] {
            assert!(matches!(train(&data, &config), Err(PipelineError::InvalidConfig(_))));
        }
    }

    #[test]
    fn bce_gradient_through_sigmoid_is_prediction_minus_label() {
        // For a sigmoid output, dL/dz = (p - y) / n.
        let p = DMatrix::from_row_slice(2, 1, &[0.8, 0.3]);
        let g = bce_grad(&p, 1.0);
        let dz: Vec<f64> = g.iter().zip(p.iter()).map(|(g, p)| g * p * (1.0 - p)).collect();
        assert!((dz[0] - (0.8 - 1.0) / 2.0).abs() < 1e-12);
        assert!((dz[1] - (0.3 - 1.0) / 2.0).abs() < 1e-12);
    }
}

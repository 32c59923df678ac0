//! Small dense feed-forward networks on `nalgebra` matrices.
//!
//! Batches are row-major in the usual ML sense: one sample per matrix row.
//! A layer computes `A = act(X · Wᵀ + b)` with `W` shaped `(out, in)`.
//!
//! Only what the GAN needs is here: forward passes (plain and with a cache
//! for backprop), backprop from an output gradient, and Xavier-style init.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    LeakyRelu(f64),
    Sigmoid,
}

impl Activation {
    fn apply(self, z: f64) -> f64 {
        match self {
            Activation::LeakyRelu(alpha) => {
                if z > 0.0 {
                    z
                } else {
                    alpha * z
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-z).exp()),
        }
    }

    /// d(act)/dz, given the pre-activation `z` and the output `a = act(z)`.
    fn derivative(self, z: f64, a: f64) -> f64 {
        match self {
            Activation::LeakyRelu(alpha) => {
                if z > 0.0 {
                    1.0
                } else {
                    alpha
                }
            }
            Activation::Sigmoid => a * (1.0 - a),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dense {
    pub weights: DMatrix<f64>,
    pub bias: DVector<f64>,
    pub activation: Activation,
}

impl Dense {
    pub fn new<R: Rng>(input: usize, output: usize, activation: Activation, rng: &mut R) -> Self {
        let std = (2.0 / (input + output).max(1) as f64).sqrt();
        let weights = DMatrix::from_fn(output, input, |_, _| {
            let z: f64 = rng.sample(StandardNormal);
            z * std
        });
        Self {
            weights,
            bias: DVector::zeros(output),
            activation,
        }
    }

    pub fn input_dim(&self) -> usize {
        self.weights.ncols()
    }

    pub fn output_dim(&self) -> usize {
        self.weights.nrows()
    }

    fn pre_activation(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        let mut z = x * self.weights.transpose();
        for (j, mut col) in z.column_iter_mut().enumerate() {
            col.add_scalar_mut(self.bias[j]);
        }
        z
    }
}

/// Intermediate values of one layer kept for the backward pass.
#[derive(Debug, Clone)]
pub struct LayerCache {
    input: DMatrix<f64>,
    pre: DMatrix<f64>,
    output: DMatrix<f64>,
}

/// Parameter gradients, one entry per layer.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub weights: Vec<DMatrix<f64>>,
    pub biases: Vec<DVector<f64>>,
}

impl Gradients {
    /// Element-wise sum, for losses made of several terms.
    pub fn add(mut self, other: &Gradients) -> Self {
        for (w, o) in self.weights.iter_mut().zip(&other.weights) {
            *w += o;
        }
        for (b, o) in self.biases.iter_mut().zip(&other.biases) {
            *b += o;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mlp {
    pub layers: Vec<Dense>,
}

impl Mlp {
    /// Build a network with the given layer sizes; hidden layers use
    /// `hidden`, the last layer uses `last`.
    pub fn new<R: Rng>(sizes: &[usize], hidden: Activation, last: Activation, rng: &mut R) -> Self {
        let n = sizes.len().saturating_sub(1);
        let layers = sizes
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let act = if i + 1 == n { last } else { hidden };
                Dense::new(w[0], w[1], act, rng)
            })
            .collect();
        Self { layers }
    }

    pub fn input_dim(&self) -> usize {
        self.layers.first().map_or(0, Dense::input_dim)
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, Dense::output_dim)
    }

    pub fn forward(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        self.layers.iter().fold(x.clone(), |a, layer| {
            let act = layer.activation;
            layer.pre_activation(&a).map(|z| act.apply(z))
        })
    }

    pub fn forward_cached(&self, x: &DMatrix<f64>) -> (DMatrix<f64>, Vec<LayerCache>) {
        let mut caches = Vec::with_capacity(self.layers.len());
        let mut a = x.clone();
        for layer in &self.layers {
            let act = layer.activation;
            let pre = layer.pre_activation(&a);
            let output = pre.map(|z| act.apply(z));
            caches.push(LayerCache {
                input: a,
                pre,
                output: output.clone(),
            });
            a = output;
        }
        (a, caches)
    }

    /// Backpropagate `d_output` (gradient of the loss w.r.t. the network
    /// output) and return the parameter gradients plus the gradient w.r.t.
    /// the network input.
    pub fn backward(&self, caches: &[LayerCache], d_output: &DMatrix<f64>) -> (Gradients, DMatrix<f64>) {
        let mut weights = Vec::with_capacity(self.layers.len());
        let mut biases = Vec::with_capacity(self.layers.len());
        let mut d_a = d_output.clone();

        for (layer, cache) in self.layers.iter().zip(caches).rev() {
            let act = layer.activation;
            let deriv = cache.pre.zip_map(&cache.output, |z, a| act.derivative(z, a));
            let d_z = d_a.component_mul(&deriv);

            weights.push(d_z.transpose() * &cache.input);
            biases.push(d_z.row_sum().transpose());
            d_a = &d_z * &layer.weights;
        }

        weights.reverse();
        biases.reverse();
        (Gradients { weights, biases }, d_a)
    }
}

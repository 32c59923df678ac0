//! Adam optimizer over the parameters of an [`Mlp`].

use nalgebra::{DMatrix, DVector};

use crate::math::{Gradients, Mlp};

#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    step: i32,
    m_weights: Vec<DMatrix<f64>>,
    v_weights: Vec<DMatrix<f64>>,
    m_biases: Vec<DVector<f64>>,
    v_biases: Vec<DVector<f64>>,
}

impl Adam {
    pub fn new(net: &Mlp, learning_rate: f64, beta1: f64) -> Self {
        let zeros_w = || {
            net.layers
                .iter()
                .map(|l| DMatrix::zeros(l.weights.nrows(), l.weights.ncols()))
                .collect::<Vec<_>>()
        };
        let zeros_b = || net.layers.iter().map(|l| DVector::zeros(l.bias.len())).collect::<Vec<_>>();
        Self {
            learning_rate,
            beta1,
            beta2: 0.999,
            epsilon: 1e-8,
            step: 0,
            m_weights: zeros_w(),
            v_weights: zeros_w(),
            m_biases: zeros_b(),
            v_biases: zeros_b(),
        }
    }

    /// Apply one descent step with `grads` (gradients of the loss to minimize).
    pub fn step(&mut self, net: &mut Mlp, grads: &Gradients) {
        self.step = self.step.saturating_add(1);
        let bias1 = 1.0 - self.beta1.powi(self.step);
        let bias2 = 1.0 - self.beta2.powi(self.step);
        let hp = Hyper {
            lr: self.learning_rate,
            beta1: self.beta1,
            beta2: self.beta2,
            epsilon: self.epsilon,
            bias1,
            bias2,
        };

        for (i, layer) in net.layers.iter_mut().enumerate() {
            update(
                layer.weights.as_mut_slice(),
                grads.weights[i].as_slice(),
                self.m_weights[i].as_mut_slice(),
                self.v_weights[i].as_mut_slice(),
                &hp,
            );
            update(
                layer.bias.as_mut_slice(),
                grads.biases[i].as_slice(),
                self.m_biases[i].as_mut_slice(),
                self.v_biases[i].as_mut_slice(),
                &hp,
            );
        }
    }
}

struct Hyper {
    lr: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    bias1: f64,
    bias2: f64,
}

fn update(params: &mut [f64], grads: &[f64], m: &mut [f64], v: &mut [f64], hp: &Hyper) {
    for (((p, &g), m), v) in params.iter_mut().zip(grads).zip(m.iter_mut()).zip(v.iter_mut()) {
        *m = hp.beta1 * *m + (1.0 - hp.beta1) * g;
        *v = hp.beta2 * *v + (1.0 - hp.beta2) * g * g;
        let m_hat = *m / hp.bias1;
        let v_hat = *v / hp.bias2;
        *p -= hp.lr * m_hat / (v_hat.sqrt() + hp.epsilon);
    }
}

//! Gradient-based optimizers for neural network training.
//!
//! Optimizers receive every trainable parameter buffer of a network together
//! with the matching gradient buffers, in a fixed order, and update the
//! parameters in place. Per-parameter state (momentum, moment estimates) is
//! keyed by that position.
//!
//! # References
//!
//! - Robbins, H., & Monro, S. (1951). A stochastic approximation method.
//! - Kingma, D. P., & Ba, J. (2015). Adam: A method for stochastic optimization. ICLR.

use crate::error::{NeuroregError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common trait for all optimizers.
pub trait Optimizer: fmt::Debug + Send {
    /// Applies one update to `params` using `grads`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the buffers don't pair up.
    fn step(&mut self, params: &mut [&mut [f64]], grads: &[Vec<f64>]) -> Result<()>;
}

/// Optimizer selector used in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    /// Plain stochastic gradient descent with optional momentum.
    Sgd,
    /// Adam with Keras default moments.
    #[default]
    Adam,
}

impl OptimizerKind {
    /// Builds a fresh optimizer. `momentum` only applies to SGD.
    #[must_use]
    pub fn build(self, lr: f64, momentum: f64) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Sgd => Box::new(Sgd::new(lr).with_momentum(momentum)),
            OptimizerKind::Adam => Box::new(Adam::new(lr)),
        }
    }
}

fn check_buffers(params: &[&mut [f64]], grads: &[Vec<f64>]) -> Result<()> {
    if params.len() != grads.len() {
        return Err(NeuroregError::DimensionMismatch {
            expected: format!("{} gradient buffers", params.len()),
            actual: format!("{} gradient buffers", grads.len()),
        });
    }
    for (idx, (p, g)) in params.iter().zip(grads).enumerate() {
        if p.len() != g.len() {
            return Err(NeuroregError::DimensionMismatch {
                expected: format!("gradient {idx} with {} elements", p.len()),
                actual: format!("{} elements", g.len()),
            });
        }
    }
    Ok(())
}

/// Stochastic Gradient Descent optimizer with momentum.
///
/// Update rule:
/// ```text
/// v_t = momentum * v_{t-1} - lr * grad
/// param = param + v_t
/// ```
#[derive(Debug, Clone)]
pub struct Sgd {
    lr: f64,
    momentum: f64,
    velocities: Vec<Vec<f64>>,
}

impl Sgd {
    /// Create a new SGD optimizer without momentum.
    #[must_use]
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            momentum: 0.0,
            velocities: Vec::new(),
        }
    }

    /// Set the momentum coefficient.
    #[must_use]
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &mut [&mut [f64]], grads: &[Vec<f64>]) -> Result<()> {
        check_buffers(params, grads)?;
        if self.velocities.len() != params.len() {
            self.velocities = params.iter().map(|p| vec![0.0; p.len()]).collect();
        }

        for ((param, grad), velocity) in params
            .iter_mut()
            .zip(grads)
            .zip(self.velocities.iter_mut())
        {
            for i in 0..param.len() {
                velocity[i] = self.momentum * velocity[i] - self.lr * grad[i];
                param[i] += velocity[i];
            }
        }
        Ok(())
    }
}

/// Adam optimizer (Kingma & Ba, 2015).
///
/// Default: β₁=0.9, β₂=0.999, ε=1e-7
#[derive(Debug, Clone)]
pub struct Adam {
    lr: f64,
    beta1: f64,
    beta2: f64,
    eps: f64,
    /// First moment estimates
    m: Vec<Vec<f64>>,
    /// Second moment estimates
    v: Vec<Vec<f64>>,
    /// Current timestep for bias correction
    t: i32,
}

impl Adam {
    /// Create a new Adam optimizer with default hyperparameters.
    #[must_use]
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-7,
            m: Vec::new(),
            v: Vec::new(),
            t: 0,
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [&mut [f64]], grads: &[Vec<f64>]) -> Result<()> {
        check_buffers(params, grads)?;
        if self.m.len() != params.len() {
            self.m = params.iter().map(|p| vec![0.0; p.len()]).collect();
            self.v = self.m.clone();
            self.t = 0;
        }
        self.t += 1;

        // Bias correction factors
        let bias_correction1 = 1.0 - self.beta1.powi(self.t);
        let bias_correction2 = 1.0 - self.beta2.powi(self.t);

        for (idx, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let m = &mut self.m[idx];
            let v = &mut self.v[idx];
            for i in 0..param.len() {
                let g = grad[i];
                m[i] = self.beta1 * m[i] + (1.0 - self.beta1) * g;
                v[i] = self.beta2 * v[i] + (1.0 - self.beta2) * g * g;

                let m_hat = m[i] / bias_correction1;
                let v_hat = v[i] / bias_correction2;

                param[i] -= self.lr * m_hat / (v_hat.sqrt() + self.eps);
            }
        }
        Ok(())
    }
}

//! Fully connected (dense) layer.
//!
//! Implements the transformation `a = act(x·W + b)`.

use super::init::xavier_uniform;
use super::Activation;
use crate::error::{NeuroregError, Result};
use crate::primitives::Matrix;
use rand::rngs::StdRng;

/// Fully connected layer: `a = act(x·W + b)`.
///
/// # Shape
///
/// - Input: `(batch, in_features)`
/// - Weight: `(in_features, out_features)`
/// - Output: `(batch, out_features)`
#[derive(Debug, Clone)]
pub struct Dense {
    weight: Matrix<f64>,
    bias: Vec<f64>,
    activation: Activation,
    /// Forward state of the last training pass, consumed by `backward`.
    cache: Option<ForwardCache>,
}

#[derive(Debug, Clone)]
struct ForwardCache {
    input: Matrix<f64>,
    pre_activation: Matrix<f64>,
    output: Matrix<f64>,
}

/// Parameter gradients of one layer, laid out like [`Dense::params_mut`].
#[derive(Debug, Clone)]
pub(crate) struct DenseGrads {
    pub(crate) weight: Vec<f64>,
    pub(crate) bias: Vec<f64>,
}

impl Dense {
    /// Create a layer with Xavier-uniform weights and zero bias.
    #[must_use]
    pub fn new(
        in_features: usize,
        out_features: usize,
        activation: Activation,
        rng: &mut StdRng,
    ) -> Self {
        Self {
            weight: xavier_uniform(in_features, out_features, rng),
            bias: vec![0.0; out_features],
            activation,
            cache: None,
        }
    }

    /// Create a layer from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `bias.len()` differs from the weight's
    /// column count.
    pub fn from_parts(weight: Matrix<f64>, bias: Vec<f64>, activation: Activation) -> Result<Self> {
        if weight.n_cols() != bias.len() {
            return Err(NeuroregError::DimensionMismatch {
                expected: format!("bias of length {}", weight.n_cols()),
                actual: format!("bias of length {}", bias.len()),
            });
        }
        Ok(Self {
            weight,
            bias,
            activation,
            cache: None,
        })
    }

    /// Number of input features.
    #[must_use]
    pub fn in_features(&self) -> usize {
        self.weight.n_rows()
    }

    /// Number of output features.
    #[must_use]
    pub fn out_features(&self) -> usize {
        self.weight.n_cols()
    }

    /// Activation function.
    #[must_use]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Weight matrix.
    #[must_use]
    pub fn weight(&self) -> &Matrix<f64> {
        &self.weight
    }

    /// Bias vector.
    #[must_use]
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    /// Number of trainable parameters.
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.weight.as_slice().len() + self.bias.len()
    }

    /// Inference forward pass.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` doesn't have `in_features` columns.
    pub fn forward(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let pre = self.pre_activation(x)?;
        Ok(self.activate(&pre))
    }

    /// Forward pass that keeps the state `backward` needs.
    pub(crate) fn forward_train(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let pre_activation = self.pre_activation(x)?;
        let output = self.activate(&pre_activation);
        self.cache = Some(ForwardCache {
            input: x.clone(),
            pre_activation,
            output: output.clone(),
        });
        Ok(output)
    }

    /// Backpropagates `grad_output` (dL/da) through the cached forward pass.
    ///
    /// Returns the parameter gradients and dL/dx for the previous layer.
    pub(crate) fn backward(
        &mut self,
        grad_output: &Matrix<f64>,
    ) -> Result<(DenseGrads, Matrix<f64>)> {
        let cache = self
            .cache
            .take()
            .ok_or(NeuroregError::MissingForwardPass)?;
        if grad_output.shape() != cache.output.shape() {
            return Err(NeuroregError::shape_mismatch(
                cache.output.shape(),
                grad_output.shape(),
            ));
        }

        // dL/dz = dL/da ⊙ act'(z)
        let (rows, cols) = grad_output.shape();
        let dz_data: Vec<f64> = grad_output
            .as_slice()
            .iter()
            .zip(cache.pre_activation.as_slice())
            .zip(cache.output.as_slice())
            .map(|((g, &z), &a)| g * self.activation.derivative(z, a))
            .collect();
        let dz = Matrix::from_vec(rows, cols, dz_data)?;

        let grad_weight = cache.input.transpose().matmul(&dz)?;
        let mut grad_bias = vec![0.0; cols];
        if cols > 0 {
            for row in dz.as_slice().chunks_exact(cols) {
                for (gb, d) in grad_bias.iter_mut().zip(row) {
                    *gb += d;
                }
            }
        }
        let grad_input = dz.matmul(&self.weight.transpose())?;

        Ok((
            DenseGrads {
                weight: grad_weight.as_slice().to_vec(),
                bias: grad_bias,
            },
            grad_input,
        ))
    }

    /// Mutable parameter buffers: weight (row-major), then bias.
    pub(crate) fn params_mut(&mut self) -> [&mut [f64]; 2] {
        [self.weight.as_mut_slice(), self.bias.as_mut_slice()]
    }

    fn pre_activation(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        if x.n_cols() != self.in_features() {
            return Err(NeuroregError::DimensionMismatch {
                expected: format!("{} input features", self.in_features()),
                actual: format!("{} input features", x.n_cols()),
            });
        }
        let mut z = x.matmul(&self.weight)?;
        let cols = self.out_features();
        if cols > 0 {
            for row in z.as_mut_slice().chunks_exact_mut(cols) {
                for (v, b) in row.iter_mut().zip(&self.bias) {
                    *v += b;
                }
            }
        }
        Ok(z)
    }

    fn activate(&self, pre: &Matrix<f64>) -> Matrix<f64> {
        let mut out = pre.clone();
        if self.activation != Activation::Linear {
            for v in out.as_mut_slice() {
                *v = self.activation.apply(*v);
            }
        }
        out
    }
}

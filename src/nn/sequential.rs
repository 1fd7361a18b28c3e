//! Sequential container with Keras-style compile/train/evaluate.

use super::dense::DenseGrads;
use super::{Dense, Loss, Optimizer};
use crate::error::{NeuroregError, Result};
use crate::metrics::Metric;
use crate::primitives::Matrix;
use std::collections::BTreeMap;

/// Key of the loss value in [`Sequential::evaluate`] results and histories.
pub const LOSS_KEY: &str = "loss";

/// Training configuration attached by [`Sequential::compile`].
#[derive(Debug)]
struct Compiled {
    loss: Loss,
    optimizer: Box<dyn Optimizer>,
    metrics: Vec<Metric>,
}

/// A stack of dense layers applied in order.
///
/// The model can run inference as soon as it has layers. Training and
/// evaluation need [`Sequential::compile`] first.
#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<Dense>,
    compiled: Option<Compiled>,
}

impl Sequential {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the layer's input width doesn't match
    /// the previous layer's output width.
    pub fn add(&mut self, layer: Dense) -> Result<()> {
        if let Some(last) = self.layers.last() {
            if last.out_features() != layer.in_features() {
                return Err(NeuroregError::DimensionMismatch {
                    expected: format!("layer with {} inputs", last.out_features()),
                    actual: format!("layer with {} inputs", layer.in_features()),
                });
            }
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Layers in forward order.
    #[must_use]
    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// Input width, if the model has layers.
    #[must_use]
    pub fn input_dim(&self) -> Option<usize> {
        self.layers.first().map(Dense::in_features)
    }

    /// Output width, if the model has layers.
    #[must_use]
    pub fn output_dim(&self) -> Option<usize> {
        self.layers.last().map(Dense::out_features)
    }

    /// Total number of trainable parameters.
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.layers.iter().map(Dense::n_params).sum()
    }

    /// Attaches a loss, an optimizer and the metrics reported by
    /// [`Sequential::evaluate`]. Recompiling resets optimizer state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if the model has no layers.
    pub fn compile(
        &mut self,
        loss: Loss,
        optimizer: Box<dyn Optimizer>,
        metrics: Vec<Metric>,
    ) -> Result<()> {
        if self.layers.is_empty() {
            return Err(NeuroregError::invalid_hyperparameter(
                "layers",
                0,
                "at least one layer",
            ));
        }
        self.compiled = Some(Compiled {
            loss,
            optimizer,
            metrics,
        });
        Ok(())
    }

    /// Runs the network on `x`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong width, and
    /// `InvalidHyperparameter` for a model without layers.
    pub fn predict(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (first, rest) = self.layers.split_first().ok_or_else(|| {
            NeuroregError::invalid_hyperparameter("layers", 0, "at least one layer")
        })?;
        let mut out = first.forward(x)?;
        for layer in rest {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }

    /// One gradient step on a batch. Returns the batch loss measured before
    /// the update.
    ///
    /// # Errors
    ///
    /// Returns `NotCompiled` before [`Sequential::compile`], and
    /// `DimensionMismatch` if `x` or `y` have the wrong shape.
    pub fn train_on_batch(&mut self, x: &Matrix<f64>, y: &Matrix<f64>) -> Result<f64> {
        let loss = self
            .compiled
            .as_ref()
            .ok_or(NeuroregError::NotCompiled)?
            .loss;
        if x.n_rows() != y.n_rows() {
            return Err(NeuroregError::length_mismatch(x.n_rows(), y.n_rows()));
        }

        let mut out = x.clone();
        for layer in &mut self.layers {
            out = layer.forward_train(&out)?;
        }
        let batch_loss = loss.value(y, &out)?;

        let mut grad = loss.gradient(y, &out)?;
        let mut layer_grads: Vec<DenseGrads> = Vec::with_capacity(self.layers.len());
        for layer in self.layers.iter_mut().rev() {
            let (g, grad_input) = layer.backward(&grad)?;
            layer_grads.push(g);
            grad = grad_input;
        }
        layer_grads.reverse();

        let grads: Vec<Vec<f64>> = layer_grads
            .into_iter()
            .flat_map(|g| [g.weight, g.bias])
            .collect();
        let mut params: Vec<&mut [f64]> = self
            .layers
            .iter_mut()
            .flat_map(Dense::params_mut)
            .collect();

        let compiled = self.compiled.as_mut().ok_or(NeuroregError::NotCompiled)?;
        compiled.optimizer.step(&mut params, &grads)?;
        Ok(batch_loss)
    }

    /// Loss and every compiled metric on `(x, y)`, keyed by name.
    ///
    /// # Errors
    ///
    /// Returns `NotCompiled` before [`Sequential::compile`], and shape
    /// errors from the forward pass or the metrics.
    pub fn evaluate(&self, x: &Matrix<f64>, y: &Matrix<f64>) -> Result<BTreeMap<String, f64>> {
        let compiled = self.compiled.as_ref().ok_or(NeuroregError::NotCompiled)?;
        let y_pred = self.predict(x)?;

        let mut logs = BTreeMap::new();
        logs.insert(LOSS_KEY.to_string(), compiled.loss.value(y, &y_pred)?);
        for metric in &compiled.metrics {
            logs.insert(metric.name().to_string(), metric.compute(y, &y_pred)?);
        }
        Ok(logs)
    }
}

#[cfg(test)]
#[path = "sequential_tests.rs"]
mod tests;

//! sklearn-style regressor around a [`ModelFactory`].

use super::{History, RegressorConfig};
use crate::error::{NeuroregError, Result};
use crate::metrics::{self, Metric};
use crate::models::{DynamicRegressor, ModelFactory, ModelMeta};
use crate::nn::init::rng_from_seed;
use crate::nn::{Loss, Sequential, LOSS_KEY};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Neural-network regressor with a fit/predict/score API.
///
/// `fit` infers the data shape, asks the factory for a network, compiles it
/// with an MSE loss plus the configured metrics, and trains it. After every
/// epoch the loss and each metric are evaluated on the full training set
/// with the epoch's final weights and appended to [`History`]. The last
/// `r_squared` entry therefore equals `score` on the training data.
///
/// # Examples
///
/// ```
/// use neuroreg::prelude::*;
///
/// let x = Matrix::from_vec(8, 1, (0..8).map(f64::from).collect()).expect("8x1");
/// let y = Vector::from_vec((0..8).map(|i| 0.5 * f64::from(i)).collect());
///
/// let mut est = NeuralRegressor::new(DynamicRegressor::new(vec![16]))
///     .with_metrics(vec![Metric::RSquared])
///     .with_epochs(5)
///     .with_random_state(0);
/// est.fit(&x, &y).expect("valid data");
///
/// let score = est.score(&x, &y).expect("fitted");
/// let last = est.history().last("r_squared").expect("recorded");
/// assert!((score - last).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct NeuralRegressor<F: ModelFactory = DynamicRegressor> {
    factory: F,
    config: RegressorConfig,
    model: Option<Sequential>,
    meta: Option<ModelMeta>,
    history: History,
    rng: Option<StdRng>,
}

impl Default for NeuralRegressor<DynamicRegressor> {
    fn default() -> Self {
        Self::new(DynamicRegressor::default())
    }
}

impl<F: ModelFactory> NeuralRegressor<F> {
    /// Unfitted estimator with default hyperparameters.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            config: RegressorConfig::default(),
            model: None,
            meta: None,
            history: History::new(),
            rng: None,
        }
    }

    /// Replaces every hyperparameter at once.
    #[must_use]
    pub fn with_config(mut self, config: RegressorConfig) -> Self {
        self.config = config;
        self
    }

    /// Metrics recorded each epoch and reported by `evaluate`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.config.metrics = metrics;
        self
    }

    /// Epochs per `fit`.
    #[must_use]
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.config.epochs = epochs;
        self
    }

    /// Mini-batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Optimizer step size.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Optimizer algorithm.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: crate::nn::OptimizerKind) -> Self {
        self.config.optimizer = optimizer;
        self
    }

    /// SGD momentum coefficient.
    #[must_use]
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.config.momentum = momentum;
        self
    }

    /// Seed for weight initialization and shuffling.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.config.random_state = Some(seed);
        self
    }

    /// Shuffle sample order every epoch.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.config.shuffle = shuffle;
        self
    }

    /// Current hyperparameters.
    #[must_use]
    pub fn config(&self) -> &RegressorConfig {
        &self.config
    }

    /// The factory networks are built with.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// True once `fit` or `partial_fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// The trained network.
    #[must_use]
    pub fn model(&self) -> Option<&Sequential> {
        self.model.as_ref()
    }

    /// Shape facts inferred by the last fit.
    #[must_use]
    pub fn meta(&self) -> Option<&ModelMeta> {
        self.meta.as_ref()
    }

    /// Per-epoch loss and metric values.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Fits on a 2D target, one column per output.
    ///
    /// # Errors
    ///
    /// Same as [`Estimator::fit`].
    pub fn fit_multioutput(&mut self, x: &Matrix<f64>, y: &Matrix<f64>) -> Result<()> {
        self.train(x, y, 2, true, self.config.epochs)
    }

    /// Runs a single epoch, continuing from the current weights when the
    /// estimator is already fitted. History entries are appended.
    ///
    /// # Errors
    ///
    /// Same as [`Estimator::fit`], plus `DimensionMismatch` if the data
    /// shape differs from the one the model was built for.
    pub fn partial_fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        self.train(x, &Matrix::from_column(y), 1, false, 1)
    }

    /// Predicts every output column.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, and `DimensionMismatch` if `x`
    /// has the wrong number of features.
    pub fn predict_multioutput(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.model.as_ref().ok_or(NeuroregError::NotFitted)?.predict(x)
    }

    /// Uniform-average R² over output columns.
    ///
    /// # Errors
    ///
    /// Same as [`NeuralRegressor::predict_multioutput`], plus
    /// `DimensionMismatch` if `y` doesn't match the predictions.
    pub fn score_multioutput(&self, x: &Matrix<f64>, y: &Matrix<f64>) -> Result<f64> {
        let y_pred = self.predict_multioutput(x)?;
        metrics::r_squared_multioutput(y, &y_pred)
    }

    /// Loss and compiled metrics of the fitted network on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, and shape errors otherwise.
    pub fn evaluate(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<BTreeMap<String, f64>> {
        self.model
            .as_ref()
            .ok_or(NeuroregError::NotFitted)?
            .evaluate(x, &Matrix::from_column(y))
    }

    fn train(
        &mut self,
        x: &Matrix<f64>,
        y: &Matrix<f64>,
        target_ndim: usize,
        reset: bool,
        epochs: usize,
    ) -> Result<()> {
        self.config.validate()?;
        let (n_samples, n_features_in) = x.shape();
        if n_samples != y.n_rows() {
            return Err(NeuroregError::length_mismatch(n_samples, y.n_rows()));
        }
        if n_samples == 0 || n_features_in == 0 || y.n_cols() == 0 {
            return Err(NeuroregError::EmptyInput);
        }
        let meta = ModelMeta {
            n_features_in,
            n_outputs: y.n_cols(),
            target_ndim,
        };

        if reset || self.model.is_none() {
            self.initialize(meta)?;
        } else if let Some(existing) = self.meta {
            if (existing.n_features_in, existing.n_outputs) != (n_features_in, y.n_cols()) {
                return Err(NeuroregError::shape_mismatch(
                    (existing.n_features_in, existing.n_outputs),
                    (n_features_in, y.n_cols()),
                ));
            }
        }

        let (Some(model), Some(rng)) = (self.model.as_mut(), self.rng.as_mut()) else {
            return Err(NeuroregError::NotFitted);
        };

        log::info!(
            "training on {n_samples} samples x {n_features_in} features for {epochs} epoch(s), {} parameters",
            model.n_params()
        );

        let mut order: Vec<usize> = (0..n_samples).collect();
        for _ in 0..epochs {
            if self.config.shuffle {
                order.shuffle(rng);
            }
            for batch in order.chunks(self.config.batch_size) {
                let xb = x.select_rows(batch);
                let yb = y.select_rows(batch);
                model.train_on_batch(&xb, &yb)?;
            }

            let logs = model.evaluate(x, y)?;
            self.history.record(&logs);
            let epoch = self.history.n_epochs();
            if self.config.verbose {
                log::info!("epoch {epoch}: {}", format_logs(&logs));
            } else {
                log::debug!("epoch {epoch}: {}", format_logs(&logs));
            }
        }

        log::info!(
            "training finished, final loss {}",
            self.history.last(LOSS_KEY).unwrap_or(f64::NAN)
        );
        Ok(())
    }

    fn initialize(&mut self, meta: ModelMeta) -> Result<()> {
        let mut rng = rng_from_seed(self.config.random_state);
        let mut model = self.factory.build(&meta, &mut rng)?;
        if model.input_dim() != Some(meta.n_features_in)
            || model.output_dim() != Some(meta.n_outputs)
        {
            return Err(NeuroregError::DimensionMismatch {
                expected: format!(
                    "network mapping {} features to {} outputs",
                    meta.n_features_in, meta.n_outputs
                ),
                actual: format!(
                    "network mapping {:?} features to {:?} outputs",
                    model.input_dim(),
                    model.output_dim()
                ),
            });
        }
        model.compile(
            Loss::MeanSquaredError,
            self.config
                .optimizer
                .build(self.config.learning_rate, self.config.momentum),
            self.config.metrics.clone(),
        )?;

        self.model = Some(model);
        self.meta = Some(meta);
        self.rng = Some(rng);
        self.history.clear();
        Ok(())
    }
}

impl<F: ModelFactory> Estimator for NeuralRegressor<F> {
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        self.train(x, &Matrix::from_column(y), 1, true, self.config.epochs)
    }

    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        let y_pred = self.predict_multioutput(x)?;
        if y_pred.n_cols() != 1 {
            return Err(NeuroregError::DimensionMismatch {
                expected: "single-output estimator".to_string(),
                actual: format!("{} outputs, use predict_multioutput", y_pred.n_cols()),
            });
        }
        Ok(y_pred.column(0))
    }
}

fn format_logs(logs: &BTreeMap<String, f64>) -> String {
    logs.iter()
        .map(|(k, v)| format!("{k}={v:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "regressor_tests.rs"]
mod tests;

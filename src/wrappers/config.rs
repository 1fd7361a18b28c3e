//! Training configuration for [`NeuralRegressor`](super::NeuralRegressor).

use crate::error::{NeuroregError, Result};
use crate::metrics::Metric;
use crate::nn::OptimizerKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hyperparameters of a training run.
///
/// Missing fields fall back to [`RegressorConfig::default`], so a config file
/// only has to name what it changes.
///
/// # Examples
///
/// ```
/// use neuroreg::metrics::Metric;
/// use neuroreg::wrappers::RegressorConfig;
///
/// let config = RegressorConfig::from_json_str(
///     r#"{ "epochs": 10, "metrics": ["r_squared"], "random_state": 0 }"#,
/// )
/// .expect("valid config");
/// assert_eq!(config.epochs, 10);
/// assert_eq!(config.batch_size, 32);
/// assert_eq!(config.metrics, vec![Metric::RSquared]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegressorConfig {
    /// Passes over the training data per `fit`.
    pub epochs: usize,
    /// Samples per gradient step.
    pub batch_size: usize,
    /// Optimizer step size.
    pub learning_rate: f64,
    /// Optimizer algorithm.
    pub optimizer: OptimizerKind,
    /// Momentum coefficient for SGD, ignored by Adam.
    pub momentum: f64,
    /// Metrics recorded each epoch in addition to the loss.
    pub metrics: Vec<Metric>,
    /// Seed for weight init and shuffling; `None` draws from OS entropy.
    pub random_state: Option<u64>,
    /// Shuffle sample order every epoch.
    pub shuffle: bool,
    /// Log per-epoch progress at info level instead of debug.
    pub verbose: bool,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            epochs: 1,
            batch_size: 32,
            learning_rate: 0.001,
            optimizer: OptimizerKind::Adam,
            momentum: 0.0,
            metrics: Vec::new(),
            random_state: None,
            shuffle: true,
            verbose: false,
        }
    }
}

impl RegressorConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed JSON or unknown fields, and
    /// `InvalidHyperparameter` if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be read, otherwise as
    /// [`RegressorConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks hyperparameter constraints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` for zero epochs, zero batch size, a
    /// learning rate that isn't a positive finite number, or a momentum
    /// outside `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(NeuroregError::invalid_hyperparameter(
                "epochs",
                self.epochs,
                "> 0",
            ));
        }
        if self.batch_size == 0 {
            return Err(NeuroregError::invalid_hyperparameter(
                "batch_size",
                self.batch_size,
                "> 0",
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NeuroregError::invalid_hyperparameter(
                "learning_rate",
                self.learning_rate,
                "finite and > 0",
            ));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(NeuroregError::invalid_hyperparameter(
                "momentum",
                self.momentum,
                "in [0, 1)",
            ));
        }
        Ok(())
    }
}

//! Named metrics usable as training callbacks.
//!
//! A [`Metric`] is what the network evaluates after every epoch and what
//! the training history is keyed by.

use super::{
    mae_unchecked, mse_unchecked, per_column_average, r_squared_unchecked, rmse_unchecked,
};
use crate::error::{NeuroregError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A regression metric identified by name.
///
/// # Examples
///
/// ```
/// use neuroreg::metrics::Metric;
///
/// let metric: Metric = "r2".parse().expect("known alias");
/// assert_eq!(metric, Metric::RSquared);
/// assert_eq!(metric.name(), "r_squared");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Coefficient of determination, see [`super::r_squared`].
    RSquared,
    /// Mean squared error.
    MeanSquaredError,
    /// Mean absolute error.
    MeanAbsoluteError,
    /// Root mean squared error.
    RootMeanSquaredError,
}

impl Metric {
    /// All supported metrics.
    pub const ALL: [Metric; 4] = [
        Metric::RSquared,
        Metric::MeanSquaredError,
        Metric::MeanAbsoluteError,
        Metric::RootMeanSquaredError,
    ];

    /// Key under which the metric is recorded in histories and evaluations.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::RSquared => "r_squared",
            Metric::MeanSquaredError => "mean_squared_error",
            Metric::MeanAbsoluteError => "mean_absolute_error",
            Metric::RootMeanSquaredError => "root_mean_squared_error",
        }
    }

    /// Evaluates the metric on `(n_samples, n_outputs)` targets.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the shapes differ, `EmptyInput` if
    /// there are no samples.
    pub fn compute(self, y_true: &Matrix<f64>, y_pred: &Matrix<f64>) -> Result<f64> {
        let f: fn(&[f64], &[f64]) -> f64 = match self {
            Metric::RSquared => r_squared_unchecked,
            Metric::MeanSquaredError => mse_unchecked,
            Metric::MeanAbsoluteError => mae_unchecked,
            Metric::RootMeanSquaredError => rmse_unchecked,
        };
        per_column_average(y_true, y_pred, f)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = NeuroregError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r_squared" | "r2" | "r2_score" => Ok(Metric::RSquared),
            "mean_squared_error" | "mse" => Ok(Metric::MeanSquaredError),
            "mean_absolute_error" | "mae" => Ok(Metric::MeanAbsoluteError),
            "root_mean_squared_error" | "rmse" => Ok(Metric::RootMeanSquaredError),
            _ => Err(NeuroregError::UnknownMetric(s.to_string())),
        }
    }
}

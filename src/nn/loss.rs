//! Training losses.

use crate::error::{NeuroregError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Loss minimized during training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// Mean of squared errors over every sample and output.
    #[default]
    MeanSquaredError,
}

impl Loss {
    /// Loss value for a batch.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the shapes differ, `EmptyInput` for an
    /// empty batch.
    pub fn value(self, y_true: &Matrix<f64>, y_pred: &Matrix<f64>) -> Result<f64> {
        check(y_true, y_pred)?;
        match self {
            Loss::MeanSquaredError => {
                let n = y_true.as_slice().len() as f64;
                let sum: f64 = y_true
                    .as_slice()
                    .iter()
                    .zip(y_pred.as_slice())
                    .map(|(t, p)| (p - t).powi(2))
                    .sum();
                Ok(sum / n)
            }
        }
    }

    /// Gradient of [`Loss::value`] with respect to `y_pred`.
    ///
    /// # Errors
    ///
    /// Same as [`Loss::value`].
    pub fn gradient(self, y_true: &Matrix<f64>, y_pred: &Matrix<f64>) -> Result<Matrix<f64>> {
        check(y_true, y_pred)?;
        match self {
            Loss::MeanSquaredError => {
                let scale = 2.0 / y_true.as_slice().len() as f64;
                let (rows, cols) = y_pred.shape();
                let data = y_true
                    .as_slice()
                    .iter()
                    .zip(y_pred.as_slice())
                    .map(|(t, p)| scale * (p - t))
                    .collect();
                Matrix::from_vec(rows, cols, data)
            }
        }
    }
}

fn check(y_true: &Matrix<f64>, y_pred: &Matrix<f64>) -> Result<()> {
    if y_true.shape() != y_pred.shape() {
        return Err(NeuroregError::shape_mismatch(y_true.shape(), y_pred.shape()));
    }
    if y_true.as_slice().is_empty() {
        return Err(NeuroregError::EmptyInput);
    }
    Ok(())
}

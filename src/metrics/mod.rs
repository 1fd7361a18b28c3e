//! Evaluation metrics for regression models.
//!
//! Includes the coefficient of determination (R²) plus MSE, MAE and RMSE.
//! Every function takes `(y_true, y_pred)` in that order and reduces along
//! the sample axis. Multi-output targets are scored per column and the
//! per-column values are averaged uniformly.

pub mod metric;

pub use metric::Metric;

use crate::error::{NeuroregError, Result};
use crate::primitives::{Matrix, Vector};

/// R² reported when the ground truth has zero variance (`SS_tot == 0`).
///
/// The ratio `SS_res / SS_tot` is undefined there. The value is 0.0 whether
/// or not the predictions are also exact, i.e. a constant target is scored
/// the same as predicting its mean.
pub const DEGENERATE_R2: f64 = 0.0;

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// where `SS_res` is the residual sum of squares and `SS_tot` is the total
/// sum of squares around the mean of `y_true`. The mean is computed in a
/// first pass and deviations in a second, so large offsets do not cancel.
///
/// If `y_true` is constant, returns [`DEGENERATE_R2`].
///
/// # Examples
///
/// ```
/// use neuroreg::metrics::r_squared;
/// use neuroreg::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_true, &y_pred).expect("lengths match");
/// assert!((r2 - 0.948_608_137).abs() < 1e-6);
/// ```
///
/// # Errors
///
/// Returns `DimensionMismatch` if the lengths differ, `EmptyInput` if both
/// are empty.
pub fn r_squared(y_true: &Vector<f64>, y_pred: &Vector<f64>) -> Result<f64> {
    check_pair(y_true.len(), y_pred.len())?;
    Ok(r_squared_unchecked(y_true.as_slice(), y_pred.as_slice()))
}

/// R² for 2D targets: per-column R², uniformly averaged.
///
/// A single-column matrix gives exactly the same value as [`r_squared`]
/// on that column.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the shapes differ, `EmptyInput` if there
/// are no rows or no columns.
pub fn r_squared_multioutput(y_true: &Matrix<f64>, y_pred: &Matrix<f64>) -> Result<f64> {
    per_column_average(y_true, y_pred, r_squared_unchecked)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true - y_pred)²`
///
/// # Errors
///
/// Returns `DimensionMismatch` if the lengths differ, `EmptyInput` if both
/// are empty.
pub fn mse(y_true: &Vector<f64>, y_pred: &Vector<f64>) -> Result<f64> {
    check_pair(y_true.len(), y_pred.len())?;
    Ok(mse_unchecked(y_true.as_slice(), y_pred.as_slice()))
}

/// Computes the Mean Absolute Error (MAE).
///
/// MAE = (1/n) * `Σ|y_true - y_pred|`
///
/// # Errors
///
/// Returns `DimensionMismatch` if the lengths differ, `EmptyInput` if both
/// are empty.
pub fn mae(y_true: &Vector<f64>, y_pred: &Vector<f64>) -> Result<f64> {
    check_pair(y_true.len(), y_pred.len())?;
    Ok(mae_unchecked(y_true.as_slice(), y_pred.as_slice()))
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt(MSE)
///
/// # Errors
///
/// Same as [`mse`].
pub fn rmse(y_true: &Vector<f64>, y_pred: &Vector<f64>) -> Result<f64> {
    mse(y_true, y_pred).map(f64::sqrt)
}

fn check_pair(n_true: usize, n_pred: usize) -> Result<()> {
    if n_true != n_pred {
        return Err(NeuroregError::length_mismatch(n_true, n_pred));
    }
    if n_true == 0 {
        return Err(NeuroregError::EmptyInput);
    }
    Ok(())
}

/// Applies a 1D metric to each column and averages the results.
pub(crate) fn per_column_average(
    y_true: &Matrix<f64>,
    y_pred: &Matrix<f64>,
    metric: fn(&[f64], &[f64]) -> f64,
) -> Result<f64> {
    if y_true.shape() != y_pred.shape() {
        return Err(NeuroregError::shape_mismatch(y_true.shape(), y_pred.shape()));
    }
    let (n_rows, n_cols) = y_true.shape();
    if n_rows == 0 || n_cols == 0 {
        return Err(NeuroregError::EmptyInput);
    }
    if n_cols == 1 {
        return Ok(metric(y_true.as_slice(), y_pred.as_slice()));
    }

    let total: f64 = (0..n_cols)
        .map(|col| {
            let t = y_true.column(col);
            let p = y_pred.column(col);
            metric(t.as_slice(), p.as_slice())
        })
        .sum();
    Ok(total / n_cols as f64)
}

pub(crate) fn r_squared_unchecked(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len() as f64;
    let y_mean = y_true.iter().sum::<f64>() / n;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        log::warn!(
            "R² is undefined for constant y_true (ss_res = {ss_res}), returning {DEGENERATE_R2}"
        );
        return DEGENERATE_R2;
    }

    1.0 - ss_res / ss_tot
}

pub(crate) fn mse_unchecked(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let sum_sq_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    sum_sq_error / y_true.len() as f64
}

pub(crate) fn mae_unchecked(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let sum_abs_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();
    sum_abs_error / y_true.len() as f64
}

pub(crate) fn rmse_unchecked(y_true: &[f64], y_pred: &[f64]) -> f64 {
    mse_unchecked(y_true, y_pred).sqrt()
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_regression_contract.rs"]
mod tests_regression_contract;

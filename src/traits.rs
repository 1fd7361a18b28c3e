//! Core traits for ML estimators.
//!
//! These traits define the API contracts for all regressors.

use crate::error::Result;
use crate::metrics::r_squared;
use crate::primitives::{Matrix, Vector};

/// Primary trait for supervised regression estimators.
///
/// Estimators implement fit/predict/score following sklearn conventions.
///
/// # Examples
///
/// ```
/// use neuroreg::prelude::*;
///
/// // Mean predictor: always predicts the training mean.
/// struct MeanRegressor(Option<f64>);
///
/// impl Estimator for MeanRegressor {
///     fn fit(&mut self, _x: &Matrix<f64>, y: &Vector<f64>) -> neuroreg::Result<()> {
///         self.0 = Some(y.mean());
///         Ok(())
///     }
///
///     fn predict(&self, x: &Matrix<f64>) -> neuroreg::Result<Vector<f64>> {
///         let mean = self.0.ok_or(NeuroregError::NotFitted)?;
///         Ok(Vector::from_vec(vec![mean; x.n_rows()]))
///     }
/// }
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = MeanRegressor(None);
/// model.fit(&x, &y).unwrap();
/// assert!(model.score(&x, &y).unwrap().abs() < 1e-12);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, invalid
    /// hyperparameters, empty input).
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()>;

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or `x` has the wrong shape.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>>;

    /// Computes the R² of `predict(x)` against `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if prediction fails or the lengths differ.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        r_squared(y, &y_pred)
    }
}

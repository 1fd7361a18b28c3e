//! Neuroreg: neural-network regression with an sklearn-style API.
//!
//! Neuroreg wraps a small feed-forward network in a fit/predict/score
//! estimator and ships a coefficient of determination (R²) that gives the
//! same value as a training-time metric, in `evaluate`, and in `score`.
//!
//! # Quick Start
//!
//! ```
//! use neuroreg::prelude::*;
//!
//! let y_true = Vector::from_slice(&[0.0, 1.0, 2.0, 3.0]);
//! let y_pred = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
//! let r2 = r_squared(&y_true, &y_pred).unwrap();
//! assert!((r2 - 0.2).abs() < 1e-12);
//!
//! // Train a regressor that records R² every epoch
//! let x = Matrix::from_column(&y_true);
//! let mut est = NeuralRegressor::new(DynamicRegressor::default())
//!     .with_metrics(vec![Metric::RSquared])
//!     .with_epochs(10)
//!     .with_random_state(0);
//! est.fit(&x, &y_true).unwrap();
//!
//! let score = est.score(&x, &y_true).unwrap();
//! let last = est.history().last("r_squared").unwrap();
//! assert!((score - last).abs() < 1e-3);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`metrics`]: R², MSE, MAE, RMSE and named [`metrics::Metric`] callbacks
//! - [`nn`]: Dense layers, losses, optimizers and the `Sequential` container
//! - [`models`]: Network factories sized from the training data
//! - [`wrappers`]: The [`wrappers::NeuralRegressor`] estimator, its config
//!   and training history

pub mod error;
pub mod metrics;
pub mod models;
pub mod nn;
pub mod prelude;
pub mod primitives;
pub mod traits;
pub mod wrappers;

pub use error::{NeuroregError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::Estimator;

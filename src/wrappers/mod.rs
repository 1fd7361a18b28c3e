//! sklearn-compatible estimator wrappers around neural networks.
//!
//! [`NeuralRegressor`] owns the training loop: it sizes the network from the
//! data through a [`ModelFactory`](crate::models::ModelFactory), records
//! per-epoch [`History`], and scores with R².

mod config;
mod history;
mod regressor;

pub use config::RegressorConfig;
pub use history::History;
pub use regressor::NeuralRegressor;

//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use neuroreg::prelude::*;
//! ```

pub use crate::error::{NeuroregError, Result};
pub use crate::metrics::{mae, mse, r_squared, r_squared_multioutput, rmse, Metric};
pub use crate::models::{DynamicRegressor, ModelFactory, ModelMeta};
pub use crate::nn::{OptimizerKind, Sequential};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::Estimator;
pub use crate::wrappers::{History, NeuralRegressor, RegressorConfig};

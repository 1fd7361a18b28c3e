//! Multi-layer perceptron factories.

use crate::error::{NeuroregError, Result};
use crate::nn::{Activation, Dense, Sequential};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Data-dependent facts a factory needs to size the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Number of input features (columns of X).
    pub n_features_in: usize,
    /// Number of regression targets (columns of y).
    pub n_outputs: usize,
    /// 1 for a vector target, 2 for a matrix target.
    pub target_ndim: usize,
}

/// Builds an uncompiled network for the given data shape.
///
/// Implemented for any `Fn(&ModelMeta, &mut StdRng) -> Result<Sequential>`,
/// so a closure can stand in for a factory type.
///
/// # Examples
///
/// ```
/// use neuroreg::models::{ModelFactory, ModelMeta};
/// use neuroreg::nn::{Activation, Dense, Sequential};
/// use neuroreg::nn::init::rng_from_seed;
/// use rand::rngs::StdRng;
///
/// let linear = |meta: &ModelMeta, rng: &mut StdRng| -> neuroreg::Result<Sequential> {
///     let mut model = Sequential::new();
///     model.add(Dense::new(meta.n_features_in, meta.n_outputs, Activation::Linear, rng))?;
///     Ok(model)
/// };
/// let meta = ModelMeta { n_features_in: 3, n_outputs: 1, target_ndim: 1 };
/// let model = linear.build(&meta, &mut rng_from_seed(Some(0))).expect("valid meta");
/// assert_eq!(model.n_params(), 4);
/// ```
pub trait ModelFactory {
    /// Creates the network. Randomness must come from `rng` only.
    ///
    /// # Errors
    ///
    /// Returns an error if the network cannot be built for `meta`.
    fn build(&self, meta: &ModelMeta, rng: &mut StdRng) -> Result<Sequential>;
}

impl<F> ModelFactory for F
where
    F: Fn(&ModelMeta, &mut StdRng) -> Result<Sequential>,
{
    fn build(&self, meta: &ModelMeta, rng: &mut StdRng) -> Result<Sequential> {
        self(meta, rng)
    }
}

/// MLP whose input and output widths follow the data.
///
/// Hidden layers use ReLU, the output layer is linear with `n_outputs`
/// units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicRegressor {
    /// Width of each hidden layer, input side first.
    pub hidden_layer_sizes: Vec<usize>,
}

impl Default for DynamicRegressor {
    fn default() -> Self {
        Self {
            hidden_layer_sizes: vec![100],
        }
    }
}

impl DynamicRegressor {
    /// Factory with the given hidden layer widths.
    #[must_use]
    pub fn new(hidden_layer_sizes: Vec<usize>) -> Self {
        Self { hidden_layer_sizes }
    }
}

impl ModelFactory for DynamicRegressor {
    fn build(&self, meta: &ModelMeta, rng: &mut StdRng) -> Result<Sequential> {
        if meta.n_features_in == 0 || meta.n_outputs == 0 {
            return Err(NeuroregError::EmptyInput);
        }
        if let Some(pos) = self.hidden_layer_sizes.iter().position(|&w| w == 0) {
            return Err(NeuroregError::invalid_hyperparameter(
                &format!("hidden_layer_sizes[{pos}]"),
                0,
                "> 0",
            ));
        }

        let mut model = Sequential::new();
        let mut width = meta.n_features_in;
        for &size in &self.hidden_layer_sizes {
            model.add(Dense::new(width, size, Activation::Relu, rng))?;
            width = size;
        }
        model.add(Dense::new(width, meta.n_outputs, Activation::Linear, rng))?;
        Ok(model)
    }
}

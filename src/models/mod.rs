//! Model-construction helpers.
//!
//! Estimators don't know the shape of the network they train. They infer a
//! [`ModelMeta`] from the training data and hand it to a [`ModelFactory`],
//! which returns an uncompiled [`Sequential`](crate::nn::Sequential).

mod mlp;

pub use mlp::{DynamicRegressor, ModelFactory, ModelMeta};

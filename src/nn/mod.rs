//! Feed-forward neural network building blocks.
//!
//! The network is a stack of fully connected [`Dense`] layers trained by
//! explicit backpropagation:
//!
//! - **Layers**: [`Dense`] with an element-wise [`Activation`]
//! - **Loss**: [`Loss`] (mean squared error)
//! - **Optimizers**: [`Sgd`], [`Adam`] behind the [`Optimizer`] trait
//! - **Container**: [`Sequential`], with Keras-style `compile`,
//!   `train_on_batch` and `evaluate`
//!
//! # Example
//!
//! ```
//! use neuroreg::nn::{Activation, Dense, Loss, OptimizerKind, Sequential};
//! use neuroreg::nn::init::rng_from_seed;
//! use neuroreg::primitives::Matrix;
//!
//! let mut rng = rng_from_seed(Some(0));
//! let mut model = Sequential::new();
//! model.add(Dense::new(1, 8, Activation::Relu, &mut rng)).expect("first layer");
//! model.add(Dense::new(8, 1, Activation::Linear, &mut rng)).expect("widths chain");
//! model
//!     .compile(Loss::MeanSquaredError, OptimizerKind::Adam.build(0.01, 0.0), Vec::new())
//!     .expect("non-empty model");
//!
//! let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 2.0, 3.0]).expect("4x1");
//! let y = Matrix::from_vec(4, 1, vec![1.0, 3.0, 5.0, 7.0]).expect("4x1");
//! let first = model.train_on_batch(&x, &y).expect("shapes match");
//! assert!(first.is_finite());
//! ```
//!
//! # References
//!
//! - Glorot, X., & Bengio, Y. (2010). Understanding the difficulty of training
//!   deep feedforward neural networks. AISTATS.
//! - Kingma, D. P., & Ba, J. (2015). Adam: A method for stochastic
//!   optimization. ICLR.

mod activation;
mod dense;
pub mod init;
mod loss;
pub mod optim;
mod sequential;

pub use activation::Activation;
pub use dense::Dense;
pub use loss::Loss;
pub use optim::{Adam, Optimizer, OptimizerKind, Sgd};
pub use sequential::{Sequential, LOSS_KEY};

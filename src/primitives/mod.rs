//! Core compute primitives (Vector, Matrix).
//!
//! These types carry samples, targets and layer parameters through the
//! metrics and the network.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;

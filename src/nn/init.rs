//! Weight initialization and seeded random sources.
//!
//! # References
//!
//! - Glorot, X., & Bengio, Y. (2010). Understanding the difficulty of training
//!   deep feedforward neural networks. AISTATS.

use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Returns a seeded generator, or one seeded from OS entropy for `None`.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Xavier uniform initialization (Glorot & Bengio, 2010).
///
/// Samples a `fan_in x fan_out` matrix from U(-a, a) where
/// a = sqrt(6 / (`fan_in` + `fan_out`)).
#[must_use]
pub fn xavier_uniform(fan_in: usize, fan_out: usize, rng: &mut StdRng) -> Matrix<f64> {
    let a = (6.0 / (fan_in + fan_out) as f64).sqrt();
    uniform(fan_in, fan_out, -a, a, rng)
}

/// Uniform distribution initialization over [low, high).
pub(crate) fn uniform(
    rows: usize,
    cols: usize,
    low: f64,
    high: f64,
    rng: &mut StdRng,
) -> Matrix<f64> {
    let mut m = Matrix::zeros(rows, cols);
    for v in m.as_mut_slice() {
        *v = rng.gen_range(low..high);
    }
    m
}

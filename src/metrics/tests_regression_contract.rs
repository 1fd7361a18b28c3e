// =========================================================================
// FALSIFY-MR: regression metrics contract (R², MSE)
//
// Each test is designed to FAIL if the stated property is false.
//
// References:
//   - sklearn.metrics.r2_score (uniform_average, force_finite=False)
// =========================================================================

use super::*;
use crate::primitives::Vector;

fn wave(n: usize, seed: u32, phase: f64) -> Vector<f64> {
    let data: Vec<f64> = (0..n)
        .map(|i| ((i as f64 + f64::from(seed) + phase) * 0.37).sin() * 10.0 + 5.0)
        .collect();
    Vector::from_vec(data)
}

/// FALSIFY-MR-001: R² = 1.0 for perfect predictions
#[test]
fn falsify_mr_001_r2_perfect() {
    let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);

    let r2 = r_squared(&y, &y).expect("same length");
    assert!(
        (r2 - 1.0).abs() < 1e-12,
        "FALSIFIED MR-001: R²={r2} for perfect predictions, expected 1.0"
    );
}

/// FALSIFY-MR-002: R² ≤ 1.0 always
#[test]
fn falsify_mr_002_r2_upper_bound() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y_pred = Vector::from_slice(&[1.1, 2.2, 2.8, 4.1, 4.9]);

    let r2 = r_squared(&y_true, &y_pred).expect("same length");
    assert!(r2 <= 1.0, "FALSIFIED MR-002: R²={r2} > 1.0");
}

/// FALSIFY-MR-003: R² < 0 when predictions are worse than the mean
#[test]
fn falsify_mr_003_r2_negative_for_bad_predictions() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y_pred = Vector::from_slice(&[10.0, 20.0, 30.0, 40.0, 50.0]);

    let r2 = r_squared(&y_true, &y_pred).expect("same length");
    assert!(
        r2 < 0.0,
        "FALSIFIED MR-003: R²={r2} >= 0 for terrible predictions (expected negative)"
    );
}

/// FALSIFY-MR-004: R² is bit-identical across calls
#[test]
fn falsify_mr_004_r2_deterministic() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y_pred = Vector::from_slice(&[1.3, 1.7, 3.4, 3.9, 5.5]);

    let r2_1 = r_squared(&y_true, &y_pred).expect("same length");
    let r2_2 = r_squared(&y_true, &y_pred).expect("same length");
    assert_eq!(
        r2_1.to_bits(),
        r2_2.to_bits(),
        "FALSIFIED MR-004: R² differs on same input"
    );
}

/// FALSIFY-MR-005: R² is not symmetric in its arguments
#[test]
fn falsify_mr_005_r2_asymmetric() {
    let a = Vector::from_slice(&[0.0, 1.0, 2.0, 3.0]);
    let b = Vector::from_slice(&[0.0, 2.0, 4.0, 6.0]);

    let ab = r_squared(&a, &b).expect("same length");
    let ba = r_squared(&b, &a).expect("same length");
    assert!(
        (ab - ba).abs() > 1e-6,
        "FALSIFIED MR-005: R²(a,b)={ab} == R²(b,a)={ba}"
    );
}

mod mr_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// FALSIFY-MR-001-prop: Perfect predictions → R² = 1.0
        #[test]
        fn falsify_mr_001_prop_r2_perfect(
            n in 3..=20usize,
            seed in 0..500u32,
        ) {
            let y = wave(n, seed, 0.0);
            let r2 = r_squared(&y, &y).expect("same length");
            prop_assert!(
                (r2 - 1.0).abs() < 1e-12,
                "FALSIFIED MR-001-prop: R²={} for perfect predictions",
                r2
            );
        }

        /// FALSIFY-MR-002-prop: R² ≤ 1.0 for any predictions
        #[test]
        fn falsify_mr_002_prop_r2_upper_bound(
            n in 3..=20usize,
            seed in 0..500u32,
        ) {
            let yt = wave(n, seed, 0.0);
            let yp = wave(n, seed, 1.0);
            let r2 = r_squared(&yt, &yp).expect("same length");
            prop_assert!(r2 <= 1.0, "FALSIFIED MR-002-prop: R²={} > 1.0", r2);
        }

        /// FALSIFY-MR-006-prop: R² = 1 - MSE / Var(y_true)
        #[test]
        fn falsify_mr_006_prop_r2_mse_identity(
            y_true in prop::collection::vec(-1e3f64..1e3, 2..40),
            noise in prop::collection::vec(-10.0f64..10.0, 40),
        ) {
            let n = y_true.len();
            let y_pred: Vec<f64> = y_true.iter().zip(&noise).map(|(t, e)| t + e).collect();
            let yt = Vector::from_vec(y_true);
            let yp = Vector::from_vec(y_pred);

            let mean = yt.mean();
            let var = yt.as_slice().iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
            prop_assume!(var > 1e-9);

            let r2 = r_squared(&yt, &yp).expect("same length");
            let mse = mse(&yt, &yp).expect("same length");
            prop_assert!(
                (r2 - (1.0 - mse / var)).abs() < 1e-9 * (1.0 + (mse / var).abs()),
                "FALSIFIED MR-006-prop: R²={} vs 1 - MSE/Var={}",
                r2,
                1.0 - mse / var
            );
        }

        /// FALSIFY-MR-007-prop: mismatched lengths are always rejected
        #[test]
        fn falsify_mr_007_prop_length_mismatch(
            n in 1..=30usize,
            extra in 1..=5usize,
        ) {
            let yt = Vector::from_vec(vec![1.0; n]);
            let yp = Vector::from_vec(vec![1.0; n + extra]);
            let is_mismatch = matches!(
                r_squared(&yt, &yp),
                Err(NeuroregError::DimensionMismatch { .. })
            );
            prop_assert!(is_mismatch);
        }
    }
}

pub(crate) use super::*;
use crate::nn::{Activation, Dense, OptimizerKind};

fn line(n: usize) -> (Matrix<f64>, Vector<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 1.0).collect();
    (
        Matrix::from_vec(n, 1, xs).expect("n x 1"),
        Vector::from_vec(ys),
    )
}

fn small() -> NeuralRegressor {
    NeuralRegressor::new(DynamicRegressor::new(vec![16]))
        .with_metrics(vec![Metric::RSquared])
        .with_random_state(0)
}

#[test]
fn test_unfitted() {
    let est = small();
    let (x, y) = line(10);
    assert!(!est.is_fitted());
    assert!(est.model().is_none());
    assert!(matches!(est.predict(&x), Err(NeuroregError::NotFitted)));
    assert!(matches!(est.score(&x, &y), Err(NeuroregError::NotFitted)));
    assert!(matches!(est.evaluate(&x, &y), Err(NeuroregError::NotFitted)));
}

#[test]
fn test_fit_records_one_entry_per_epoch() {
    let mut est = small().with_epochs(4);
    let (x, y) = line(40);
    est.fit(&x, &y).expect("valid data");

    let history = est.history();
    assert_eq!(history.n_epochs(), 4);
    assert_eq!(history.keys().collect::<Vec<_>>(), vec!["loss", "r_squared"]);
    assert_eq!(history["r_squared"].len(), 4);
    assert_eq!(
        est.meta(),
        Some(&ModelMeta {
            n_features_in: 1,
            n_outputs: 1,
            target_ndim: 1
        })
    );
}

#[test]
fn test_score_matches_last_history_entry() {
    let mut est = small().with_epochs(3);
    let (x, y) = line(50);
    est.fit(&x, &y).expect("valid data");

    let score = est.score(&x, &y).expect("fitted");
    let last = est.history().last("r_squared").expect("recorded");
    let evaluated = est.evaluate(&x, &y).expect("fitted")["r_squared"];
    assert_eq!(score.to_bits(), last.to_bits());
    assert_eq!(score.to_bits(), evaluated.to_bits());
}

#[test]
fn test_learns_a_line() {
    let mut est = small().with_epochs(300).with_learning_rate(0.01);
    let (x, y) = line(64);
    est.fit(&x, &y).expect("valid data");

    let r2 = est.score(&x, &y).expect("fitted");
    assert!(r2 > 0.9, "r2 = {r2}");
    let losses = est.history().get("loss").expect("recorded");
    assert!(losses[losses.len() - 1] < losses[0]);
}

#[test]
fn test_same_seed_is_reproducible() {
    let (x, y) = line(30);
    let mut a = small().with_epochs(3);
    let mut b = small().with_epochs(3);
    a.fit(&x, &y).expect("valid data");
    b.fit(&x, &y).expect("valid data");

    assert_eq!(a.history(), b.history());
    assert_eq!(
        a.predict(&x).expect("fitted"),
        b.predict(&x).expect("fitted")
    );
}

#[test]
fn test_different_seed_differs() {
    let (x, y) = line(30);
    let mut a = small().with_epochs(2);
    let mut b = small().with_epochs(2).with_random_state(1);
    a.fit(&x, &y).expect("valid data");
    b.fit(&x, &y).expect("valid data");
    assert_ne!(a.history(), b.history());
}

#[test]
fn test_refit_resets_history() {
    let (x, y) = line(20);
    let mut est = small().with_epochs(2);
    est.fit(&x, &y).expect("valid data");
    est.fit(&x, &y).expect("valid data");
    assert_eq!(est.history().n_epochs(), 2);
}

#[test]
fn test_partial_fit_appends() {
    let (x, y) = line(20);
    let mut est = small().with_epochs(2);
    est.partial_fit(&x, &y).expect("first call initializes");
    assert!(est.is_fitted());
    assert_eq!(est.history().n_epochs(), 1);
    est.partial_fit(&x, &y).expect("continues");
    assert_eq!(est.history().n_epochs(), 2);
}

#[test]
fn test_partial_fit_shape_change_rejected() {
    let (x, y) = line(20);
    let mut est = small();
    est.fit(&x, &y).expect("valid data");

    let x2 = Matrix::<f64>::zeros(20, 2);
    let err = est.partial_fit(&x2, &y).unwrap_err();
    assert!(matches!(err, NeuroregError::DimensionMismatch { .. }));
}

#[test]
fn test_length_mismatch() {
    let (x, _) = line(20);
    let y = Vector::from_vec(vec![0.0; 19]);
    let mut est = small();
    assert!(matches!(
        est.fit(&x, &y),
        Err(NeuroregError::DimensionMismatch { .. })
    ));
    assert!(!est.is_fitted());
}

#[test]
fn test_empty_input() {
    let x = Matrix::<f64>::zeros(0, 1);
    let y = Vector::from_vec(Vec::new());
    assert!(matches!(small().fit(&x, &y), Err(NeuroregError::EmptyInput)));
}

#[test]
fn test_invalid_config() {
    let (x, y) = line(10);
    let mut est = small().with_batch_size(0);
    assert!(matches!(
        est.fit(&x, &y),
        Err(NeuroregError::InvalidHyperparameter { .. })
    ));
}

#[test]
fn test_predict_wrong_width() {
    let (x, y) = line(10);
    let mut est = small();
    est.fit(&x, &y).expect("valid data");
    let wide = Matrix::<f64>::zeros(3, 2);
    assert!(matches!(
        est.predict(&wide),
        Err(NeuroregError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_multioutput() {
    let n = 32;
    let xs: Vec<f64> = (0..n).map(|i| f64::from(i) / 32.0).collect();
    let mut ys = Vec::with_capacity(2 * n as usize);
    for &x in &xs {
        ys.push(x);
        ys.push(1.0 - 2.0 * x);
    }
    let x = Matrix::from_vec(32, 1, xs).expect("32x1");
    let y = Matrix::from_vec(32, 2, ys).expect("32x2");

    let mut est = small()
        .with_metrics(vec![Metric::RSquared, Metric::MeanSquaredError])
        .with_epochs(3);
    est.fit_multioutput(&x, &y).expect("valid data");

    assert_eq!(est.meta().map(|m| m.target_ndim), Some(2));
    assert_eq!(est.predict_multioutput(&x).expect("fitted").shape(), (32, 2));
    assert!(matches!(
        est.predict(&x),
        Err(NeuroregError::DimensionMismatch { .. })
    ));

    let score = est.score_multioutput(&x, &y).expect("fitted");
    let last = est.history().last("r_squared").expect("recorded");
    assert_eq!(score.to_bits(), last.to_bits());
}

#[test]
fn test_closure_factory() {
    let linear = |meta: &ModelMeta, rng: &mut StdRng| -> Result<Sequential> {
        let mut model = Sequential::new();
        model.add(Dense::new(
            meta.n_features_in,
            meta.n_outputs,
            Activation::Linear,
            rng,
        ))?;
        Ok(model)
    };
    let mut est = NeuralRegressor::new(linear)
        .with_optimizer(OptimizerKind::Sgd)
        .with_learning_rate(0.3)
        .with_epochs(300)
        .with_random_state(5);
    let (x, y) = line(16);
    est.fit(&x, &y).expect("valid data");
    assert!(est.score(&x, &y).expect("fitted") > 0.99);
}

#[test]
fn test_sgd_momentum() {
    let linear = |meta: &ModelMeta, rng: &mut StdRng| -> Result<Sequential> {
        let mut model = Sequential::new();
        model.add(Dense::new(
            meta.n_features_in,
            meta.n_outputs,
            Activation::Linear,
            rng,
        ))?;
        Ok(model)
    };
    let (x, y) = line(16);
    let fit_with = |momentum: f64, epochs: usize| {
        let mut est = NeuralRegressor::new(linear)
            .with_optimizer(OptimizerKind::Sgd)
            .with_learning_rate(0.05)
            .with_momentum(momentum)
            .with_epochs(epochs)
            .with_random_state(5);
        est.fit(&x, &y).expect("valid data");
        est
    };

    let plain = fit_with(0.0, 3);
    let heavy = fit_with(0.9, 3);
    assert_ne!(plain.history(), heavy.history());

    let trained = fit_with(0.9, 300);
    assert!(trained.score(&x, &y).expect("fitted") > 0.99);
}

#[test]
fn test_invalid_momentum_rejected() {
    let (x, y) = line(8);
    let mut est = small().with_momentum(1.5);
    assert!(matches!(
        est.fit(&x, &y),
        Err(NeuroregError::InvalidHyperparameter { .. })
    ));
}

#[test]
fn test_factory_with_wrong_output_width() {
    let wrong = |meta: &ModelMeta, rng: &mut StdRng| -> Result<Sequential> {
        let mut model = Sequential::new();
        model.add(Dense::new(meta.n_features_in, 3, Activation::Linear, rng))?;
        Ok(model)
    };
    let (x, y) = line(8);
    let err = NeuralRegressor::new(wrong).fit(&x, &y).unwrap_err();
    assert!(matches!(err, NeuroregError::DimensionMismatch { .. }));
}

#[test]
fn test_with_config() {
    let config = RegressorConfig {
        epochs: 2,
        metrics: vec![Metric::MeanAbsoluteError],
        random_state: Some(1),
        ..RegressorConfig::default()
    };
    let mut est = NeuralRegressor::<DynamicRegressor>::default().with_config(config.clone());
    assert_eq!(est.config(), &config);
    assert_eq!(est.factory().hidden_layer_sizes, vec![100]);

    let (x, y) = line(10);
    est.fit(&x, &y).expect("valid data");
    assert_eq!(
        est.history().keys().collect::<Vec<_>>(),
        vec!["loss", "mean_absolute_error"]
    );
}

use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::classifier::{LogisticParams, LogisticRegression};
use crate::dataset::{RawRecord, WeatherSample};
use crate::error::TrainError;
use crate::evaluation::{evaluate, ThresholdMetrics};
use crate::model::TrainedBundle;
use crate::preprocess::{impute_means, remove_outliers, train_test_split, Split};
use crate::scaler::StandardScaler;

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub test_fraction: f64,
    pub seed: u64,
    pub classifier: LogisticParams,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            classifier: LogisticParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub loaded_rows: usize,
    pub cleaned_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub scaler: StandardScaler,
    pub intercept: f64,
    pub coefficients: [f64; 3],
    pub iterations: usize,
    pub metrics: Vec<ThresholdMetrics>,
}

pub fn to_matrix(samples: &[WeatherSample]) -> Array2<f64> {
    Array2::from_shape_fn((samples.len(), 3), |(i, j)| samples[i].features()[j])
}

pub fn to_targets(samples: &[WeatherSample]) -> Array1<u8> {
    samples.iter().map(|s| s.weather.class()).collect()
}

/// Scaler, classifier and held-out metrics for an existing split. Only the
/// training rows reach the scaler and the classifier.
pub fn fit_split(
    split: &Split,
    params: &LogisticParams,
) -> Result<(StandardScaler, LogisticRegression, Vec<ThresholdMetrics>), TrainError> {
    let x_train = to_matrix(&split.train);
    let y_train = to_targets(&split.train);
    let x_test = to_matrix(&split.test);
    let y_test = to_targets(&split.test);

    let scaler = StandardScaler::fit(x_train.view());
    let x_train_scaled = scaler.transform(x_train.view());
    let x_test_scaled = scaler.transform(x_test.view());

    let classifier = LogisticRegression::fit(x_train_scaled.view(), y_train.view(), params)?;

    let proba: Vec<f64> = x_test_scaled
        .rows()
        .into_iter()
        .map(|r| classifier.probability([r[0], r[1], r[2]]))
        .collect();
    let metrics = evaluate(y_test.as_slice().unwrap_or(&[]), &proba);

    Ok((scaler, classifier, metrics))
}

/// Runs imputation, outlier removal, split, scaling, fit and evaluation in
/// that order.
pub fn train(records: &[RawRecord], opts: &TrainOptions) -> Result<(TrainedBundle, TrainingReport), TrainError> {
    let imputed = impute_means(records)?;
    let cleaned = remove_outliers(imputed);
    tracing::info!(loaded = records.len(), kept = cleaned.len(), "dataset cleaned");
    if cleaned.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let split = train_test_split(&cleaned, opts.test_fraction, opts.seed);
    let (scaler, classifier, metrics) = fit_split(&split, &opts.classifier)?;

    let report = TrainingReport {
        loaded_rows: records.len(),
        cleaned_rows: cleaned.len(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        scaler: scaler.clone(),
        intercept: classifier.intercept,
        coefficients: classifier.coefficients,
        iterations: classifier.iterations,
        metrics,
    };

    Ok((TrainedBundle::new(classifier, scaler, cleaned), report))
}

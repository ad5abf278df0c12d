//! Cleaning and splitting applied before the scaler and classifier see data.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::dataset::{RawRecord, WeatherSample, FEATURE_NAMES};
use crate::error::TrainError;

/// Fills missing features with the mean of the values present in that column.
/// Non-finite values count as missing.
pub fn impute_means(records: &[RawRecord]) -> Result<Vec<WeatherSample>, TrainError> {
    if records.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let mut means = [0.0; 3];
    for (col, mean) in means.iter_mut().enumerate() {
        let present: Vec<f64> = records
            .iter()
            .filter_map(|r| r.features[col].filter(|v| v.is_finite()))
            .collect();
        if present.is_empty() {
            return Err(TrainError::EmptyColumn(FEATURE_NAMES[col]));
        }
        *mean = present.iter().sum::<f64>() / present.len() as f64;
    }

    Ok(records
        .iter()
        .map(|r| {
            let f = |col: usize| r.features[col].filter(|v| v.is_finite()).unwrap_or(means[col]);
            WeatherSample {
                temperature: f(0),
                humidity: f(1),
                wind_speed: f(2),
                weather: r.weather,
            }
        })
        .collect())
}

/// Linear-interpolated quantile over an unsorted column, `q` in [0,1].
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Inclusive keep-range for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn from_column(values: &[f64]) -> Self {
        let q1 = quantile(values, 0.25);
        let q3 = quantile(values, 0.75);
        let iqr = q3 - q1;
        Self {
            lower: q1 - 1.5 * iqr,
            upper: q3 + 1.5 * iqr,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }
}

/// Bounds for each feature, computed over the whole slice at once.
pub fn iqr_bounds(samples: &[WeatherSample]) -> [IqrBounds; 3] {
    std::array::from_fn(|col| {
        let column: Vec<f64> = samples.iter().map(|s| s.features()[col]).collect();
        IqrBounds::from_column(&column)
    })
}

/// Drops every row with at least one feature outside its IQR fence.
pub fn remove_outliers(samples: Vec<WeatherSample>) -> Vec<WeatherSample> {
    if samples.is_empty() {
        return samples;
    }
    let bounds = iqr_bounds(&samples);
    samples
        .into_iter()
        .filter(|s| s.features().iter().zip(&bounds).all(|(v, b)| b.contains(*v)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Split {
    pub train: Vec<WeatherSample>,
    pub test: Vec<WeatherSample>,
}

/// Seeded shuffle split. The test side gets `ceil(n * test_fraction)` rows.
pub fn train_test_split(samples: &[WeatherSample], test_fraction: f64, seed: u64) -> Split {
    let n = samples.len();
    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(n);

    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(&mut StdRng::seed_from_u64(seed));

    let (test_idx, train_idx) = idx.split_at(n_test);
    Split {
        train: train_idx.iter().map(|&i| samples[i]).collect(),
        test: test_idx.iter().map(|&i| samples[i]).collect(),
    }
}

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::classifier::LogisticRegression;
use crate::dataset::WeatherSample;
use crate::error::{BundleError, ModelError};
use crate::labels::Weather;
use crate::scaler::StandardScaler;

pub const BUNDLE_VERSION: u32 = 1;

/// What the prediction pipeline needs from a fitted model. Implemented by
/// `TrainedBundle`; tests plug in fakes.
pub trait WeatherModel: Send + Sync {
    /// Applies the fitted feature scaling to a raw (temperature, humidity, wind) row.
    fn transform(&self, features: [f64; 3]) -> Result<[f64; 3], ModelError>;

    fn predict(&self, scaled: [f64; 3]) -> Result<Weather, ModelError>;

    /// `[P(Sunny), P(Rainy)]`.
    fn predict_probabilities(&self, scaled: [f64; 3]) -> Result<[f64; 2], ModelError>;
}

/// Everything training produces, persisted as one file so the server always
/// scales inputs the way the classifier was trained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedBundle {
    pub version: u32,
    pub classifier: LogisticRegression,
    pub scaler: StandardScaler,
    /// Cleaned training data, kept for the comparison plot.
    pub data: Vec<WeatherSample>,
}

impl TrainedBundle {
    pub fn new(classifier: LogisticRegression, scaler: StandardScaler, data: Vec<WeatherSample>) -> Self {
        Self {
            version: BUNDLE_VERSION,
            classifier,
            scaler,
            data,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BundleError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BundleError> {
        let bundle: Self = bincode::deserialize(bytes)?;
        if bundle.version != BUNDLE_VERSION {
            return Err(BundleError::Version {
                found: bundle.version,
                expected: BUNDLE_VERSION,
            });
        }
        bundle
            .scaler
            .validate()
            .and_then(|_| bundle.classifier.validate())
            .map_err(|e| BundleError::Invalid(e.0))?;
        Ok(bundle)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BundleError> {
        fs::write(path.as_ref(), self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("failed to read bundle at {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("failed to decode bundle {}", path.display()))
    }
}

impl WeatherModel for TrainedBundle {
    fn transform(&self, features: [f64; 3]) -> Result<[f64; 3], ModelError> {
        let scaled = self.scaler.transform_row(features);
        if scaled.iter().all(|v| v.is_finite()) {
            Ok(scaled)
        } else {
            Err(ModelError(format!("scaling produced non-finite values: {:?}", scaled)))
        }
    }

    fn predict(&self, scaled: [f64; 3]) -> Result<Weather, ModelError> {
        let [_, rainy] = self.predict_probabilities(scaled)?;
        Ok(if rainy > 0.5 { Weather::Rainy } else { Weather::Sunny })
    }

    fn predict_probabilities(&self, scaled: [f64; 3]) -> Result<[f64; 2], ModelError> {
        let rainy = self.classifier.probability(scaled);
        if !rainy.is_finite() {
            return Err(ModelError(format!("probability is not finite for {:?}", scaled)));
        }
        Ok([1.0 - rainy, rainy])
    }
}

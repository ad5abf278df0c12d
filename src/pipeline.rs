//! Request-time prediction flow: validate, scale, infer, render.

use crate::dataset::WeatherSample;
use crate::error::{Field, PredictError};
use crate::model::{TrainedBundle, WeatherModel};
use crate::plot;
use crate::types::{PredictionForm, PredictionResult, WeatherInput};

/// Presence, parse and range checks, in that order. Stops at the first failure.
pub fn validate(form: &PredictionForm) -> Result<WeatherInput, PredictError> {
    let raw = form.fields();
    if raw.iter().any(|s| s.is_empty()) {
        return Err(PredictError::MissingField);
    }

    let mut values = [0.0; 3];
    for ((field, input), slot) in Field::ALL.into_iter().zip(raw).zip(values.iter_mut()) {
        *slot = input.trim().parse::<f64>().map_err(|source| PredictError::InvalidNumber {
            field,
            input: input.to_string(),
            source,
        })?;
    }

    for (field, value) in Field::ALL.into_iter().zip(values) {
        if !field.valid_range().contains(&value) {
            return Err(PredictError::OutOfRange(field));
        }
    }

    let [temperature, humidity, wind_speed] = values;
    Ok(WeatherInput {
        temperature,
        humidity,
        wind_speed,
    })
}

/// The loaded model plus the reference data drawn behind each request point.
/// Built once at startup and shared read-only.
pub struct Predictor {
    model: Box<dyn WeatherModel>,
    reference: Vec<WeatherSample>,
}

impl Predictor {
    pub fn new(model: Box<dyn WeatherModel>, reference: Vec<WeatherSample>) -> Self {
        Self { model, reference }
    }

    pub fn from_bundle(mut bundle: TrainedBundle) -> Self {
        let reference = std::mem::take(&mut bundle.data);
        Self::new(Box::new(bundle), reference)
    }

    pub fn reference(&self) -> &[WeatherSample] {
        &self.reference
    }

    pub fn predict(&self, form: &PredictionForm) -> Result<PredictionResult, PredictError> {
        let input = validate(form)?;

        let scaled = self.model.transform(input.features())?;
        let label = self.model.predict(scaled)?;
        let [sunny, rainy] = self.model.predict_probabilities(scaled)?;

        let plot = plot::render_comparison(&self.reference, input.humidity, input.wind_speed)?;

        Ok(PredictionResult {
            input,
            label,
            sunny_percent: sunny * 100.0,
            rainy_percent: rainy * 100.0,
            plot,
        })
    }
}

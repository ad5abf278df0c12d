use serde::{Deserialize, Serialize};

use crate::labels::Weather;
use crate::plot::EncodedPlot;

/// Raw form submission. Missing keys deserialize as empty strings so the
/// pipeline reports them as missing rather than the extractor rejecting them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionForm {
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
    #[serde(default)]
    pub wind_speed: String,
}

impl PredictionForm {
    pub fn new(temperature: &str, humidity: &str, wind_speed: &str) -> Self {
        Self {
            temperature: temperature.to_string(),
            humidity: humidity.to_string(),
            wind_speed: wind_speed.to_string(),
        }
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.temperature, &self.humidity, &self.wind_speed]
    }
}

/// Validated, in-range request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherInput {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl WeatherInput {
    pub fn features(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.wind_speed]
    }
}

#[derive(Debug, Clone)]
pub struct PredictionResult {
    pub input: WeatherInput,
    pub label: Weather,
    pub sunny_percent: f64,
    pub rainy_percent: f64,
    pub plot: EncodedPlot,
}

impl PredictionResult {
    /// Larger of the two class percentages, e.g. `"87.31%"`.
    pub fn confidence(&self) -> String {
        format_percent(self.sunny_percent.max(self.rainy_percent))
    }

    pub fn sunny(&self) -> String {
        format_percent(self.sunny_percent)
    }

    pub fn rainy(&self) -> String {
        format_percent(self.rainy_percent)
    }
}

pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v)
}

// JSON response for /api/predict
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOut {
    pub result: Weather,
    pub confidence: String,
    pub sunny: f64,
    pub rainy: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub plot: String,
}

impl From<&PredictionResult> for PredictionOut {
    fn from(r: &PredictionResult) -> Self {
        Self {
            result: r.label,
            confidence: r.confidence(),
            sunny: r.sunny_percent / 100.0,
            rainy: r.rainy_percent / 100.0,
            temperature: r.input.temperature,
            humidity: r.input.humidity,
            wind_speed: r.input.wind_speed,
            plot: r.plot.data_url(),
        }
    }
}

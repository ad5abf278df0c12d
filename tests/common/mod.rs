#![allow(dead_code)]

use weather_predictor::{
    dataset::WeatherSample,
    error::ModelError,
    server::AppState,
    weather::{WeatherClient, WeatherEndpoints},
    Predictor, Weather, WeatherModel,
};

/// Answers with a fixed P(Rainy) regardless of input.
pub struct FixedModel {
    pub rainy: f64,
}

impl WeatherModel for FixedModel {
    fn transform(&self, features: [f64; 3]) -> Result<[f64; 3], ModelError> {
        Ok(features)
    }

    fn predict(&self, _scaled: [f64; 3]) -> Result<Weather, ModelError> {
        Ok(if self.rainy > 0.5 { Weather::Rainy } else { Weather::Sunny })
    }

    fn predict_probabilities(&self, _scaled: [f64; 3]) -> Result<[f64; 2], ModelError> {
        Ok([1.0 - self.rainy, self.rainy])
    }
}

/// Stands in for a corrupt bundle: scaling always fails.
pub struct BrokenModel;

impl WeatherModel for BrokenModel {
    fn transform(&self, _features: [f64; 3]) -> Result<[f64; 3], ModelError> {
        Err(ModelError("scaler parameters missing".to_string()))
    }

    fn predict(&self, _scaled: [f64; 3]) -> Result<Weather, ModelError> {
        unreachable!("transform fails first")
    }

    fn predict_probabilities(&self, _scaled: [f64; 3]) -> Result<[f64; 2], ModelError> {
        unreachable!("transform fails first")
    }
}

pub fn reference() -> Vec<WeatherSample> {
    vec![
        WeatherSample { temperature: 18.0, humidity: 90.0, wind_speed: 12.0, weather: Weather::Rainy },
        WeatherSample { temperature: 35.0, humidity: 30.0, wind_speed: 4.0, weather: Weather::Sunny },
        WeatherSample { temperature: 28.0, humidity: 75.0, wind_speed: 20.0, weather: Weather::Rainy },
        WeatherSample { temperature: 40.0, humidity: 55.0, wind_speed: 25.0, weather: Weather::Sunny },
    ]
}

pub fn fixed_predictor(rainy: f64) -> Predictor {
    Predictor::new(Box::new(FixedModel { rainy }), reference())
}

pub fn broken_predictor() -> Predictor {
    Predictor::new(Box::new(BrokenModel), reference())
}

/// Router state whose weather lookups all go to `base`.
pub fn state_with_weather(predictor: Predictor, base: &str) -> AppState {
    let endpoints = WeatherEndpoints {
        geocoding: base.to_string(),
        forecast: base.to_string(),
        reverse: base.to_string(),
    };
    AppState::new(predictor, WeatherClient::new(endpoints).unwrap())
}

/// Router state for tests that never reach the weather upstreams.
pub fn state(predictor: Predictor) -> AppState {
    state_with_weather(predictor, "http://127.0.0.1:9")
}

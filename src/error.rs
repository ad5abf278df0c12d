use std::{fmt, num::ParseFloatError, ops::RangeInclusive};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: Weather must be 0 or 1")]
    BadLabel { line: usize },
}

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("column {0} has no values to impute from")]
    EmptyColumn(&'static str),
    #[error("training split needs both classes, got only {0}")]
    SingleClass(crate::Weather),
    #[error("classifier diverged (non-finite parameters)")]
    Diverged,
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bundle encoding error: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("unsupported bundle version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("bundle is invalid: {0}")]
    Invalid(String),
}

/// Raised by a `WeatherModel` when its parameters cannot produce a usable answer.
#[derive(Debug, Error)]
#[error("model error: {0}")]
pub struct ModelError(pub String);

#[derive(Debug, Error)]
#[error("render error: {0}")]
pub struct PlotError(pub String);

/// Failures of the live weather lookup. Each maps to one HTTP status.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Missing parameters")]
    MissingParameters,
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("City not found")]
    CityNotFound,
    #[error("Multiple cities found")]
    Ambiguous(Vec<crate::weather::CitySuggestion>),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream returned {0}")]
    Upstream(u16),
}

/// Input fields of the prediction form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Temperature, Field::Humidity, Field::WindSpeed];

    pub fn form_name(self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::WindSpeed => "wind_speed",
        }
    }

    pub fn valid_range(self) -> RangeInclusive<f64> {
        match self {
            Field::Temperature => -50.0..=50.0,
            Field::Humidity | Field::WindSpeed => 0.0..=100.0,
        }
    }

    fn range_message(self) -> &'static str {
        match self {
            Field::Temperature => "Temperature must be between -50 and 50°C.",
            Field::Humidity => "Humidity must be between 0 and 100%.",
            Field::WindSpeed => "Wind Speed must be between 0 and 100 km/h.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

/// Everything a prediction request can fail with. The first three are
/// user input problems and are shown back on the form.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("All fields must be filled.")]
    MissingField,
    #[error("Value error: could not convert {field} value {input:?} to a number ({source})")]
    InvalidNumber {
        field: Field,
        input: String,
        source: ParseFloatError,
    },
    #[error("{}", .0.range_message())]
    OutOfRange(Field),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PredictError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, PredictError::Unexpected(_))
    }
}

impl From<ModelError> for PredictError {
    fn from(e: ModelError) -> Self {
        PredictError::Unexpected(e.to_string())
    }
}

impl From<PlotError> for PredictError {
    fn from(e: PlotError) -> Self {
        PredictError::Unexpected(e.to_string())
    }
}

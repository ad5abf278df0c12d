use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use crate::error::DatasetError;
use crate::labels::{classify, Weather};

pub const FEATURE_NAMES: [&str; 3] = ["Temperature", "Humidity", "WindSpeed"];

/// One labelled observation. Units: °C, %, km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub weather: Weather,
}

impl WeatherSample {
    pub fn features(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.wind_speed]
    }
}

/// A row as loaded from disk, before imputation. Features may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord {
    pub features: [Option<f64>; 3],
    pub weather: Weather,
}

impl From<WeatherSample> for RawRecord {
    fn from(s: WeatherSample) -> Self {
        Self {
            features: [Some(s.temperature), Some(s.humidity), Some(s.wind_speed)],
            weather: s.weather,
        }
    }
}

// CSV row layout, column names match the files the trainer reads.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Temperature", default, deserialize_with = "missing_as_none")]
    temperature: Option<f64>,
    #[serde(rename = "Humidity", default, deserialize_with = "missing_as_none")]
    humidity: Option<f64>,
    #[serde(rename = "WindSpeed", default, deserialize_with = "missing_as_none")]
    wind_speed: Option<f64>,
    #[serde(rename = "Weather")]
    weather: Option<f64>,
}

// Tokens pandas reads as missing by default, plus a bare dash.
const MISSING_TOKENS: [&str; 10] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "-", "n/a"];

/// Feature cell: NA-like tokens and non-finite numbers are missing.
fn missing_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    let Some(raw) = raw else { return Ok(None) };
    let cell = raw.trim();
    if MISSING_TOKENS.contains(&cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Ok(None),
        Err(e) => Err(serde::de::Error::custom(format!("{:?} is not a number ({})", cell, e))),
    }
}

/// Draws `n` integer-valued samples (temperature in [15,45), humidity in
/// [20,100), wind speed in [0,30)) and labels each one. Same seed, same data.
pub fn generate(n: usize, seed: u64) -> Vec<WeatherSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let temperature = rng.gen_range(15..45) as f64;
            let humidity = rng.gen_range(20..100) as f64;
            let wind_speed = rng.gen_range(0..30) as f64;
            WeatherSample {
                temperature,
                humidity,
                wind_speed,
                weather: classify(temperature, humidity, wind_speed),
            }
        })
        .collect()
}

pub fn write_csv<W: Write>(writer: W, samples: &[WeatherSample]) -> Result<(), DatasetError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FEATURE_NAMES.iter().copied().chain(["Weather"]))?;
    for s in samples {
        wtr.write_record([
            fmt_value(s.temperature),
            fmt_value(s.humidity),
            fmt_value(s.wind_speed),
            s.weather.class().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(path: impl AsRef<Path>, samples: &[WeatherSample]) -> Result<(), DatasetError> {
    let file = File::create(path.as_ref())?;
    write_csv(file, samples)
}

/// Reads a headed CSV. Empty, NA-like or non-finite feature cells become
/// `None`; the label column must hold 0 or 1 on every row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = row?;
        let weather = match row.weather {
            Some(w) if w == 0.0 => Weather::Sunny,
            Some(w) if w == 1.0 => Weather::Rainy,
            _ => return Err(DatasetError::BadLabel { line }),
        };
        out.push(RawRecord {
            features: [row.temperature, row.humidity, row.wind_speed],
            weather,
        });
    }
    Ok(out)
}

pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, DatasetError> {
    let file = File::open(path.as_ref())?;
    read_csv(file)
}

fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

use std::{env, path::PathBuf, str::FromStr};
use tracing_subscriber::EnvFilter;

/// Runtime settings shared by the server and the two CLI binaries.
#[derive(Debug, Clone)]
pub struct Config {
    pub bundle_path: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub num_samples: usize,
    pub seed: u64,
    /// Optional JSON output for the training report.
    pub report_path: Option<PathBuf>,
    /// Upstream bases for `/api/weather`.
    pub geocoding_url: String,
    pub forecast_url: String,
    pub reverse_geocoding_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from("model.bin"),
            bind_addr: "127.0.0.1".to_string(),
            port: 5000,
            dataset_path: PathBuf::from("WeatherPrediction.csv"),
            num_samples: 5000,
            seed: 42,
            report_path: None,
            geocoding_url: "https://geocoding-api.open-meteo.com".to_string(),
            forecast_url: "https://api.open-meteo.com".to_string(),
            reverse_geocoding_url: "https://nominatim.openstreetmap.org".to_string(),
        }
    }
}

impl Config {
    /// Reads the environment (a `.env` file is honoured if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let d = Self::default();
        Self {
            bundle_path: env::var("BUNDLE_PATH").map(PathBuf::from).unwrap_or(d.bundle_path),
            bind_addr: env::var("BIND_ADDR").unwrap_or(d.bind_addr),
            port: parse_var("PORT", d.port),
            dataset_path: env::var("DATASET_PATH").map(PathBuf::from).unwrap_or(d.dataset_path),
            num_samples: parse_var("NUM_SAMPLES", d.num_samples),
            seed: parse_var("SEED", d.seed),
            report_path: env::var("REPORT_PATH").ok().map(PathBuf::from),
            geocoding_url: env::var("GEOCODING_URL").unwrap_or(d.geocoding_url),
            forecast_url: env::var("FORECAST_URL").unwrap_or(d.forecast_url),
            reverse_geocoding_url: env::var("REVERSE_GEOCODING_URL").unwrap_or(d.reverse_geocoding_url),
        }
    }
}

fn parse_var<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{}={:?} is not valid; using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

const DEFAULT_FILTER: &str = "weather_predictor=info,generate_dataset=info,train_model=info,tower_http=info";

/// Log filter for the binaries. `.env` is read first so a `RUST_LOG` set
/// there applies.
pub fn log_filter() -> EnvFilter {
    dotenvy::dotenv().ok();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

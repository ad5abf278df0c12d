//! Current conditions for a city or a coordinate pair, used to prefill the
//! prediction form. Geocoding and forecasts come from Open-Meteo, reverse
//! geocoding from Nominatim.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::error::WeatherError;

/// Nominatim rejects requests without an identifying agent.
pub const USER_AGENT: &str = "WeatherPredictionApp/1.0";
const TIMEOUT: Duration = Duration::from_secs(10);
const MAX_CANDIDATES: &str = "10";

/// Base URLs of the three upstream services, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherEndpoints {
    pub geocoding: String,
    pub forecast: String,
    pub reverse: String,
}

impl WeatherEndpoints {
    pub fn from_config(cfg: &Config) -> Self {
        let base = |url: &str| url.trim_end_matches('/').to_string();
        Self {
            geocoding: base(&cfg.geocoding_url),
            forecast: base(&cfg.forecast_url),
            reverse: base(&cfg.reverse_geocoding_url),
        }
    }
}

impl Default for WeatherEndpoints {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// `GET /api/weather` parameters. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    /// Country picked from an earlier list of suggestions.
    #[serde(rename = "selectCity")]
    pub select_city: Option<String>,
}

/// One geocoding hit. Also the shape of each suggestion when a name is
/// ambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub admin1: String,
}

/// Rounded current conditions for the resolved place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

#[derive(Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<CitySuggestion>>,
}

#[derive(Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: Current,
}

#[derive(Deserialize)]
struct Current {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
}

pub struct WeatherClient {
    http: reqwest::Client,
    endpoints: WeatherEndpoints,
}

impl WeatherClient {
    pub fn new(endpoints: WeatherEndpoints) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &WeatherEndpoints {
        &self.endpoints
    }

    /// Resolves the place (city search first, then coordinates), then reads
    /// its current conditions.
    pub async fn lookup(&self, query: &WeatherQuery) -> Result<CurrentWeather, WeatherError> {
        let (latitude, longitude, city, country) =
            match (present(&query.city), present(&query.lat), present(&query.lon)) {
                (Some(name), _, _) => {
                    let place = self.find_city(name, present(&query.select_city)).await?;
                    (place.latitude, place.longitude, place.name, place.country)
                }
                (None, Some(lat), Some(lon)) => {
                    let latitude = parse_coordinate(lat, 90.0)?;
                    let longitude = parse_coordinate(lon, 180.0)?;
                    let (city, country) = self.reverse(latitude, longitude).await?;
                    (latitude, longitude, city, country)
                }
                _ => return Err(WeatherError::MissingParameters),
            };

        let current = self.current(latitude, longitude).await?;
        Ok(CurrentWeather {
            city,
            country,
            temperature: round_half_up(current.temperature_2m),
            humidity: current.relative_humidity_2m,
            wind_speed: round_half_up(current.wind_speed_10m),
        })
    }

    async fn find_city(&self, name: &str, country: Option<&str>) -> Result<CitySuggestion, WeatherError> {
        let url = format!("{}/v1/search", self.endpoints.geocoding);
        let request = self.http.get(&url).query(&[
            ("name", name),
            ("count", MAX_CANDIDATES),
            ("language", "en"),
            ("format", "json"),
        ]);
        let mut results = self
            .get_json::<GeocodingResponse>(request)
            .await?
            .results
            .unwrap_or_default();

        if results.is_empty() {
            return Err(WeatherError::CityNotFound);
        }
        if let Some(country) = country {
            let picked = results
                .iter()
                .position(|r| r.name == name && r.country == country)
                .unwrap_or(0);
            return Ok(results.swap_remove(picked));
        }
        if results.len() > 1 {
            return Err(WeatherError::Ambiguous(results));
        }
        Ok(results.swap_remove(0))
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<(String, String), WeatherError> {
        let url = format!("{}/reverse", self.endpoints.reverse);
        let request = self.http.get(&url).query(&[
            ("format", "json".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ]);
        let Address { city, town, village, country } = self.get_json::<ReverseResponse>(request).await?.address;
        let unknown = || "Unknown".to_string();
        Ok((city.or(town).or(village).unwrap_or_else(unknown), country.unwrap_or_else(unknown)))
    }

    async fn current(&self, latitude: f64, longitude: f64) -> Result<Current, WeatherError> {
        let url = format!("{}/v1/forecast", self.endpoints.forecast);
        let request = self.http.get(&url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m".to_string()),
            ("temperature_unit", "celsius".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
        ]);
        Ok(self.get_json::<ForecastResponse>(request).await?.current)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, WeatherError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(WeatherError::Upstream(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(raw: &str, limit: f64) -> Result<f64, WeatherError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(v),
        _ => Err(WeatherError::InvalidCoordinates),
    }
}

// halves round towards +inf
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::{PredictError, WeatherError};
use crate::pages;
use crate::pipeline::Predictor;
use crate::types::{PredictionForm, PredictionOut, PredictionResult};
use crate::weather::{WeatherClient, WeatherQuery};

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub weather: Arc<WeatherClient>,
}

impl AppState {
    pub fn new(predictor: Predictor, weather: WeatherClient) -> Self {
        Self {
            predictor: Arc::new(predictor),
            weather: Arc::new(weather),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/form", get(form))
        .route("/predict", post(predict_page))
        .route("/api/predict", post(predict_api))
        .route("/api/weather", get(weather_lookup))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn log_outcome(form: &PredictionForm, outcome: &Result<PredictionResult, PredictError>) {
    match outcome {
        Ok(r) => tracing::info!(
            "predicted {} (sunny={:.2}% rainy={:.2}%) for t={} h={} w={}",
            r.label, r.sunny_percent, r.rainy_percent,
            r.input.temperature, r.input.humidity, r.input.wind_speed
        ),
        Err(e) if e.is_validation() => tracing::debug!(?form, "rejected: {}", e),
        Err(e) => tracing::error!(?form, "prediction failed: {}", e),
    }
}

/// Runs the pipeline on the blocking pool.
async fn run_prediction(state: &AppState, payload: PredictionForm) -> Result<PredictionResult, PredictError> {
    let predictor = Arc::clone(&state.predictor);
    let form = payload.clone();
    let outcome = tokio::task::spawn_blocking(move || predictor.predict(&payload))
        .await
        .unwrap_or_else(|e| Err(PredictError::Unexpected(format!("prediction task failed: {}", e))));
    log_outcome(&form, &outcome);
    outcome
}

fn weather_failure(e: WeatherError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &e {
        WeatherError::MissingParameters | WeatherError::InvalidCoordinates => StatusCode::BAD_REQUEST,
        WeatherError::CityNotFound => StatusCode::NOT_FOUND,
        WeatherError::Ambiguous(suggestions) => {
            let body = json!({ "success": false, "suggestions": suggestions, "error": e.to_string() });
            return (StatusCode::MULTIPLE_CHOICES, Json(body));
        }
        WeatherError::Network(_) | WeatherError::Upstream(_) => {
            tracing::error!("weather lookup failed: {}", e);
            let body = json!({ "success": false, "error": "Failed to fetch weather data" });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body));
        }
    };
    tracing::debug!("weather lookup rejected: {}", e);
    (status, Json(json!({ "success": false, "error": e.to_string() })))
}

// ---------- Handlers ----------

async fn welcome() -> Html<String> {
    Html(pages::welcome())
}

async fn form() -> Html<String> {
    Html(pages::form(None))
}

async fn predict_page(State(state): State<AppState>, Form(payload): Form<PredictionForm>) -> Html<String> {
    match run_prediction(&state, payload).await {
        Ok(result) => Html(pages::result(&result)),
        Err(e) => Html(pages::form(Some(&e.to_string()))),
    }
}

async fn predict_api(
    State(state): State<AppState>,
    Form(payload): Form<PredictionForm>,
) -> Result<Json<PredictionOut>, (StatusCode, Json<serde_json::Value>)> {
    match run_prediction(&state, payload).await {
        Ok(result) => Ok(Json(PredictionOut::from(&result))),
        Err(e) => {
            let status = if e.is_validation() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((status, Json(json!({ "error": e.to_string() }))))
        }
    }
}

async fn weather_lookup(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let current = state.weather.lookup(&query).await.map_err(weather_failure)?;
    tracing::info!(
        "weather for {}, {}: {}°C {}% {} km/h",
        current.city, current.country, current.temperature, current.humidity, current.wind_speed
    );
    Ok(Json(json!({
        "success": true,
        "city": current.city,
        "country": current.country,
        "temperature": current.temperature,
        "humidity": current.humidity,
        "windSpeed": current.wind_speed,
    })))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "samples": state.predictor.reference().len(),
    }))
}

/// Integration tests for the HTTP routes
///
/// Run with: cargo test --test server_tests -- --nocapture

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use weather_predictor::server::router;

fn app(rainy: f64) -> Router {
    router(common::state(common::fixed_predictor(rainy)))
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_welcome_and_form_pages() {
    let (status, body) = send(app(0.5), Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/form\""));

    let (status, body) = send(app(0.5), Request::get("/form").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    for name in ["temperature", "humidity", "wind_speed"] {
        assert!(body.contains(&format!("name=\"{}\"", name)), "missing input {}", name);
    }
    assert!(!body.contains("class=\"flash error\""));
}

#[tokio::test]
async fn test_predict_page_renders_result() {
    let (status, body) = send(app(0.9), post_form("/predict", "temperature=18&humidity=90&wind_speed=12")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<strong>Rainy</strong>"));
    assert!(body.contains("Confidence: 90.00%"));
    assert!(body.contains("src=\"data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_predict_page_flashes_validation_errors() {
    let cases = [
        ("temperature=&humidity=50&wind_speed=10", "All fields must be filled."),
        ("humidity=50&wind_speed=10", "All fields must be filled."),
        ("temperature=25&humidity=150&wind_speed=10", "Humidity must be between 0 and 100%."),
        ("temperature=abc&humidity=50&wind_speed=10", "Value error:"),
    ];
    for (body, message) in cases {
        let (status, html) = send(app(0.5), post_form("/predict", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("class=\"flash error\""), "{}", body);
        assert!(html.contains(message), "{} -> {}", body, html);
        assert!(html.contains("action=\"/predict\""), "form is redisplayed");
    }
}

#[tokio::test]
async fn test_predict_page_unexpected_error() {
    let app = router(common::state(common::broken_predictor()));
    let (status, html) = send(app, post_form("/predict", "temperature=25&humidity=50&wind_speed=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Unexpected error:"));
}

#[tokio::test]
async fn test_api_predict_json() {
    let (status, body) = send(app(0.25), post_form("/api/predict", "temperature=30&humidity=40&wind_speed=3")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["result"], "Sunny");
    assert_eq!(json["confidence"], "75.00%");
    assert_eq!(json["windSpeed"], 3.0);
    assert!((json["sunny"].as_f64().unwrap() - 0.75).abs() < 1e-12);

    let (status, body) = send(app(0.25), post_form("/api/predict", "temperature=99&humidity=40&wind_speed=3")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Temperature must be between -50 and 50°C.");

    let broken = router(common::state(common::broken_predictor()));
    let (status, _) = send(broken, post_form("/api/predict", "temperature=20&humidity=40&wind_speed=3")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(0.5), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["samples"], 4);
}

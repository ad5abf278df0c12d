use anyhow::Context;
use weather_predictor::{
    config::Config,
    server,
    weather::{WeatherClient, WeatherEndpoints},
    Predictor, TrainedBundle,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    weather_predictor::config::init_tracing();
    let cfg = Config::from_env();

    // No model, no service.
    let bundle = TrainedBundle::load(&cfg.bundle_path)?;
    tracing::info!(
        "loaded bundle {}: {} reference samples, intercept={:.4} coefficients={:?}",
        cfg.bundle_path.display(),
        bundle.data.len(),
        bundle.classifier.intercept,
        bundle.classifier.coefficients
    );

    let weather = WeatherClient::new(WeatherEndpoints::from_config(&cfg)).context("failed to build HTTP client")?;
    tracing::info!("weather lookups via {:?}", weather.endpoints());

    let state = server::AppState::new(Predictor::from_bundle(bundle), weather);
    let app = server::router(state);

    let addr = format!("{}:{}", cfg.bind_addr, cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

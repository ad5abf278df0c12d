use anyhow::Context;
use weather_predictor::{config::Config, dataset, Weather};

fn main() -> anyhow::Result<()> {
    weather_predictor::config::init_tracing();
    let cfg = Config::from_env();

    let samples = dataset::generate(cfg.num_samples, cfg.seed);
    let rainy = samples.iter().filter(|s| s.weather == Weather::Rainy).count();

    dataset::write_csv_file(&cfg.dataset_path, &samples)
        .with_context(|| format!("failed to write {}", cfg.dataset_path.display()))?;

    tracing::info!(
        "wrote {} samples ({} rainy, {} sunny) to {} with seed {}",
        samples.len(),
        rainy,
        samples.len() - rainy,
        cfg.dataset_path.display(),
        cfg.seed
    );
    Ok(())
}

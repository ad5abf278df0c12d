use anyhow::Context;
use weather_predictor::{
    config::Config,
    dataset,
    trainer::{self, TrainOptions},
};

fn main() -> anyhow::Result<()> {
    weather_predictor::config::init_tracing();
    let cfg = Config::from_env();

    let records = dataset::read_csv_file(&cfg.dataset_path)
        .with_context(|| format!("failed to load {}", cfg.dataset_path.display()))?;
    tracing::info!("dataset loaded from {} ({} rows)", cfg.dataset_path.display(), records.len());

    let opts = TrainOptions {
        seed: cfg.seed,
        ..Default::default()
    };
    let (bundle, report) = trainer::train(&records, &opts).context("training failed")?;

    bundle
        .save(&cfg.bundle_path)
        .with_context(|| format!("failed to save bundle to {}", cfg.bundle_path.display()))?;
    tracing::info!(
        "model trained on {} rows ({} held out, {} iterations) and saved to {}",
        report.train_rows,
        report.test_rows,
        report.iterations,
        cfg.bundle_path.display()
    );

    for m in &report.metrics {
        tracing::info!(
            "threshold={} accuracy={:.3} precision={:.3} recall={:.3} confusion:\n{}",
            m.threshold,
            m.accuracy,
            m.precision,
            m.recall,
            m.matrix()
        );
    }

    if let Some(path) = &cfg.report_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!("report written to {}", path.display());
    }
    Ok(())
}

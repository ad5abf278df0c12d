pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod labels;
pub mod model;
pub mod pages;
pub mod pipeline;
pub mod plot;
pub mod preprocess;
pub mod scaler;
pub mod server;
pub mod trainer;
pub mod types;
pub mod weather;

pub use labels::{classify, Weather};
pub use model::{TrainedBundle, WeatherModel};
pub use pipeline::Predictor;

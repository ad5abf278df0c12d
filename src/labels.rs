use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary weather class. `Sunny` is class 0, `Rainy` is class 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
}

impl Weather {
    pub fn class(self) -> u8 {
        match self {
            Weather::Sunny => 0,
            Weather::Rainy => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hand-written labelling rule used to build the synthetic dataset.
/// Any matching disjunct means rain. Thresholds must stay exact, generated
/// datasets are only reproducible against this rule.
pub fn classify(temp: f64, humidity: f64, wind: f64) -> Weather {
    let rainy = (temp < 30.0 && humidity > 70.0 && wind > 10.0)
        || (temp < 25.0 && humidity > 80.0 && wind > 5.0)
        || (temp < 20.0 && humidity > 75.0 && wind > 5.0)
        || ((20.0..=30.0).contains(&temp) && humidity > 65.0 && (5.0..=10.0).contains(&wind));

    if rainy {
        Weather::Rainy
    } else {
        Weather::Sunny
    }
}

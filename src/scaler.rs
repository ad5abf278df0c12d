use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Per-feature standardisation: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: [f64; 3],
    pub scale: [f64; 3],
}

impl StandardScaler {
    /// Fits on the given rows only. Uses the population deviation; constant
    /// columns get a scale of 1 so they map to zero.
    pub fn fit(x: ArrayView2<'_, f64>) -> Self {
        let mean = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(3));
        let std = x.std_axis(Axis(0), 0.0);
        let mut out = Self {
            mean: [0.0; 3],
            scale: [1.0; 3],
        };
        for col in 0..3 {
            out.mean[col] = mean[col];
            if std[col] > 0.0 {
                out.scale[col] = std[col];
            }
        }
        out
    }

    pub fn transform_row(&self, row: [f64; 3]) -> [f64; 3] {
        std::array::from_fn(|i| (row[i] - self.mean[i]) / self.scale[i])
    }

    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let mean = Array1::from(self.mean.to_vec());
        let scale = Array1::from(self.scale.to_vec());
        (&x - &mean) / &scale
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        let finite = self.mean.iter().all(|m| m.is_finite());
        let positive = self.scale.iter().all(|s| s.is_finite() && *s > 0.0);
        if finite && positive {
            Ok(())
        } else {
            Err(ModelError(format!("scaler parameters are unusable: {:?}", self)))
        }
    }
}

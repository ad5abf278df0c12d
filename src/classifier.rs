//! Binary logistic regression with L2 penalty and per-class sample weights.

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, TrainError};
use crate::labels::Weather;

#[derive(Debug, Clone)]
pub struct LogisticParams {
    /// Inverse regularisation strength.
    pub c: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
    /// Stop once the largest gradient component falls below this.
    pub tolerance: f64,
    pub balanced: bool,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 1.0,
            max_iter: 10_000,
            tolerance: 1e-6,
            balanced: true,
        }
    }
}

/// `n / (2 * n_class)` for each class, indexed by class id.
pub fn balanced_class_weights(y: ArrayView1<'_, u8>) -> [f64; 2] {
    let n = y.len() as f64;
    let rainy = y.iter().filter(|&&c| c == 1).count() as f64;
    let sunny = n - rainy;
    [n / (2.0 * sunny), n / (2.0 * rainy)]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub intercept: f64,
    pub coefficients: [f64; 3],
    /// Gradient steps taken during fit.
    pub iterations: usize,
}

impl LogisticRegression {
    pub fn fit(x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>, params: &LogisticParams) -> Result<Self, TrainError> {
        if y.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        if y.iter().all(|&c| c == 0) {
            return Err(TrainError::SingleClass(Weather::Sunny));
        }
        if y.iter().all(|&c| c == 1) {
            return Err(TrainError::SingleClass(Weather::Rainy));
        }

        let class_w = if params.balanced {
            balanced_class_weights(y)
        } else {
            [1.0, 1.0]
        };
        let sample_w: Array1<f64> = y.mapv(|c| class_w[c as usize]);
        let target: Array1<f64> = y.mapv(f64::from);
        let n = y.len() as f64;

        let mut w = Array1::<f64>::zeros(x.ncols());
        let mut b = 0.0;
        let mut iterations = 0;

        for _ in 0..params.max_iter {
            iterations += 1;
            let z = x.dot(&w) + b;
            let p = z.mapv(sigmoid);
            let residual = (&p - &target) * &sample_w;

            let grad_w = (x.t().dot(&residual) + &w / params.c) / n;
            let grad_b = residual.sum() / n;

            w.scaled_add(-params.learning_rate, &grad_w);
            b -= params.learning_rate * grad_b;

            let max_grad = grad_w.iter().fold(grad_b.abs(), |m, g| m.max(g.abs()));
            if max_grad < params.tolerance {
                break;
            }
        }

        if !b.is_finite() || w.iter().any(|v| !v.is_finite()) {
            return Err(TrainError::Diverged);
        }

        tracing::debug!(iterations, intercept = b, coefficients = ?w, "logistic regression fitted");
        Ok(Self {
            intercept: b,
            coefficients: [w[0], w[1], w[2]],
            iterations,
        })
    }

    pub fn decision(&self, scaled: [f64; 3]) -> f64 {
        self.intercept + self.coefficients.iter().zip(scaled).map(|(c, x)| c * x).sum::<f64>()
    }

    /// P(Rainy) for one scaled row.
    pub fn probability(&self, scaled: [f64; 3]) -> f64 {
        sigmoid(self.decision(scaled))
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(ModelError("classifier parameters are not finite".to_string()))
        }
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

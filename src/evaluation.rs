use serde::Serialize;
use std::fmt;

pub const EVAL_THRESHOLDS: [f64; 3] = [0.7, 0.6, 0.5];

/// Counts with Rainy as the positive class. Rows are actual, columns predicted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tp: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[u8], predicted: &[u8]) -> Self {
        let mut cm = Self::default();
        for (&a, &p) in actual.iter().zip(predicted) {
            match (a, p) {
                (0, 0) => cm.tn += 1,
                (0, _) => cm.fp += 1,
                (_, 0) => cm.fn_ += 1,
                _ => cm.tp += 1,
            }
        }
        cm
    }

    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }

    pub fn as_rows(&self) -> [[usize; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{} {}]\n [{} {}]]", self.tn, self.fp, self.fn_, self.tp)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdMetrics {
    pub threshold: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub confusion: [[usize; 2]; 2],
}

impl ThresholdMetrics {
    pub fn matrix(&self) -> ConfusionMatrix {
        let [[tn, fp], [fn_, tp]] = self.confusion;
        ConfusionMatrix { tn, fp, fn_, tp }
    }
}

/// Scores `P(Rainy) >= threshold` against the true labels. Precision and
/// recall are 0 when their denominator is.
pub fn evaluate_at(threshold: f64, actual: &[u8], proba: &[f64]) -> ThresholdMetrics {
    let predicted: Vec<u8> = proba.iter().map(|&p| u8::from(p >= threshold)).collect();
    let cm = ConfusionMatrix::from_predictions(actual, &predicted);

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    ThresholdMetrics {
        threshold,
        accuracy: ratio(cm.tp + cm.tn, cm.total()),
        precision: ratio(cm.tp, cm.tp + cm.fp),
        recall: ratio(cm.tp, cm.tp + cm.fn_),
        confusion: cm.as_rows(),
    }
}

pub fn evaluate(actual: &[u8], proba: &[f64]) -> Vec<ThresholdMetrics> {
    EVAL_THRESHOLDS
        .iter()
        .map(|&t| evaluate_at(t, actual, proba))
        .collect()
}

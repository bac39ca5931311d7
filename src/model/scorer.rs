//! The scoring seam: any trained binary classifier that maps a feature vector to P(fraud).

use crate::error::{FraudError, Result};
use crate::features::FeatureVector;

pub trait Scorer: Send + Sync {
    /// Probability of the positive (fraud) class, in [0, 1].
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    fn name(&self) -> &str;
}

/// Reject probabilities a well-behaved classifier cannot return.
pub fn check_probability(p: f64) -> Result<f64> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(FraudError::scoring(format!("probability {} outside [0, 1]", p)))
    }
}

/// Fixed-output scorer for exercising the feature pipeline without a trained model.
#[derive(Debug, Clone)]
pub struct ConstantScorer {
    probability: f64,
}

impl ConstantScorer {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl Scorer for ConstantScorer {
    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

//! Logistic-regression scorer.

use super::scorer::Scorer;
use crate::error::{FraudError, Result};
use crate::features::FeatureVector;

#[derive(Debug, Clone)]
pub struct LogisticModel {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(coef: Vec<f64>, intercept: f64, n_features: usize) -> Result<Self> {
        if coef.len() != n_features {
            return Err(FraudError::artifact(format!(
                "logistic model has {} coefficients for {} columns",
                coef.len(),
                n_features
            )));
        }
        if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
            return Err(FraudError::artifact("logistic parameters must be finite"));
        }
        Ok(Self { coef, intercept })
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Scorer for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let x = features.as_slice();
        if x.len() != self.coef.len() {
            return Err(FraudError::scoring(format!(
                "expected {} features, got {}",
                self.coef.len(),
                x.len()
            )));
        }
        let z = self.intercept + self.coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>();
        Ok(sigmoid(z))
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

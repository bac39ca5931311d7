//! Thresholds the model probability into a verdict and packages it with the model input.

use crate::config::RiskConfig;
use crate::features::FeatureVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability at or above which a transaction is flagged.
pub const FRAUD_THRESHOLD: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Fraud,
    Normal,
}

impl Verdict {
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Verdict::Fraud
        } else {
            Verdict::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Fraud => "FRAUD",
            Verdict::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub request_id: String,
    pub probability: f64,
    pub threshold: f64,
    pub verdict: Verdict,
    pub features: serde_json::Map<String, serde_json::Value>,
    pub ts: DateTime<Utc>,
}

impl Decision {
    pub fn is_fraud(&self) -> bool {
        self.verdict == Verdict::Fraud
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fraud probability: {:.3}", self.probability)?;
        writeln!(f, "Threshold: {:.2}", self.threshold)?;
        match self.verdict {
            Verdict::Fraud => writeln!(f, "Verdict: FRAUD (transaction is potentially fraudulent)")?,
            Verdict::Normal => writeln!(f, "Verdict: NORMAL (transaction looks safe)")?,
        }
        writeln!(f, "Features:")?;
        for (name, value) in &self.features {
            writeln!(f, "  {}: {}", name, value)?;
        }
        Ok(())
    }
}

pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, request_id: String, probability: f64, features: &FeatureVector) -> Decision {
        Decision {
            request_id,
            probability,
            threshold: self.config.threshold,
            verdict: Verdict::from_probability(probability, self.config.threshold),
            features: features.to_map(),
            ts: Utc::now(),
        }
    }
}

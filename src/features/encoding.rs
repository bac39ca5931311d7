//! Fitted categorical encoders and numeric scaler, as stored in the model artifact.

use crate::error::{FraudError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Columns the scaler was fitted on, in positional order.
pub const SCALED_COLUMNS: [&str; 3] = ["transaction_amount", "processing_seconds", "buyer_avg_amount"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabelEncoderRepr {
    classes: Vec<String>,
}

/// Label → integer code; the code is the label's position in the sorted, unique `classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LabelEncoderRepr", into = "LabelEncoderRepr")]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(FraudError::artifact("encoder has no classes"));
        }
        let mut index = HashMap::with_capacity(classes.len());
        for (i, c) in classes.iter().enumerate() {
            if index.insert(c.clone(), i).is_some() {
                return Err(FraudError::artifact(format!("duplicate encoder class {:?}", c)));
            }
        }
        // codes were assigned over the sorted label set
        if let Some(pair) = classes.windows(2).find(|w| w[0] > w[1]) {
            return Err(FraudError::artifact(format!(
                "encoder classes not sorted: {:?} before {:?}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { classes, index })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, field: &'static str, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| FraudError::UnknownCategory {
                field,
                label: label.to_string(),
            })
    }
}

impl TryFrom<LabelEncoderRepr> for LabelEncoder {
    type Error = FraudError;

    fn try_from(repr: LabelEncoderRepr) -> Result<Self> {
        LabelEncoder::new(repr.classes)
    }
}

impl From<LabelEncoder> for LabelEncoderRepr {
    fn from(e: LabelEncoder) -> Self {
        LabelEncoderRepr { classes: e.classes }
    }
}

/// Per-column fitted scaler over [`SCALED_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    /// Check widths and parameters. A zero standard scale is replaced by 1, as the fitting side does.
    pub fn validated(self) -> Result<Self> {
        let width = SCALED_COLUMNS.len();
        let (offset, scale) = match &self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
        };
        if offset.len() != width || scale.len() != width {
            return Err(FraudError::artifact(format!(
                "scaler expects {} columns, got {} offsets and {} scales",
                width,
                offset.len(),
                scale.len()
            )));
        }
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(FraudError::artifact("scaler parameters must be finite"));
        }
        Ok(match self {
            Scaler::Standard { mean, scale } => Scaler::Standard {
                mean,
                scale: scale
                    .into_iter()
                    .map(|s| if s == 0.0 { 1.0 } else { s })
                    .collect(),
            },
            other => other,
        })
    }

    /// Scale the value at position `col` of [`SCALED_COLUMNS`].
    pub fn transform(&self, col: usize, x: f64) -> f64 {
        match self {
            Scaler::Standard { mean, scale } => (x - mean[col]) / scale[col],
            Scaler::MinMax { min, scale } => x * scale[col] + min[col],
        }
    }
}

/// Read-only lookup tables shared by every prediction.
#[derive(Debug, Clone)]
pub struct EncodingTables {
    pub method: LabelEncoder,
    pub provider: LabelEncoder,
    pub scaler: Scaler,
}

//! Transaction feature extraction: validation, categorical encoding, rule derivation, scaling.

mod encoding;
mod pipeline;
mod record;
mod rules;

pub use encoding::{EncodingTables, LabelEncoder, Scaler, SCALED_COLUMNS};
pub use pipeline::{build, check_column_order, FeatureBuilder, COMPUTED_COLUMNS};
pub use record::TransactionRecord;
pub use rules::DerivedFeatures;

use serde::{Deserialize, Serialize};

/// Ordered model input; `names[i]` labels `values[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Flat key → value map, keys in column order.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.names
            .iter()
            .zip(&self.values)
            .map(|(n, v)| (n.clone(), serde_json::Value::from(*v)))
            .collect()
    }
}

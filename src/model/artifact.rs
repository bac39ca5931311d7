//! Trained-model artifact: one JSON bundle holding the classifier, both encoders, the scaler
//! and the feature column order. Loaded all-or-nothing at startup.

use super::forest::{DecisionTree, RandomForest};
use super::linear::LogisticModel;
use super::scorer::Scorer;
use crate::error::{FraudError, Result};
use crate::features::{check_column_order, EncodingTables, FeatureBuilder, LabelEncoder, Scaler};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;

pub const KEY_MODEL: &str = "model";
pub const KEY_ENCODER_METHOD: &str = "encoder_method";
pub const KEY_ENCODER_PROVIDER: &str = "encoder_provider";
pub const KEY_SCALER: &str = "scaler";
pub const KEY_FEATURE_COLUMNS: &str = "feature_columns";

/// Classifier description inside the bundle.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest { trees: Vec<DecisionTree> },
    Logistic { coef: Vec<f64>, intercept: f64 },
    /// ONNX file, relative paths resolved against the bundle's directory.
    Onnx { path: PathBuf },
}

pub struct ModelBundle {
    pub version: Option<String>,
    /// SHA-256 of the artifact bytes, hex.
    pub fingerprint: String,
    pub builder: FeatureBuilder,
    pub scorer: Box<dyn Scorer>,
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("version", &self.version)
            .field("fingerprint", &self.fingerprint)
            .field("columns", &self.builder.columns())
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl ModelBundle {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| FraudError::artifact(format!("read {}: {}", path.display(), e)))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let bundle = Self::from_slice(&bytes, base_dir)?;
        info!(
            path = %path.display(),
            version = bundle.version.as_deref().unwrap_or("unversioned"),
            fingerprint = %bundle.fingerprint,
            scorer = bundle.scorer.name(),
            feature_dim = bundle.builder.feature_dim(),
            "model artifact loaded"
        );
        Ok(bundle)
    }

    /// Parse a bundle from raw bytes; `base_dir` anchors relative model paths.
    pub fn from_slice(bytes: &[u8], base_dir: &Path) -> Result<Self> {
        let root: Value = serde_json::from_slice(bytes)
            .map_err(|e| FraudError::artifact(format!("artifact is not valid JSON: {}", e)))?;
        let obj = root
            .as_object()
            .ok_or_else(|| FraudError::artifact("artifact root must be an object"))?;

        let model: ModelSpec = take(obj, KEY_MODEL)?;
        let method: LabelEncoder = take(obj, KEY_ENCODER_METHOD)?;
        let provider: LabelEncoder = take(obj, KEY_ENCODER_PROVIDER)?;
        let scaler: Scaler = take(obj, KEY_SCALER)?;
        let columns: Vec<String> = take(obj, KEY_FEATURE_COLUMNS)?;
        let version = match obj.get("version") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        let scaler = scaler.validated()?;
        check_column_order(&columns).map_err(|e| FraudError::artifact(e.to_string()))?;
        let scorer = build_scorer(model, columns.len(), base_dir)?;

        Ok(Self {
            version,
            fingerprint: format!("{:x}", Sha256::digest(bytes)),
            builder: FeatureBuilder::new(
                EncodingTables {
                    method,
                    provider,
                    scaler,
                },
                columns,
            ),
            scorer,
        })
    }
}

fn take<T: serde::de::DeserializeOwned>(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<T> {
    let value = obj
        .get(key)
        .ok_or_else(|| FraudError::artifact(format!("missing key {:?}", key)))?;
    T::deserialize(value).map_err(|e| FraudError::artifact(format!("{}: {}", key, e)))
}

fn build_scorer(spec: ModelSpec, n_features: usize, base_dir: &Path) -> Result<Box<dyn Scorer>> {
    match spec {
        ModelSpec::RandomForest { trees } => Ok(Box::new(RandomForest::new(trees, n_features)?)),
        ModelSpec::Logistic { coef, intercept } => {
            Ok(Box::new(LogisticModel::new(coef, intercept, n_features)?))
        }
        ModelSpec::Onnx { path } => {
            let path = if path.is_relative() {
                base_dir.join(path)
            } else {
                path
            };
            onnx_scorer(&path, n_features)
        }
    }
}

#[cfg(feature = "onnx")]
fn onnx_scorer(path: &Path, n_features: usize) -> Result<Box<dyn Scorer>> {
    Ok(Box::new(super::onnx::OnnxScorer::load(path, n_features)?))
}

#[cfg(not(feature = "onnx"))]
fn onnx_scorer(path: &Path, _n_features: usize) -> Result<Box<dyn Scorer>> {
    Err(FraudError::artifact(format!(
        "{} needs the onnx feature, which this build does not include",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle_json() -> Value {
        json!({
            "version": "rf-2024-06",
            "model": {"kind": "logistic", "coef": [0.5, 0.0], "intercept": -1.0},
            "encoder_method": {"classes": ["bank_transfer", "credit_card"]},
            "encoder_provider": {"classes": ["bca", "ovo"]},
            "scaler": {"kind": "standard", "mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]},
            "feature_columns": ["rule_fast", "payment_method_name"]
        })
    }

    fn load(v: &Value) -> Result<ModelBundle> {
        ModelBundle::from_slice(v.to_string().as_bytes(), Path::new("."))
    }

    #[test]
    fn loads_complete_bundle() {
        let b = load(&bundle_json()).unwrap();
        assert_eq!(b.version.as_deref(), Some("rf-2024-06"));
        assert_eq!(b.fingerprint.len(), 64);
        assert_eq!(b.scorer.name(), "logistic");
        assert_eq!(b.builder.columns(), ["rule_fast", "payment_method_name"]);
    }

    #[test]
    fn every_key_is_required() {
        for key in [
            KEY_MODEL,
            KEY_ENCODER_METHOD,
            KEY_ENCODER_PROVIDER,
            KEY_SCALER,
            KEY_FEATURE_COLUMNS,
        ] {
            let mut v = bundle_json();
            v.as_object_mut().unwrap().remove(key);
            let err = load(&v).unwrap_err();
            assert!(
                matches!(err, FraudError::ArtifactLoadFailure { ref reason } if reason.contains(key)),
                "{}: {}",
                key,
                err
            );
        }
    }

    #[test]
    fn unknown_column_fails_load() {
        let mut v = bundle_json();
        v["feature_columns"] = json!(["rule_fast", "card_bin"]);
        assert!(matches!(load(&v), Err(FraudError::ArtifactLoadFailure { .. })));
    }

    #[test]
    fn model_width_must_match_columns() {
        let mut v = bundle_json();
        v["model"]["coef"] = json!([0.5]);
        assert!(matches!(load(&v), Err(FraudError::ArtifactLoadFailure { .. })));
    }

    #[test]
    fn garbage_is_load_failure() {
        let err = ModelBundle::from_slice(b"\x80\x04\x95pickle", Path::new(".")).unwrap_err();
        assert_eq!(err.kind(), "artifact_load_failure");
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_model_needs_feature() {
        let mut v = bundle_json();
        v["model"] = json!({"kind": "onnx", "path": "rf.onnx"});
        assert!(matches!(load(&v), Err(FraudError::ArtifactLoadFailure { .. })));
    }
}

//! ONNX Runtime scorer. Input: [1, n_features] f32, output: class probabilities [1, 2] (or [1, 1]).
//! Compiled only with the `onnx` feature.

use super::scorer::Scorer;
use crate::error::{FraudError, Result};
use crate::features::FeatureVector;
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;

pub struct OnnxScorer {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    n_features: usize,
}

impl OnnxScorer {
    /// Load the classifier. Unlike a best-effort detector, a missing file is a load failure.
    pub fn load(path: &Path, n_features: usize) -> Result<Self> {
        if !path.exists() {
            return Err(FraudError::artifact(format!(
                "onnx model not found at {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| FraudError::artifact(format!("onnx session for {}: {}", path.display(), e)))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "probabilities".to_string());

        tracing::info!(
            path = %path.display(),
            input = %input_name,
            output = %output_name,
            "onnx model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            n_features,
        })
    }
}

impl Scorer for OnnxScorer {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(FraudError::scoring(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            )));
        }

        let row: Vec<f32> = x.iter().map(|v| *v as f32).collect();
        let arr = Array2::from_shape_vec((1, row.len()), row)
            .map_err(|e| FraudError::scoring(e.to_string()))?;
        let input = Tensor::from_array(arr).map_err(|e| FraudError::scoring(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| FraudError::scoring("onnx session lock poisoned"))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| FraudError::scoring(e.to_string()))?;

        let (_, probs) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| FraudError::scoring(e.to_string()))?;

        let p = match probs {
            [_, fraud, ..] => *fraud,
            [single] => *single,
            [] => return Err(FraudError::scoring("onnx model returned no probabilities")),
        };
        Ok(p as f64)
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

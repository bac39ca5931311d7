//! Trained classifier: artifact loading and the scorers it can describe.

mod artifact;
mod forest;
mod linear;
#[cfg(feature = "onnx")]
mod onnx;
mod scorer;

pub use artifact::{
    ModelBundle, ModelSpec, KEY_ENCODER_METHOD, KEY_ENCODER_PROVIDER, KEY_FEATURE_COLUMNS,
    KEY_MODEL, KEY_SCALER,
};
pub use forest::{DecisionTree, RandomForest};
pub use linear::LogisticModel;
#[cfg(feature = "onnx")]
pub use onnx::OnnxScorer;
pub use scorer::{check_probability, ConstantScorer, Scorer};

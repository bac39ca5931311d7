//! fraud-check — transaction fraud scoring from a trained model artifact.
//!
//! Modular structure:
//! - [`features`] — Record validation, categorical encoding, rule features, scaling
//! - [`model`] — Artifact loading and scorers (random forest, logistic, optional ONNX)
//! - [`risk`] — Thresholded verdict and decision rendering
//! - [`predictor`] — Read-only context tying the three together
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod predictor;
pub mod risk;

pub use config::AppConfig;
pub use error::{FraudError, Result};
pub use features::{FeatureBuilder, FeatureVector, TransactionRecord};
pub use logging::StructuredLogger;
pub use model::{ModelBundle, Scorer};
pub use predictor::{FraudPredictor, RunSummary};
pub use risk::{Decision, RiskEngine, Verdict};

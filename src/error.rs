//! Error taxonomy for artifact loading and per-request prediction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FraudError>;

#[derive(Debug, Error)]
pub enum FraudError {
    /// Categorical label not present in the fitted encoder.
    #[error("unknown category for {field}: {label:?}")]
    UnknownCategory { field: &'static str, label: String },

    /// Column order names a column the feature builder does not produce.
    #[error("schema mismatch: column {column:?} is not a computed feature")]
    SchemaMismatch { column: String },

    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Fatal at startup: the artifact is missing, unreadable or inconsistent.
    #[error("artifact load failure: {reason}")]
    ArtifactLoadFailure { reason: String },

    #[error("scoring failed: {reason}")]
    Scoring { reason: String },
}

impl FraudError {
    pub fn artifact(reason: impl Into<String>) -> Self {
        FraudError::ArtifactLoadFailure {
            reason: reason.into(),
        }
    }

    pub fn scoring(reason: impl Into<String>) -> Self {
        FraudError::Scoring {
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in rejection lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FraudError::UnknownCategory { .. } => "unknown_category",
            FraudError::SchemaMismatch { .. } => "schema_mismatch",
            FraudError::InvalidInput { .. } => "invalid_input",
            FraudError::ArtifactLoadFailure { .. } => "artifact_load_failure",
            FraudError::Scoring { .. } => "scoring",
        }
    }
}

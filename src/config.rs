//! Application configuration. The model artifact owns everything about scoring; this only
//! says where to find it and how to present results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::risk::FRAUD_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the JSON model artifact
    pub artifact_path: PathBuf,
    /// Verdict threshold
    pub risk: RiskConfig,
    pub output: OutputConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Probability at or above this is FRAUD (0.0–1.0)
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("fraud_model.json"),
            risk: RiskConfig::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            threshold: FRAUD_THRESHOLD,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Where a loaded config came from; reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
    /// File existed but could not be read, parsed or checked
    Invalid { path: PathBuf, error: String },
}

impl RiskConfig {
    /// Threshold must be a probability; anything else would make one verdict unreachable.
    pub fn check(&self) -> Result<(), String> {
        if self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(format!("risk.threshold {} outside [0, 1]", self.threshold))
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load_with_source(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Self::default(), ConfigSource::Default);
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|data| serde_json::from_str::<AppConfig>(&data).map_err(|e| e.to_string()))
            .and_then(|c| c.risk.check().map(|_| c));
        match parsed {
            Ok(c) => (c, ConfigSource::File(path.to_path_buf())),
            Err(error) => (
                Self::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    error,
                },
            ),
        }
    }
}

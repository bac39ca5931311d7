//! Read-only prediction context: built once at startup, borrowed by every request.

use crate::config::{OutputFormat, RiskConfig};
use crate::error::Result;
use crate::features::{FeatureBuilder, TransactionRecord};
use crate::logging::{Rejection, StructuredLogger};
use crate::model::{check_probability, ModelBundle, Scorer};
use crate::risk::{Decision, RiskEngine};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Counts for one pass over an input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scored: u64,
    pub rejected: u64,
}

pub struct FraudPredictor {
    builder: FeatureBuilder,
    scorer: Box<dyn Scorer>,
    risk: RiskEngine,
}

impl FraudPredictor {
    pub fn new(builder: FeatureBuilder, scorer: Box<dyn Scorer>, risk: RiskConfig) -> Self {
        Self {
            builder,
            scorer,
            risk: RiskEngine::new(risk),
        }
    }

    pub fn from_bundle(bundle: ModelBundle, risk: RiskConfig) -> Self {
        Self::new(bundle.builder, bundle.scorer, risk)
    }

    /// Load the artifact and build the context. Any failure here is fatal for the caller.
    pub fn load(artifact: &Path, risk: RiskConfig) -> Result<Self> {
        Ok(Self::from_bundle(ModelBundle::load(artifact)?, risk))
    }

    pub fn builder(&self) -> &FeatureBuilder {
        &self.builder
    }

    /// Known payment method labels, in encoder order.
    pub fn payment_methods(&self) -> &[String] {
        self.builder.tables().method.classes()
    }

    pub fn payment_providers(&self) -> &[String] {
        self.builder.tables().provider.classes()
    }

    pub fn predict(&self, record: &TransactionRecord) -> Result<Decision> {
        self.predict_with_id(Uuid::new_v4().to_string(), record)
    }

    /// Build → score → render. No partial result on error; the scorer is not called
    /// unless the feature vector was built.
    pub fn predict_with_id(&self, request_id: String, record: &TransactionRecord) -> Result<Decision> {
        let features = self.builder.build(record)?;
        debug!(request_id = %request_id, features = ?features.values, "feature vector built");

        let probability = check_probability(self.scorer.predict(&features)?)?;
        let decision = self.risk.render(request_id, probability, &features);

        info!(
            request_id = %decision.request_id,
            probability = decision.probability,
            verdict = %decision.verdict,
            scorer = self.scorer.name(),
            "prediction"
        );
        Ok(decision)
    }

    /// Score one JSON record per input line, writing one decision or rejection per record.
    /// Blank lines are skipped. Bad records (undecodable bytes, malformed JSON, failed
    /// prediction) are rejected individually; only I/O errors stop the run.
    pub fn run(
        &self,
        input: impl BufRead,
        out: &mut impl Write,
        format: OutputFormat,
    ) -> std::io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        for line in input.split(b'\n') {
            let line = line?;
            let text = match std::str::from_utf8(&line) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => Ok(text),
                Err(e) => Err(e),
            };

            let request_id = Uuid::new_v4().to_string();
            let outcome = text
                .map_err(|e| ("invalid_input", format!("record is not valid UTF-8: {}", e)))
                .and_then(|text| {
                    serde_json::from_str::<TransactionRecord>(text)
                        .map_err(|e| ("invalid_input", e.to_string()))
                })
                .and_then(|record| {
                    self.predict_with_id(request_id.clone(), &record)
                        .map_err(|e| (e.kind(), e.to_string()))
                });

            match outcome {
                Ok(decision) => {
                    match format {
                        OutputFormat::Json => StructuredLogger::emit_json(&decision, out)?,
                        OutputFormat::Text => writeln!(out, "{}", decision)?,
                    }
                    summary.scored += 1;
                }
                Err((kind, error)) => {
                    warn!(request_id = %request_id, kind, error = %error, "request rejected");
                    let rejection = Rejection {
                        request_id: &request_id,
                        kind,
                        error,
                    };
                    match format {
                        OutputFormat::Json => StructuredLogger::emit_json(&rejection, out)?,
                        OutputFormat::Text => {
                            writeln!(out, "Rejected ({}): {}\n", rejection.kind, rejection.error)?
                        }
                    }
                    summary.rejected += 1;
                }
            }
            out.flush()?;
        }
        Ok(summary)
    }
}

//! fraud-check entrypoint: loads the model artifact once, then scores one JSON transaction
//! record per stdin line and writes one decision (or rejection) per stdout line.

use fraud_check::{
    config::{AppConfig, ConfigSource},
    logging::StructuredLogger,
    FraudPredictor,
};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("FRAUD_CHECK_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let (config, source) = AppConfig::load_with_source(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "configuration loaded"),
        ConfigSource::Default => info!("no configuration file, using defaults"),
        ConfigSource::Invalid { path, error } => {
            warn!(path = %path.display(), error = %error, "configuration unreadable, using defaults")
        }
    }

    // no predictions without a complete artifact
    let predictor = FraudPredictor::load(&config.artifact_path, config.risk.clone())?;
    info!(
        threshold = config.risk.threshold,
        methods = ?predictor.payment_methods(),
        providers = ?predictor.payment_providers(),
        "fraud-check ready, reading records from stdin"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = predictor.run(stdin.lock(), &mut stdout.lock(), config.output.format)?;

    info!(scored = summary.scored, rejected = summary.rejected, "fraud-check finished");
    Ok(())
}

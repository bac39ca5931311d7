//! Integration test: config load, artifact load, feature build, scoring, verdict, stdin run.

use fraud_check::{
    config::{AppConfig, ConfigSource, OutputFormat},
    features::COMPUTED_COLUMNS,
    model::ModelBundle,
    predictor::RunSummary,
    risk::FRAUD_THRESHOLD,
    FraudError, FraudPredictor, TransactionRecord, Verdict,
};
use std::path::{Path, PathBuf};

fn demo_artifact() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/fraud_model.json")
}

fn predictor() -> FraudPredictor {
    FraudPredictor::load(&demo_artifact(), Default::default()).unwrap()
}

fn example_record() -> TransactionRecord {
    TransactionRecord {
        transaction_amount: 120_000.0,
        payment_method_name: "ewallet".into(),
        payment_provider_name: "gopay".into(),
        processing_seconds: 5.0,
        buyer_seller_tx_count: 5,
        buyer_total_tx: 10,
        buyer_avg_amount: 50_000.0,
        buyer_promo_count: 2,
        seller_total_tx: 120,
        seller_repeat_buyer: 3,
    }
}

#[test]
fn config_load_default() {
    let (c, source) = AppConfig::load_with_source(Path::new("nonexistent.json"));
    assert_eq!(source, ConfigSource::Default);
    assert_eq!(c.risk.threshold, FRAUD_THRESHOLD);
    assert_eq!(c.output.format, OutputFormat::Json);
}

#[test]
fn config_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"output": {"format": "text"}}"#).unwrap();
    let (c, source) = AppConfig::load_with_source(&path);
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert_eq!(c.output.format, OutputFormat::Text);
    assert_eq!(c.artifact_path, PathBuf::from("fraud_model.json"));

    std::fs::write(&path, "{not json").unwrap();
    let (_, source) = AppConfig::load_with_source(&path);
    assert!(matches!(source, ConfigSource::Invalid { .. }));
}

#[test]
fn example_transaction_is_normal() {
    let p = predictor();
    let d = p.predict(&example_record()).unwrap();

    for rule in [
        "rule_big_amount",
        "rule_fast",
        "rule_new_buyer_big_tx",
        "rule_abnormal_ratio",
        "rule_promo_abuse",
    ] {
        assert_eq!(d.features[rule], 0.0, "{}", rule);
    }
    let scaled_amount = d.features["transaction_amount"].as_f64().unwrap();
    assert!((scaled_amount - (120_000.0 - 850_000.0) / 2_500_000.0).abs() < 1e-12);
    assert_eq!(d.features["payment_method_name"], 3.0);
    assert_eq!(d.features["payment_provider_name"], 4.0);
    assert_eq!(d.features["buyer_total_tx"], 10.0);

    let expected = (4.0 / 94.0 + 6.0 / 86.0 + 5.0 / 125.0) / 3.0;
    assert!((d.probability - expected).abs() < 1e-12);
    assert_eq!(d.verdict, Verdict::Normal);
    assert_eq!(d.threshold, 0.30);
    let keys: Vec<&str> = d.features.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, COMPUTED_COLUMNS);
}

#[test]
fn fast_big_transaction_is_fraud() {
    let p = predictor();
    let mut r = example_record();
    r.transaction_amount = 900_000.0;
    r.processing_seconds = 0.5;
    let d = p.predict(&r).unwrap();
    assert_eq!(d.features["rule_big_amount"], 1.0);
    assert_eq!(d.features["rule_fast"], 1.0);
    let expected = (45.0 / 50.0 + 6.0 / 86.0 + 22.0 / 28.0) / 3.0;
    assert!((d.probability - expected).abs() < 1e-12);
    assert_eq!(d.verdict, Verdict::Fraud);
}

#[test]
fn build_is_deterministic() {
    let p = predictor();
    let a = p.builder().build(&example_record()).unwrap();
    let b = p.builder().build(&example_record()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_category_rejected() {
    let p = predictor();
    let mut r = example_record();
    r.payment_provider_name = "paypal".into();
    match p.predict(&r) {
        Err(FraudError::UnknownCategory { field, label }) => {
            assert_eq!(field, "payment_provider_name");
            assert_eq!(label, "paypal");
        }
        other => panic!("expected UnknownCategory, got {:?}", other.map(|d| d.verdict)),
    }
}

#[test]
fn negative_count_rejected() {
    let p = predictor();
    let mut r = example_record();
    r.seller_total_tx = -3;
    assert!(matches!(p.predict(&r), Err(FraudError::InvalidInput { .. })));
}

#[test]
fn missing_artifact_key_is_fatal() {
    let text = std::fs::read_to_string(demo_artifact()).unwrap();
    let mut v: serde_json::Value = serde_json::from_str(&text).unwrap();
    v.as_object_mut().unwrap().remove("scaler");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, v.to_string()).unwrap();
    assert!(matches!(
        ModelBundle::load(&path),
        Err(FraudError::ArtifactLoadFailure { .. })
    ));
    assert!(matches!(
        FraudPredictor::load(&dir.path().join("absent.json"), Default::default()),
        Err(FraudError::ArtifactLoadFailure { .. })
    ));
}

#[test]
fn demo_label_sets() {
    let p = predictor();
    assert_eq!(p.payment_methods().len(), 7);
    assert!(p.payment_providers().iter().any(|l| l == "ovo"));
}

#[test]
fn stdin_run_rejects_bad_lines_and_keeps_going() {
    let p = predictor();
    let mut input = std::fs::read(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/transactions.jsonl"),
    )
    .unwrap();
    input.extend_from_slice(b"\n{\"payment_method_name\": \"ewa\xfflet\", \"payment_provider_name\": \"ovo\"}\n");
    input.extend_from_slice(b"{not json\n");
    input.extend_from_slice(b"{\"payment_method_name\": \"qris\", \"payment_provider_name\": \"dana\"}\n");

    let mut out = Vec::new();
    let summary = p.run(&input[..], &mut out, OutputFormat::Json).unwrap();
    assert_eq!(summary, RunSummary { scored: 3, rejected: 3 });

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 6);

    assert_eq!(lines[0]["verdict"], "NORMAL");
    assert_eq!(lines[1]["verdict"], "FRAUD");
    let kinds: Vec<&str> = lines[2..5].iter().map(|l| l["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["unknown_category", "invalid_input", "invalid_input"]);
    for rejection in &lines[2..5] {
        assert!(rejection["error"].is_string());
        assert!(rejection.get("verdict").is_none());
    }
    assert!(lines[3]["error"].as_str().unwrap().contains("UTF-8"));
    assert_eq!(lines[5]["verdict"], "NORMAL");
}

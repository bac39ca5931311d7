//! Feature benchmark: transaction record → encoded, scaled, ordered feature vector.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fraud_check::features::{EncodingTables, FeatureBuilder, LabelEncoder, Scaler, COMPUTED_COLUMNS};
use fraud_check::TransactionRecord;

fn make_builder(columns: &[&str]) -> FeatureBuilder {
    let tables = EncodingTables {
        method: LabelEncoder::new(vec!["bank_transfer".into(), "credit_card".into(), "ewallet".into()])
            .unwrap(),
        provider: LabelEncoder::new(vec!["bca".into(), "gopay".into(), "ovo".into()]).unwrap(),
        scaler: Scaler::Standard {
            mean: vec![850_000.0, 12.5, 400_000.0],
            scale: vec![2_500_000.0, 18.0, 900_000.0],
        }
        .validated()
        .unwrap(),
    };
    FeatureBuilder::new(tables, columns.iter().map(|s| s.to_string()).collect())
}

fn bench_build_full(c: &mut Criterion) {
    let builder = make_builder(&COMPUTED_COLUMNS);
    let record = TransactionRecord::with_defaults("ewallet", "gopay");

    c.bench_function("feature_build_15_columns", |b| {
        b.iter(|| black_box(builder.build(black_box(&record))).unwrap())
    });
}

fn bench_build_by_width(c: &mut Criterion) {
    let record = TransactionRecord::with_defaults("credit_card", "ovo");

    let mut g = c.benchmark_group("feature_build_by_width");
    for width in [3, 8, 15] {
        let builder = make_builder(&COMPUTED_COLUMNS[..width]);
        g.bench_function(format!("width_{}", width).as_str(), |b| {
            b.iter(|| black_box(builder.build(black_box(&record))).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_build_full, bench_build_by_width);
criterion_main!(benches);

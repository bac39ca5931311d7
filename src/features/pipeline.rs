//! Feature pipeline: record → encode → rules → scale → column selection.

use super::{DerivedFeatures, EncodingTables, FeatureVector, TransactionRecord, SCALED_COLUMNS};
use crate::error::{FraudError, Result};

/// Every column the builder can produce, in computation order.
pub const COMPUTED_COLUMNS: [&str; 15] = [
    "transaction_amount",
    "payment_method_name",
    "payment_provider_name",
    "processing_seconds",
    "buyer_seller_tx_count",
    "buyer_total_tx",
    "buyer_avg_amount",
    "buyer_promo_count",
    "seller_total_tx",
    "seller_repeat_buyer",
    "rule_big_amount",
    "rule_fast",
    "rule_new_buyer_big_tx",
    "rule_abnormal_ratio",
    "rule_promo_abuse",
];

/// Build the model input for one record. Pure: no state beyond the read-only tables.
pub fn build(
    record: &TransactionRecord,
    tables: &EncodingTables,
    column_order: &[String],
) -> Result<FeatureVector> {
    record.validate()?;

    let method = tables
        .method
        .transform("payment_method_name", &record.payment_method_name)?;
    let provider = tables
        .provider
        .transform("payment_provider_name", &record.payment_provider_name)?;

    // rules see raw values; scaling happens afterwards
    let rules = DerivedFeatures::from_record(record);

    let mut computed: Vec<(&'static str, f64)> = vec![
        ("transaction_amount", record.transaction_amount),
        ("payment_method_name", method as f64),
        ("payment_provider_name", provider as f64),
        ("processing_seconds", record.processing_seconds),
        ("buyer_seller_tx_count", record.buyer_seller_tx_count as f64),
        ("buyer_total_tx", record.buyer_total_tx as f64),
        ("buyer_avg_amount", record.buyer_avg_amount),
        ("buyer_promo_count", record.buyer_promo_count as f64),
        ("seller_total_tx", record.seller_total_tx as f64),
        ("seller_repeat_buyer", record.seller_repeat_buyer as f64),
    ];
    computed.extend(rules.columns());

    for (pos, name) in SCALED_COLUMNS.iter().enumerate() {
        if let Some(slot) = computed.iter_mut().find(|(n, _)| n == name) {
            slot.1 = tables.scaler.transform(pos, slot.1);
        }
    }

    let mut values = Vec::with_capacity(column_order.len());
    for column in column_order {
        let value = computed
            .iter()
            .find(|(n, _)| *n == column.as_str())
            .map(|(_, v)| *v)
            .ok_or_else(|| FraudError::SchemaMismatch {
                column: column.clone(),
            })?;
        values.push(value);
    }

    Ok(FeatureVector {
        names: column_order.to_vec(),
        values,
    })
}

/// Startup check that every ordered column is one the builder computes.
pub fn check_column_order(column_order: &[String]) -> Result<()> {
    if column_order.is_empty() {
        return Err(FraudError::SchemaMismatch {
            column: String::new(),
        });
    }
    for (i, column) in column_order.iter().enumerate() {
        if !COMPUTED_COLUMNS.contains(&column.as_str()) {
            return Err(FraudError::SchemaMismatch {
                column: column.clone(),
            });
        }
        if column_order[..i].contains(column) {
            return Err(FraudError::SchemaMismatch {
                column: column.clone(),
            });
        }
    }
    Ok(())
}

/// Builder bound to one artifact's tables and column order.
pub struct FeatureBuilder {
    tables: EncodingTables,
    columns: Vec<String>,
}

impl FeatureBuilder {
    pub fn new(tables: EncodingTables, columns: Vec<String>) -> Self {
        Self { tables, columns }
    }

    pub fn build(&self, record: &TransactionRecord) -> Result<FeatureVector> {
        build(record, &self.tables, &self.columns)
    }

    pub fn tables(&self) -> &EncodingTables {
        &self.tables
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn feature_dim(&self) -> usize {
        self.columns.len()
    }
}

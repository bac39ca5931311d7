//! Raw transaction attributes as submitted by the caller.

use crate::error::{FraudError, Result};
use serde::{Deserialize, Serialize};

/// One prediction request. Numeric fields missing from JSON take the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default = "default_transaction_amount")]
    pub transaction_amount: f64,
    pub payment_method_name: String,
    pub payment_provider_name: String,
    #[serde(default = "default_processing_seconds")]
    pub processing_seconds: f64,
    #[serde(default = "default_buyer_seller_tx_count")]
    pub buyer_seller_tx_count: i64,
    #[serde(default = "default_buyer_total_tx")]
    pub buyer_total_tx: i64,
    #[serde(default = "default_buyer_avg_amount")]
    pub buyer_avg_amount: f64,
    #[serde(default = "default_buyer_promo_count")]
    pub buyer_promo_count: i64,
    #[serde(default = "default_seller_total_tx")]
    pub seller_total_tx: i64,
    #[serde(default = "default_seller_repeat_buyer")]
    pub seller_repeat_buyer: i64,
}

fn default_transaction_amount() -> f64 {
    120_000.0
}

fn default_processing_seconds() -> f64 {
    5.0
}

fn default_buyer_seller_tx_count() -> i64 {
    5
}

fn default_buyer_total_tx() -> i64 {
    10
}

fn default_buyer_avg_amount() -> f64 {
    50_000.0
}

fn default_buyer_promo_count() -> i64 {
    2
}

fn default_seller_total_tx() -> i64 {
    120
}

fn default_seller_repeat_buyer() -> i64 {
    3
}

impl TransactionRecord {
    /// Record pre-filled with the form defaults for the given categorical labels.
    pub fn with_defaults(method: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            transaction_amount: default_transaction_amount(),
            payment_method_name: method.into(),
            payment_provider_name: provider.into(),
            processing_seconds: default_processing_seconds(),
            buyer_seller_tx_count: default_buyer_seller_tx_count(),
            buyer_total_tx: default_buyer_total_tx(),
            buyer_avg_amount: default_buyer_avg_amount(),
            buyer_promo_count: default_buyer_promo_count(),
            seller_total_tx: default_seller_total_tx(),
            seller_repeat_buyer: default_seller_repeat_buyer(),
        }
    }

    /// Check the numeric range constraints. Categorical labels are checked by the encoders.
    pub fn validate(&self) -> Result<()> {
        check_number("transaction_amount", self.transaction_amount, 1.0)?;
        check_number("processing_seconds", self.processing_seconds, 0.0)?;
        check_number("buyer_avg_amount", self.buyer_avg_amount, 0.0)?;
        check_count("buyer_seller_tx_count", self.buyer_seller_tx_count)?;
        check_count("buyer_total_tx", self.buyer_total_tx)?;
        check_count("buyer_promo_count", self.buyer_promo_count)?;
        check_count("seller_total_tx", self.seller_total_tx)?;
        check_count("seller_repeat_buyer", self.seller_repeat_buyer)?;
        Ok(())
    }
}

fn check_number(field: &'static str, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(FraudError::InvalidInput {
            field,
            reason: format!("{} is not a finite number", value),
        });
    }
    if value < min {
        return Err(FraudError::InvalidInput {
            field,
            reason: format!("{} is below the minimum {}", value, min),
        });
    }
    Ok(())
}

fn check_count(field: &'static str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(FraudError::InvalidInput {
            field,
            reason: format!("count {} is negative", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_numbers_take_form_defaults() {
        let r: TransactionRecord = serde_json::from_str(
            r#"{"payment_method_name":"card","payment_provider_name":"visa"}"#,
        )
        .unwrap();
        assert_eq!(r, TransactionRecord::with_defaults("card", "visa"));
    }

    #[test]
    fn negative_count_is_invalid() {
        let mut r = TransactionRecord::with_defaults("card", "visa");
        r.buyer_promo_count = -1;
        match r.validate() {
            Err(FraudError::InvalidInput { field, .. }) => assert_eq!(field, "buyer_promo_count"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn amount_minimum_is_one() {
        let mut r = TransactionRecord::with_defaults("card", "visa");
        r.transaction_amount = 1.0;
        assert!(r.validate().is_ok());
        r.transaction_amount = 0.5;
        assert!(r.validate().is_err());
        r.transaction_amount = f64::NAN;
        assert!(r.validate().is_err());
    }
}

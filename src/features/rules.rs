//! Rule indicators derived from the unscaled record.

use super::TransactionRecord;

/// Amount above which a first-time buyer's transaction is flagged.
pub const NEW_BUYER_BIG_AMOUNT: f64 = 10_000_000.0;
/// Buyer/seller activity ratio above which the pair is flagged.
pub const ABNORMAL_RATIO: f64 = 50.0;
pub const PROMO_ABUSE_COUNT: i64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedFeatures {
    pub rule_big_amount: bool,
    pub rule_fast: bool,
    pub rule_new_buyer_big_tx: bool,
    pub rule_abnormal_ratio: bool,
    pub rule_promo_abuse: bool,
}

impl DerivedFeatures {
    pub fn from_record(r: &TransactionRecord) -> Self {
        let ratio = (r.buyer_total_tx as f64 + 1.0) / (r.seller_total_tx as f64 + 1.0);
        Self {
            rule_big_amount: r.transaction_amount > r.buyer_avg_amount * 3.0,
            rule_fast: r.processing_seconds < 1.0,
            rule_new_buyer_big_tx: r.buyer_total_tx == 1
                && r.transaction_amount > NEW_BUYER_BIG_AMOUNT,
            rule_abnormal_ratio: ratio > ABNORMAL_RATIO,
            rule_promo_abuse: r.buyer_promo_count > PROMO_ABUSE_COUNT,
        }
    }

    /// Named 0/1 columns in derivation order.
    pub fn columns(&self) -> [(&'static str, f64); 5] {
        [
            ("rule_big_amount", flag(self.rule_big_amount)),
            ("rule_fast", flag(self.rule_fast)),
            ("rule_new_buyer_big_tx", flag(self.rule_new_buyer_big_tx)),
            ("rule_abnormal_ratio", flag(self.rule_abnormal_ratio)),
            ("rule_promo_abuse", flag(self.rule_promo_abuse)),
        ]
    }

    pub fn any(&self) -> bool {
        self.rule_big_amount
            || self.rule_fast
            || self.rule_new_buyer_big_tx
            || self.rule_abnormal_ratio
            || self.rule_promo_abuse
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

//! Decision rendering: probability → verdict.

mod engine;

pub use engine::{Decision, RiskEngine, Verdict, FRAUD_THRESHOLD};

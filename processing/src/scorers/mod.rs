pub mod heuristic;
pub mod noise;

pub use heuristic::*;
pub use noise::*;

use crate::model::{ScoreBreakdown, TransactionRequest};

pub trait Scorer: Send + Sync {
    fn score(&self, transaction: &TransactionRequest) -> ScoreBreakdown;
}

use crate::{
    classifier::classify,
    model::{FraudCheckResponse, TransactionRequest},
    scorers::Scorer,
};
#[cfg(not(test))]
use tracing::{debug, info};
#[cfg(test)]
use {println as debug, println as info};

pub struct Processor<S: Scorer> {
    scorer: S,
}

impl<S: Scorer> Processor<S> {
    pub fn new(scorer: S) -> Self {
        info!("Initializing new Processor");
        Self { scorer }
    }

    pub fn check(&self, transaction: &TransactionRequest) -> FraudCheckResponse {
        debug!("Checking transaction {}", transaction.transaction_id);

        let breakdown = self.scorer.score(transaction);
        let assessment = classify(breakdown.total);

        info!(
            "Transaction {} scored {:.4} ({}), rules: {:?}",
            transaction.transaction_id,
            breakdown.total,
            assessment.risk_level,
            breakdown.rule_names()
        );

        metrics::counter!(
            "paysecure_fraud_checks_total",
            "risk_level" => assessment.risk_level.to_string()
        )
        .increment(1);
        metrics::histogram!("paysecure_fraud_score").record(breakdown.total);

        FraudCheckResponse {
            transaction_id: transaction.transaction_id.clone(),
            fraud_score: breakdown.total,
            is_fraudulent: assessment.is_fraudulent,
            risk_level: assessment.risk_level,
            details: assessment.details,
        }
    }
}

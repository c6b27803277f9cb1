use serde::{Deserialize, Serialize};
use strum_macros::Display as EnumDisplay;
use utoipa::ToSchema;

pub mod validation;

pub use validation::{FieldError, FieldErrorKind};

/// A payment transaction submitted for a fraud check.
///
/// Request bodies go through [`TransactionRequest::from_json_value`], which
/// reports every invalid field before serde decodes the typed model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TransactionRequest {
    #[schema(example = "TX-1001")]
    pub transaction_id: String,
    #[schema(minimum = 0.0, example = 150000.0)]
    pub amount: f64,
    pub merchant_id: String,
    pub user_id: String,
    #[schema(example = "international")]
    pub transaction_type: String,
}

impl TransactionRequest {
    pub fn new(
        transaction_id: impl Into<String>,
        amount: f64,
        merchant_id: impl Into<String>,
        user_id: impl Into<String>,
        transaction_type: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            amount,
            merchant_id: merchant_id.into(),
            user_id: user_id.into(),
            transaction_type: transaction_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FraudCheckResponse {
    pub transaction_id: String,
    pub fraud_score: f64,
    pub is_fraudulent: bool,
    pub risk_level: RiskLevel,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A heuristic rule that fired, with the weight it contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerResult {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub triggered: Vec<ScorerResult>,
    pub noise: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn rule_names(&self) -> Vec<&str> {
        self.triggered.iter().map(|r| r.name.as_str()).collect()
    }
}

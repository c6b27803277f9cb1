use crate::model::RiskLevel;

pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub is_fraudulent: bool,
    pub details: String,
}

pub fn risk_level(score: f64) -> RiskLevel {
    if score > HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score > MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn classify(score: f64) -> RiskAssessment {
    let risk_level = risk_level(score);
    RiskAssessment {
        risk_level,
        is_fraudulent: risk_level == RiskLevel::High,
        details: format!("Transaction analyzed. Risk: {risk_level}"),
    }
}

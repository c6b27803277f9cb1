use crate::{
    model::{ScoreBreakdown, ScorerResult, TransactionRequest},
    scorers::{NoiseSource, Scorer, ThreadRngNoise},
};

pub const HIGH_AMOUNT_THRESHOLD: f64 = 100_000.0;
pub const HIGH_AMOUNT_WEIGHT: f64 = 0.3;
pub const INTERNATIONAL_TYPE: &str = "international";
pub const INTERNATIONAL_WEIGHT: f64 = 0.2;
pub const MAX_SCORE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum RuleCondition {
    /// Strictly greater than the threshold.
    AmountAbove(f64),
    /// Exact, case-sensitive match.
    TransactionTypeIs(String),
}

impl RuleCondition {
    pub fn matches(&self, transaction: &TransactionRequest) -> bool {
        match self {
            RuleCondition::AmountAbove(threshold) => transaction.amount > *threshold,
            RuleCondition::TransactionTypeIs(kind) => transaction.transaction_type == *kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicRule {
    pub name: String,
    pub description: String,
    pub condition: RuleCondition,
    pub weight: f64,
}

pub fn default_rules() -> Vec<HeuristicRule> {
    vec![
        HeuristicRule {
            name: "high_amount".to_string(),
            description: format!("Amount above {HIGH_AMOUNT_THRESHOLD}"),
            condition: RuleCondition::AmountAbove(HIGH_AMOUNT_THRESHOLD),
            weight: HIGH_AMOUNT_WEIGHT,
        },
        HeuristicRule {
            name: "international".to_string(),
            description: "International transaction".to_string(),
            condition: RuleCondition::TransactionTypeIs(INTERNATIONAL_TYPE.to_string()),
            weight: INTERNATIONAL_WEIGHT,
        },
    ]
}

/// Rule weights plus a random component, capped at [`MAX_SCORE`].
///
/// With the default rules the highest reachable score is just under 0.7
/// (0.3 + 0.2 + a draw below 0.2), so the cap never applies and no
/// transaction reaches the HIGH band.
pub struct HeuristicScorer<N: NoiseSource = ThreadRngNoise> {
    rules: Vec<HeuristicRule>,
    noise: N,
}

impl HeuristicScorer<ThreadRngNoise> {
    pub fn new() -> Self {
        Self::new_with_noise(ThreadRngNoise)
    }
}

impl Default for HeuristicScorer<ThreadRngNoise> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoiseSource> HeuristicScorer<N> {
    pub fn new_with_noise(noise: N) -> Self {
        Self::new_with_rules(default_rules(), noise)
    }

    pub fn new_with_rules(rules: Vec<HeuristicRule>, noise: N) -> Self {
        Self { rules, noise }
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }
}

impl<N: NoiseSource> Scorer for HeuristicScorer<N> {
    fn score(&self, transaction: &TransactionRequest) -> ScoreBreakdown {
        let triggered: Vec<ScorerResult> = self
            .rules
            .iter()
            .filter(|rule| rule.condition.matches(transaction))
            .inspect(|rule| {
                tracing::debug!(
                    transaction_id = %transaction.transaction_id,
                    rule = %rule.name,
                    weight = rule.weight,
                    "{}",
                    rule.description
                );
            })
            .map(|rule| ScorerResult {
                name: rule.name.clone(),
                weight: rule.weight,
            })
            .collect();

        let noise = self.noise.sample();
        let raw: f64 = triggered.iter().map(|r| r.weight).sum::<f64>() + noise;
        let total = raw.min(MAX_SCORE);

        tracing::trace!(
            transaction_id = %transaction.transaction_id,
            triggered = triggered.len(),
            noise,
            raw,
            total,
            "Scored transaction"
        );

        ScoreBreakdown {
            triggered,
            noise,
            total,
        }
    }
}

use axum::http::StatusCode;
use common::{generate_unique_id, test_assert, test_assert_eq, transaction_json};
use common::test_helpers::{test_utils, TestResult};

use super::mocks::{check, create_random_app, create_test_app};

#[tokio::test]
async fn test_small_domestic_is_low_risk() -> TestResult {
    // Arrange: domestic transaction below the amount threshold
    let id = generate_unique_id("DOM");
    let body = transaction_json(&id, 50000.0, "domestic");

    // Act
    let (status, json) = check(create_test_app(0.15), &body).await?;

    // Assert
    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(json["transaction_id"], id.as_str());
    test_assert_eq!(json["fraud_score"], 0.15);
    test_assert_eq!(json["risk_level"], "LOW");
    test_assert_eq!(json["is_fraudulent"], false);
    test_assert_eq!(json["details"], "Transaction analyzed. Risk: LOW");
    Ok(())
}

#[tokio::test]
async fn test_large_international_is_medium_risk() -> TestResult {
    let id = generate_unique_id("INTL");
    let body = transaction_json(&id, 150000.0, "international");

    let (status, json) = check(create_test_app(0.05), &body).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    let score = json["fraud_score"].as_f64().unwrap_or(-1.0);
    test_assert!((score - 0.55).abs() < 1e-9, "unexpected score {}", score);
    test_assert_eq!(json["risk_level"], "MEDIUM");
    test_assert_eq!(json["is_fraudulent"], false);
    test_assert_eq!(json["details"], "Transaction analyzed. Risk: MEDIUM");
    Ok(())
}

#[tokio::test]
async fn test_only_international_rule() -> TestResult {
    let body = transaction_json("TX-INTL-SMALL", 99.99, "international");

    let (status, json) = check(create_test_app(0.0), &body).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(json["fraud_score"], 0.2);
    test_assert_eq!(json["risk_level"], "LOW");
    Ok(())
}

#[tokio::test]
async fn test_only_high_amount_rule_with_noise_crosses_medium() -> TestResult {
    let body = transaction_json("TX-BIG-DOM", 250000.0, "domestic");

    let (status, json) = check(create_test_app(0.15), &body).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(json["risk_level"], "MEDIUM");
    test_assert_eq!(json["is_fraudulent"], false);
    Ok(())
}

#[tokio::test]
async fn test_amount_at_threshold_does_not_trigger() -> TestResult {
    let body = transaction_json("TX-EDGE", 100000.0, "domestic");

    let (_, json) = check(create_test_app(0.0), &body).await?;

    test_assert_eq!(json["fraud_score"], 0.0);
    test_assert_eq!(json["risk_level"], "LOW");
    Ok(())
}

#[tokio::test]
async fn test_worst_case_never_reaches_high() -> TestResult {
    // Heaviest rules plus the largest draw still stay in the MEDIUM band
    let body = transaction_json("TX-WORST", 1.0e9, "international");

    let (status, json) = check(create_test_app(1.0), &body).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    let score = json["fraud_score"].as_f64().unwrap_or(f64::NAN);
    test_assert!(score < 0.7 && score > 0.69, "unexpected score {}", score);
    test_assert_eq!(json["risk_level"], "MEDIUM");
    test_assert_eq!(json["is_fraudulent"], false);
    Ok(())
}

#[tokio::test]
async fn test_response_has_exactly_contract_fields() -> TestResult {
    let body = transaction_json("TX-SHAPE", 10.0, "domestic");

    let (_, json) = check(create_test_app(0.1), &body).await?;

    let mut keys: Vec<&str> = json
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    keys.sort_unstable();
    test_assert_eq!(
        keys,
        vec!["details", "fraud_score", "is_fraudulent", "risk_level", "transaction_id"]
    );
    Ok(())
}

#[tokio::test]
async fn test_random_scores_hold_invariants() -> TestResult {
    let cases = [
        (50000.0, "domestic", 0.0, 0.2),
        (150000.0, "international", 0.5, 0.7),
        (150000.0, "domestic", 0.3, 0.5),
        (10.0, "international", 0.2, 0.4),
    ];

    for (amount, transaction_type, low, high) in cases {
        for _ in 0..50 {
            let id = generate_unique_id("RND");
            let body = transaction_json(&id, amount, transaction_type);

            let (status, json) = check(create_random_app(), &body).await?;

            test_utils::check_status_code(status, StatusCode::OK)?;
            let score = json["fraud_score"].as_f64().unwrap_or(f64::NAN);
            test_assert!((0.0..=1.0).contains(&score), "score {} outside [0, 1]", score);
            test_assert!(
                score >= low && score <= high,
                "score {} outside [{}, {}] for {} {}",
                score, low, high, amount, transaction_type
            );
            test_assert_eq!(json["is_fraudulent"], serde_json::Value::Bool(score > 0.7));
            test_assert_eq!(json["transaction_id"], id.as_str());
        }
    }
    Ok(())
}

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::DateTime;
use common::{test_assert, test_assert_eq};
use common::test_helpers::{test_utils, TestError, TestResult};
use serde_json::json;
use tower::ServiceExt;

use super::mocks::{create_test_app, response_body_string, send, CHECK_URI};

#[tokio::test]
async fn test_root() -> TestResult {
    let (status, json) = send(create_test_app(0.0), "GET", "/", None).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(
        json,
        json!({
            "service": "PaySecure Fraud Detection API",
            "status": "active",
            "version": "1.0.0",
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_health() -> TestResult {
    let (status, json) = send(create_test_app(0.0), "GET", "/health", None).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(json["status"], "healthy");
    test_assert_eq!(json["service"], "fraud-detection");
    let timestamp = json["timestamp"].as_str().unwrap_or_default();
    test_assert!(
        DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "timestamp '{}' is not ISO-8601",
        timestamp
    );
    Ok(())
}

#[tokio::test]
async fn test_metrics_are_static() -> TestResult {
    let (status, json) = send(create_test_app(0.0), "GET", "/metrics", None).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(
        json,
        json!({
            "service": "fraud-detection",
            "uptime": "active",
            "model_version": "1.0.0",
            "accuracy": 0.95,
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_with_credentials() -> TestResult {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(CHECK_URI)
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-request-id")
        .body(Body::empty())
        .map_err(TestError::from)?;

    let response = create_test_app(0.0)
        .oneshot(request)
        .await
        .map_err(|e| TestError::generic(format!("Request failed: {}", e)))?;

    test_utils::check_status_code(response.status(), StatusCode::OK)?;
    let headers = response.headers();
    test_assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    test_assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    test_assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    test_assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type,x-request-id");
    Ok(())
}

#[tokio::test]
async fn test_cors_simple_request_echoes_origin() -> TestResult {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "https://shop.example.com")
        .body(Body::empty())
        .map_err(TestError::from)?;

    let response = create_test_app(0.0)
        .oneshot(request)
        .await
        .map_err(|e| TestError::generic(format!("Request failed: {}", e)))?;

    test_utils::check_status_code(response.status(), StatusCode::OK)?;
    test_assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://shop.example.com"
    );
    Ok(())
}

#[tokio::test]
async fn test_openapi_document() -> TestResult {
    let (status, json) = send(create_test_app(0.0), "GET", "/openapi.json", None).await?;

    test_utils::check_status_code(status, StatusCode::OK)?;
    test_assert_eq!(json["info"]["title"], "PaySecure Fraud Detection API");
    test_assert_eq!(json["info"]["version"], "1.0.0");
    for path in ["/", "/health", "/metrics", "/api/v1/fraud/check"] {
        test_assert!(json["paths"].get(path).is_some(), "path {} not documented", path);
    }
    test_assert!(json["paths"][CHECK_URI]["post"]["requestBody"].is_object());
    test_assert!(json["paths"][CHECK_URI]["post"]["responses"]["422"].is_object());
    test_assert!(json["components"]["schemas"]["TransactionRequest"].is_object());
    test_assert!(json["components"]["schemas"]["FraudCheckResponse"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_docs_page_points_at_openapi_document() -> TestResult {
    let request = test_utils::build_request("GET", "/docs", None)?;
    let (parts, body) = request.into_parts();
    let request = Request::from_parts(parts, Body::from(body));

    let response = create_test_app(0.0)
        .oneshot(request)
        .await
        .map_err(|e| TestError::generic(format!("Request failed: {}", e)))?;

    test_utils::check_status_code(response.status(), StatusCode::OK)?;
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    test_assert!(content_type.starts_with("text/html"), "content type {}", content_type);
    let html = response_body_string(response).await;
    test_assert!(html.contains("swagger-ui"));
    test_assert!(html.contains("/openapi.json"));
    Ok(())
}

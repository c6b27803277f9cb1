use chrono::{SecondsFormat, Utc};
use clap::Parser;
use std::{error::Error, path::PathBuf, sync::Arc};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{self, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::{OpenApi, ToSchema};
use tower_http::{
    trace::TraceLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
};
use common::config::{Config, ServiceConfig};
use crate::{
    error::{ApiError, MessageBody, ValidationErrorBody},
    model::{FieldError, FieldErrorKind, FraudCheckResponse, RiskLevel, TransactionRequest},
    processor::Processor,
    scorers::Scorer,
};

pub const SERVICE_TITLE: &str = "PaySecure Fraud Detection API";
pub const SERVICE_NAME: &str = "fraud-detection";
pub const SERVICE_VERSION: &str = "1.0.0";
pub const MODEL_VERSION: &str = "1.0.0";
pub const MODEL_ACCURACY: f64 = 0.95;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PaySecure Fraud Detection API",
        version = "1.0.0",
        description = "AI-powered fraud detection for payment transactions"
    ),
    paths(root, health_check, model_metrics, check_fraud),
    components(schemas(
        TransactionRequest,
        FraudCheckResponse,
        RiskLevel,
        FieldError,
        FieldErrorKind,
        ValidationErrorBody,
        MessageBody,
        ServiceInfo,
        HealthStatus,
        ModelMetrics,
    )),
    tags(
        (name = "fraud", description = "Transaction fraud scoring"),
        (name = "service", description = "Service status")
    )
)]
pub struct ApiDoc;

// Swagger UI assets come from the CDN; the page only points them at /openapi.json.
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
<title>PaySecure Fraud Detection API - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({
    url: '/openapi.json',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
})
</script>
</body>
</html>"#;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    /// RFC 3339 UTC time of the check
    pub timestamp: String,
    pub service: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelMetrics {
    pub service: String,
    pub uptime: String,
    pub model_version: String,
    pub accuracy: f64,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "PaySecure fraud detection service", long_about = None)]
pub struct Args {
    /// Path to a YAML config file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, overrides the config file (e.g. 127.0.0.1:8001)
    #[arg(short, long)]
    pub server_address: Option<String>,
}

pub fn load_config(args: &Args) -> Result<Config, Box<dyn Error + Send + Sync>> {
    let config = match &args.config {
        Some(path) => {
            println!("Loading config from: {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    let config = config.with_server_address(args.server_address.clone());
    // Fail before tracing is up if the address is unusable.
    config.service.socket_addr()?;
    Ok(config)
}

pub fn initialize_executable() -> Result<Config, Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    let config = load_config(&args)?;
    initialize_tracing(&config.service.log_level);
    tracing::debug!(?config, "Loaded config");
    Ok(config)
}

pub fn initialize_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(log_level).unwrap_or_else(|e| {
        eprintln!("Invalid log level '{log_level}' ({e}), falling back to info");
        tracing_subscriber::EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub struct AppState<S: Scorer> {
    processor: Arc<Processor<S>>,
}

impl<S: Scorer> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}

impl<S: Scorer> AppState<S> {
    pub fn new(processor: Processor<S>) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }
}

/// Any origin, method and header, with credentials. Mirrored from the
/// request since a wildcard cannot be combined with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn create_router<S>(processor: Processor<S>) -> Router
where
    S: Scorer + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(model_metrics))
        .route("/api/v1/fraud/check", post(check_fraud::<S>))
        .route("/docs", get(docs))
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(AppState::new(processor))
}

pub async fn run_backend<S>(
    config: ServiceConfig,
    processor: Processor<S>,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    S: Scorer + 'static,
{
    let address = config.socket_addr()?;
    let app = create_router(processor);

    tracing::info!("Starting fraud detection service at {}", address);
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fraud detection service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn docs() -> impl IntoResponse {
    response::Html(SWAGGER_UI_HTML)
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service banner", body = ServiceInfo))
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_TITLE.to_string(),
        status: "active".to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Liveness check", body = HealthStatus))
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        service: SERVICE_NAME.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "service",
    responses((status = 200, description = "Static model metadata", body = ModelMetrics))
)]
pub async fn model_metrics() -> Json<ModelMetrics> {
    Json(ModelMetrics {
        service: SERVICE_NAME.to_string(),
        uptime: "active".to_string(),
        model_version: MODEL_VERSION.to_string(),
        accuracy: MODEL_ACCURACY,
    })
}

/// Score a transaction for fraud
#[utoipa::path(
    post,
    path = "/api/v1/fraud/check",
    tag = "fraud",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Fraud assessment", body = FraudCheckResponse),
        (status = 415, description = "Body is not sent as JSON", body = MessageBody),
        (status = 422, description = "Invalid, missing or unknown fields", body = ValidationErrorBody)
    )
)]
pub async fn check_fraud<S: Scorer>(
    State(state): State<AppState<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FraudCheckResponse>, ApiError> {
    let Json(body) = payload?;
    let transaction = TransactionRequest::from_json_value(body)?;

    tracing::info!(
        transaction_id = %transaction.transaction_id,
        merchant_id = %transaction.merchant_id,
        transaction_type = %transaction.transaction_type,
        "Processing fraud check"
    );

    Ok(Json(state.processor.check(&transaction)))
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::FieldError;

/// 422 body listing every invalid location.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub detail: Vec<FieldError>,
}

/// Body for rejections that are not about individual fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed for {} location(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("request body rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => {
                ApiError::Validation(vec![FieldError::json_invalid(e.body_text())])
            }
            JsonRejection::JsonDataError(e) => {
                ApiError::Validation(vec![FieldError::json_invalid(e.body_text())])
            }
            other => ApiError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = %status, error = %self, "Rejecting fraud check request");

        match self {
            ApiError::Validation(detail) => (status, Json(ValidationErrorBody { detail })).into_response(),
            ApiError::Rejected { message, .. } => (status, Json(MessageBody { detail: message })).into_response(),
        }
    }
}
